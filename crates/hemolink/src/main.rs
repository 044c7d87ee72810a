// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hemolink - emergency blood-request matching service.
//!
//! This is the binary entry point. Authentication lives in the external
//! account subsystem; every HTTP call here already carries an
//! authenticated donor or hospital id.

use clap::{Parser, Subcommand};

mod serve;
mod status;

/// Hemolink - emergency blood-request matching service.
#[derive(Parser, Debug)]
#[command(name = "hemolink", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Hemolink HTTP server.
    Serve,
    /// Print the effective configuration and database reachability.
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match hemolink_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            hemolink_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Status) => status::run_status(&config).await,
        Some(Commands::Serve) | None => serve::run_serve(config).await,
    };

    if let Err(e) = result {
        eprintln!("hemolink: {e}");
        std::process::exit(1);
    }
}
