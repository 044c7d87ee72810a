// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hemolink status` command: effective configuration and a quick look at
//! the database.

use hemolink_config::HemolinkConfig;
use hemolink_core::HemolinkError;
use hemolink_storage::Database;

/// Row counts for the status summary.
struct Counts {
    donors: i64,
    hospitals: i64,
    pending: i64,
    resolved: i64,
    history: i64,
}

async fn collect_counts(db: &Database) -> Result<Counts, HemolinkError> {
    db.connection()
        .call(|conn| -> Result<Counts, rusqlite::Error> {
            let one = |sql: &str| -> Result<i64, rusqlite::Error> {
                conn.query_row(sql, [], |row| row.get(0))
            };
            Ok(Counts {
                donors: one("SELECT COUNT(*) FROM donors")?,
                hospitals: one("SELECT COUNT(*) FROM hospitals")?,
                pending: one("SELECT COUNT(*) FROM notifications WHERE status = 'pending'")?,
                resolved: one("SELECT COUNT(*) FROM notifications WHERE status != 'pending'")?,
                history: one("SELECT COUNT(*) FROM donation_history")?,
            })
        })
        .await
        .map_err(|e| HemolinkError::Storage {
            source: Box::new(e),
        })
}

/// Run the `hemolink status` command.
pub async fn run_status(config: &HemolinkConfig) -> Result<(), HemolinkError> {
    println!("hemolink status");
    println!("  server:   {}:{}", config.server.host, config.server.port);
    println!("  log:      {}", config.log.level);
    println!("  database: {}", config.storage.database_path);

    let db = Database::open(&config.storage.database_path).await?;
    let counts = collect_counts(&db).await?;

    println!("  donors:        {}", counts.donors);
    println!("  hospitals:     {}", counts.hospitals);
    println!("  notifications: {} pending, {} resolved", counts.pending, counts.resolved);
    println!("  donations:     {}", counts.history);

    db.close().await?;
    Ok(())
}
