// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer; query modules
//! accept `&Database` and go through `connection().call()`. Do NOT create
//! additional Connection instances for writes.

use hemolink_core::HemolinkError;
use tokio_rusqlite::Connection;

use crate::migrations;

/// Convert a tokio-rusqlite error into HemolinkError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HemolinkError {
    HemolinkError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database, wrapping a single background connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, HemolinkError> {
        let conn = Connection::open(path).await.map_err(|e| map_tr_err(e.into()))?;
        Self::initialize(conn).await
    }

    /// Open an in-memory database with the full schema applied.
    ///
    /// Intended for tests; the journal mode stays `memory` rather than WAL.
    pub async fn open_in_memory() -> Result<Self, HemolinkError> {
        let conn = Connection::open_in_memory().await.map_err(|e| map_tr_err(e.into()))?;
        Self::initialize(conn).await
    }

    async fn initialize(conn: Connection) -> Result<Self, HemolinkError> {
        conn.call(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
            // journal_mode returns the resulting mode as a row, so it
            // cannot go through execute_batch.
            let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run(conn))
            .await
            .map_err(|e| HemolinkError::Storage {
                source: Box::new(e),
            })?;

        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the database, flushing pending writes.
    pub async fn close(self) -> Result<(), HemolinkError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}
