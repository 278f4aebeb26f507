//! Database connection management
//!
//! Provides utilities for opening and configuring SQLite connections

use std::path::Path;

use rusqlite::Connection;
use rutero_core::errors::{CoreError, Result};

/// Map a rusqlite error into the core persistence error
pub(crate) fn from_rusqlite(op: &str, err: rusqlite::Error) -> CoreError {
    CoreError::persistence(op, err.to_string())
}

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(|e| from_rusqlite("open", e))
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(|e| from_rusqlite("open", e))
}

/// Configure a connection with optimal settings
pub fn configure(conn: &Connection) -> Result<()> {
    // Enable foreign keys
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(|e| from_rusqlite("configure", e))?;

    // Set WAL mode for better concurrency; this pragma returns a row, so it
    // has to go through query_row.
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .map_err(|e| from_rusqlite("configure", e))?;

    Ok(())
}
