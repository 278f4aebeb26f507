//! CLI commands

pub mod commissions;
pub mod route;
pub mod statement;

use std::path::Path;

use rutero_core::errors::{CoreError, Result};
use rutero_store::SqliteStore;

/// Open the SQLite store backing all commands, creating the parent
/// directory on first use
pub(crate) fn open_store(db: &str) -> Result<SqliteStore> {
    if let Some(parent) = Path::new(db).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::persistence("open", e.to_string()))?;
        }
    }
    SqliteStore::open(db)
}

/// Print a command result as pretty JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
