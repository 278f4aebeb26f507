//! SQLite-backed RecordStore
//!
//! One `documents` table keyed by (collection, id). `put` is an upsert that
//! replaces the whole row, matching the whole-document replacement contract
//! of the `RecordStore` trait.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use rutero_core::errors::{CoreError, Result};
use rutero_core::store::{Document, RecordStore};
use serde_json::Value;

use crate::db::{self, from_rusqlite};
use crate::migrations::apply_migrations;

/// Production RecordStore over a single SQLite connection
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and bring the schema current
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store for tests
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self, op: &str) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CoreError::persistence(op, "connection lock poisoned"))
    }
}

/// Rebuild a Document from one row: (id, range_key, body, updated_at)
fn row_to_document(
    id: String,
    range_key: Option<String>,
    body: String,
    updated_at: i64,
) -> Result<Document> {
    let body: Value = serde_json::from_str(&body)?;
    let updated_at = DateTime::<Utc>::from_timestamp(updated_at, 0).ok_or_else(|| {
        CoreError::persistence("read", format!("invalid updated_at timestamp {updated_at}"))
    })?;
    Ok(Document {
        id,
        range_key,
        body,
        updated_at,
    })
}

impl RecordStore for SqliteStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let conn = self.lock("get")?;
        let row = conn
            .query_row(
                "SELECT id, range_key, body, updated_at FROM documents
                 WHERE collection = ?1 AND id = ?2",
                rusqlite::params![collection, id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| from_rusqlite("get", e))?;

        row.map(|(id, range_key, body, updated_at)| row_to_document(id, range_key, body, updated_at))
            .transpose()
    }

    fn put(
        &self,
        collection: &str,
        id: &str,
        range_key: Option<&str>,
        body: &Value,
    ) -> Result<()> {
        let body = serde_json::to_string(body)?;
        let now = Utc::now().timestamp();
        let conn = self.lock("put")?;
        conn.execute(
            "INSERT INTO documents (collection, id, range_key, body, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(collection, id) DO UPDATE SET
                range_key = excluded.range_key,
                body = excluded.body,
                updated_at = excluded.updated_at",
            rusqlite::params![collection, id, range_key, body, now],
        )
        .map_err(|e| from_rusqlite("put", e))?;
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let conn = self.lock("delete")?;
        conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            rusqlite::params![collection, id],
        )
        .map_err(|e| from_rusqlite("delete", e))?;
        Ok(())
    }

    fn query_range(&self, collection: &str, start: &str, end: &str) -> Result<Vec<Document>> {
        let conn = self.lock("query_range")?;
        let mut stmt = conn
            .prepare(
                "SELECT id, range_key, body, updated_at FROM documents
                 WHERE collection = ?1 AND range_key >= ?2 AND range_key <= ?3
                 ORDER BY range_key, id",
            )
            .map_err(|e| from_rusqlite("query_range", e))?;
        let rows: Vec<(String, Option<String>, String, i64)> = stmt
            .query_map(rusqlite::params![collection, start, end], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(|e| from_rusqlite("query_range", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite("query_range", e))?;

        rows.into_iter()
            .map(|(id, range_key, body, updated_at)| {
                row_to_document(id, range_key, body, updated_at)
            })
            .collect()
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let conn = self.lock("list")?;
        let mut stmt = conn
            .prepare(
                "SELECT id, range_key, body, updated_at FROM documents
                 WHERE collection = ?1
                 ORDER BY id",
            )
            .map_err(|e| from_rusqlite("list", e))?;
        let rows: Vec<(String, Option<String>, String, i64)> = stmt
            .query_map(rusqlite::params![collection], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(|e| from_rusqlite("list", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite("list", e))?;

        rows.into_iter()
            .map(|(id, range_key, body, updated_at)| {
                row_to_document(id, range_key, body, updated_at)
            })
            .collect()
    }
}
