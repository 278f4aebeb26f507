//! Rutero Store - SQLite persistence for the document store
//!
//! Provides:
//! - SQLite schema with an embedded migrations framework
//! - `SqliteStore`, the production `RecordStore` implementation

pub mod db;
pub mod migrations;
pub mod sqlite_store;

pub use sqlite_store::SqliteStore;
