//! RecordStore collaborator seam
//!
//! The store offers document primitives only: get/put/delete by
//! collection + id, a range scan over an optional range key, and a full
//! collection listing. There are no joins and no partial updates; every
//! write replaces the whole document, which is what makes the documented
//! last-write-wins race possible (see the race tests).

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CoreError, Result};

/// Collection names used by the core
pub mod collections {
    pub const ROUTE_BATCHES: &str = "route_batches";
    pub const ORDERS: &str = "orders";
    pub const COMMISSIONS: &str = "commissions";
    pub const STATEMENTS: &str = "statements";
}

/// A stored document: JSON body plus an optional range key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Sort/scan key for `query_range` (ISO date for route batches,
    /// period for commissions); None for documents never range-scanned.
    pub range_key: Option<String>,
    pub body: Value,
    pub updated_at: DateTime<Utc>,
}

/// Document store primitives
///
/// Implementations must replace the whole document on `put`; the core
/// relies on that atomicity for cache entries and batch writes.
pub trait RecordStore {
    /// Fetch one document, None if absent
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Insert or fully replace one document
    fn put(&self, collection: &str, id: &str, range_key: Option<&str>, body: &Value)
        -> Result<()>;

    /// Remove one document; removing an absent document is not an error
    fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// All documents whose range key falls in `[start, end]` (inclusive),
    /// ordered by (range_key, id)
    fn query_range(&self, collection: &str, start: &str, end: &str) -> Result<Vec<Document>>;

    /// All documents in a collection, ordered by id
    fn list(&self, collection: &str) -> Result<Vec<Document>>;
}

/// Serialize a domain value into a document body
pub fn encode_body<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Deserialize a document body into a domain value
pub fn decode_body<T: DeserializeOwned>(doc: &Document) -> Result<T> {
    Ok(serde_json::from_value(doc.body.clone())?)
}

/// In-memory RecordStore
///
/// HashMap of collections, BTreeMap of documents per collection. Used by
/// tests; the production implementation is `rutero_store::SqliteStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_error(op: &str) -> CoreError {
        CoreError::persistence(op, "memory store lock poisoned")
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| Self::lock_error("get"))?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn put(
        &self,
        collection: &str,
        id: &str,
        range_key: Option<&str>,
        body: &Value,
    ) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| Self::lock_error("put"))?;
        let doc = Document {
            id: id.to_string(),
            range_key: range_key.map(str::to_string),
            body: body.clone(),
            updated_at: Utc::now(),
        };
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), doc);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| Self::lock_error("delete"))?;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    fn query_range(&self, collection: &str, start: &str, end: &str) -> Result<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| Self::lock_error("query_range"))?;
        let mut matches: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| {
                        doc.range_key
                            .as_deref()
                            .is_some_and(|key| key >= start && key <= end)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        matches.sort_by(|a, b| (&a.range_key, &a.id).cmp(&(&b.range_key, &b.id)));
        Ok(matches)
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| Self::lock_error("list"))?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get_round_trip() {
        let store = MemoryStore::new();
        store
            .put("orders", "o1", None, &json!({"total": 100.0}))
            .unwrap();

        let doc = store.get("orders", "o1").unwrap().unwrap();
        assert_eq!(doc.id, "o1");
        assert_eq!(doc.body["total"], 100.0);
        assert!(store.get("orders", "missing").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_whole_document() {
        let store = MemoryStore::new();
        store
            .put("orders", "o1", None, &json!({"a": 1, "b": 2}))
            .unwrap();
        store.put("orders", "o1", None, &json!({"a": 9})).unwrap();

        let doc = store.get("orders", "o1").unwrap().unwrap();
        assert_eq!(doc.body, json!({"a": 9}));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put("orders", "o1", None, &json!({})).unwrap();
        store.delete("orders", "o1").unwrap();
        store.delete("orders", "o1").unwrap();
        assert!(store.get("orders", "o1").unwrap().is_none());
    }

    #[test]
    fn test_query_range_is_inclusive_and_ordered() {
        let store = MemoryStore::new();
        for (id, date) in [
            ("b1", "2024-03-01"),
            ("b2", "2024-03-31"),
            ("b3", "2024-04-01"),
            ("b4", "2024-02-29"),
        ] {
            store
                .put("route_batches", id, Some(date), &json!({"id": id}))
                .unwrap();
        }

        let docs = store
            .query_range("route_batches", "2024-03-01", "2024-03-31")
            .unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b1", "b2"]);
    }

    #[test]
    fn test_documents_without_range_key_are_not_scanned() {
        let store = MemoryStore::new();
        store.put("statements", "c1", None, &json!({})).unwrap();
        let docs = store.query_range("statements", "", "~").unwrap();
        assert!(docs.is_empty());
    }
}
