//! Shared test fixtures

// Not every test binary uses every fixture.
#![allow(dead_code)]

use rutero_core::store::{collections, MemoryStore, RecordStore};

/// Seed one source order document, including fields this core ignores,
/// to mimic documents owned by the wider dashboard.
pub fn seed_order(store: &MemoryStore, id: &str, client_label: &str, total: f64) {
    let body = serde_json::json!({
        "id": id,
        "clientLabel": client_label,
        "total": total,
        "items": [
            {"product": "Yerba 1kg", "quantity": total / 1250.0, "unitPrice": 1250.0}
        ],
        "status": "confirmed",
        "visitId": format!("visit-{}", id)
    });
    store.put(collections::ORDERS, id, None, &body).unwrap();
}

/// Read the back-reference field straight off the order document
pub fn order_back_reference(store: &MemoryStore, id: &str) -> serde_json::Value {
    store
        .get(collections::ORDERS, id)
        .unwrap()
        .unwrap()
        .body
        .get("routeBatchId")
        .cloned()
        .unwrap_or(serde_json::Value::Null)
}
