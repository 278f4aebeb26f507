//! Source order view
//!
//! Order documents are owned by the wider dashboard (catalog, order entry);
//! the route batch engine only reads the snapshot fields it copies into a
//! stop and maintains the `routeBatchId` back-reference. Mutations patch
//! the JSON body in place rather than round-tripping through this struct,
//! so fields this core does not know about survive.

use serde::{Deserialize, Serialize};

use super::route_batch::StopItem;

/// Field on order documents holding the route batch back-reference
pub const ROUTE_BATCH_REF_FIELD: &str = "routeBatchId";

/// Read-side view of a source order document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOrder {
    pub id: String,
    pub client_label: String,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<StopItem>,
    /// Back-reference to the batch this order is assigned to, if any
    #[serde(default)]
    pub route_batch_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_document_with_foreign_fields() {
        // Order documents carry dashboard fields this core ignores.
        let body = serde_json::json!({
            "id": "order-1",
            "clientLabel": "Almacén Mitre",
            "total": 12500.0,
            "items": [{"product": "Yerba 1kg", "quantity": 10.0, "unitPrice": 1250.0}],
            "status": "confirmed",
            "createdBy": "admin"
        });
        let order: SourceOrder = serde_json::from_value(body).unwrap();
        assert_eq!(order.client_label, "Almacén Mitre");
        assert_eq!(order.total, 12500.0);
        assert_eq!(order.items.len(), 1);
        assert!(order.route_batch_id.is_none());
    }
}
