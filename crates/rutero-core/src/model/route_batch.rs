//! Route batch - an ordered group of delivery stops for one agent and date
//!
//! The batch `status` is a cached derived field, never authoritative: it is
//! recomputed from the full stop list on every stop mutation and persisted
//! in the same write. The field is private so only the mutation API (and
//! hydration from the store) can set it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state of a route batch, derived from its stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Pending,
    Complete,
}

/// One denormalized line of a source order, snapshotted at assignment time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopItem {
    pub product: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// One delivery unit inside a route batch
///
/// Position is implied by array order in the owning batch; there is no
/// stored position field, so reordering is an in-place swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub order_id: String,
    pub client_label: String,
    pub delivered: bool,
    /// Copied from the source order at assignment time, never re-fetched,
    /// so historical totals stay stable if the order later changes.
    pub amount: f64,
    pub items: Vec<StopItem>,
}

/// Derive the completion state from a stop list
///
/// Complete iff the list is non-empty and every stop is delivered.
pub fn derive_status(stops: &[Stop]) -> RouteStatus {
    if !stops.is_empty() && stops.iter().all(|stop| stop.delivered) {
        RouteStatus::Complete
    } else {
        RouteStatus::Pending
    }
}

/// Route batch document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteBatch {
    pub id: String,
    pub date: NaiveDate,
    pub responsible: String,
    // Cached derived field; set only via recompute_status (and hydration).
    status: RouteStatus,
    pub stops: Vec<Stop>,
}

impl RouteBatch {
    /// Create a new batch; status is derived from the initial stop list
    pub fn new(id: String, date: NaiveDate, responsible: String, stops: Vec<Stop>) -> Self {
        let status = derive_status(&stops);
        Self {
            id,
            date,
            responsible,
            status,
            stops,
        }
    }

    /// Current completion state
    pub fn status(&self) -> RouteStatus {
        self.status
    }

    /// Recompute the cached status from the current stop list
    ///
    /// Must be called inside every stop-mutating operation before the
    /// batch document is persisted.
    pub(crate) fn recompute_status(&mut self) {
        self.status = derive_status(&self.stops);
    }
}
