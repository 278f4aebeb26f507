//! Rutero Core - aggregation and cache-consistency kernel
//!
//! This crate provides the domain logic of the rutero dashboard core:
//! - Route batch lifecycle with derived completion state
//! - Monthly commission ledger with idempotent replacement semantics
//! - Per-client cached reconciliation of the external invoicing system
//! - The `RecordStore` and `InvoicingGateway` collaborator seams
//!
//! All aggregation happens here; the store offers document primitives only.

pub mod errors;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod ops;
pub mod store;

// Re-export commonly used types
pub use errors::{CoreError, Result};
pub use gateway::{GatewayInvoice, GatewayLineItem, GatewayPayment, InvoicingGateway};
pub use model::{
    CommissionRecord, InvoiceStatus, InvoiceSummary, RouteBatch, RouteStatus, SourceOrder,
    StatementEntry, Stop, StopItem,
};
pub use store::{Document, MemoryStore, RecordStore};
