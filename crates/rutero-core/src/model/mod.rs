//! Domain models
//!
//! Persisted documents serialize in camelCase because the document layout
//! mirrors the dashboard's existing store.

pub mod commission;
pub mod order;
pub mod route_batch;
pub mod statement;

pub use commission::CommissionRecord;
pub use order::SourceOrder;
pub use route_batch::{derive_status, RouteBatch, RouteStatus, Stop, StopItem};
pub use statement::{InvoiceLineItem, InvoiceStatus, InvoiceSummary, PaymentRecord, StatementEntry};
