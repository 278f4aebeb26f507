//! Operations over the RecordStore
//!
//! The three components of the core, as free functions over `&dyn
//! RecordStore`. Every mutating route operation is a read-modify-write of
//! the whole batch document; aggregates are always recomputed from their
//! children, never trusted from a cached field.

pub mod commission_ops;
pub mod route_ops;
pub mod statement_ops;

pub use commission_ops::{compute_monthly, get_record, list_records};
pub use route_ops::{
    create_batch, delete_batch, remove_stop, reorder_stops, toggle_delivered, total_of,
};
pub use statement_ops::{read_statement, refresh_statement, RefreshOutcome, StatementView};
