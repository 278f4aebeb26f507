//! Rutero core types - foundation value types shared across the workspace
//!
//! Provides:
//! - `Period`: validated YYYY-MM calendar month (the commission ledger key)
//! - Correlation ids for request tracking

pub mod correlation;
pub mod period;

pub use correlation::RequestId;
pub use period::{Period, PeriodError};
