//! Rutero Gateway - HTTP client for the external invoicing system
//!
//! Implements the core's `InvoicingGateway` seam over the invoicing
//! system's read-only HTTP API.

pub mod http;

pub use http::HttpInvoicingGateway;
