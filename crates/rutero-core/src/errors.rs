//! Error taxonomy for rutero operations
//!
//! Validation failures are always surfaced to the caller and never retried.
//! A missing commission record for a valid agent+period is *not* an error
//! (absence is a valid business state), so no variant exists for it; the
//! ledger returns a synthetic zero-valued record instead. Upstream failures
//! leave the last good cache entry intact.

use rutero_core_types::PeriodError;
use thiserror::Error;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Canonical error taxonomy
///
/// Each variant maps to a stable error code usable for programmatic
/// handling and external API responses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Bad input: blank required field, empty order set, malformed period
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// Route batch not found in the store
    #[error("Route batch not found: {batch_id}")]
    BatchNotFound { batch_id: String },

    /// Stop not found inside an existing batch
    #[error("Stop not found in batch {batch_id}: order {order_id}")]
    StopNotFound { batch_id: String, order_id: String },

    /// Source order document not found
    #[error("Source order not found: {order_id}")]
    OrderNotFound { order_id: String },

    /// Agent is outside the recognized closed set
    #[error("Unrecognized agent: {agent}")]
    UnrecognizedAgent { agent: String },

    /// InvoicingGateway failure; the previous cache entry is left untouched
    #[error("Invoicing gateway failure: {message}")]
    Upstream { message: String },

    /// RecordStore failure
    #[error("Persistence failure in {op}: {message}")]
    Persistence { op: String, message: String },

    /// Document body (de)serialization failure
    #[error("Serialization failure: {message}")]
    Serialization { message: String },
}

impl CoreError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation { .. } => "ERR_VALIDATION",
            CoreError::BatchNotFound { .. } => "ERR_BATCH_NOT_FOUND",
            CoreError::StopNotFound { .. } => "ERR_STOP_NOT_FOUND",
            CoreError::OrderNotFound { .. } => "ERR_ORDER_NOT_FOUND",
            CoreError::UnrecognizedAgent { .. } => "ERR_UNRECOGNIZED_AGENT",
            CoreError::Upstream { .. } => "ERR_UPSTREAM",
            CoreError::Persistence { .. } => "ERR_PERSISTENCE",
            CoreError::Serialization { .. } => "ERR_SERIALIZATION",
        }
    }

    /// Create a validation error
    pub fn validation(reason: impl Into<String>) -> Self {
        CoreError::Validation {
            reason: reason.into(),
        }
    }

    /// Create an upstream (gateway) error
    pub fn upstream(message: impl Into<String>) -> Self {
        CoreError::Upstream {
            message: message.into(),
        }
    }

    /// Create a persistence error with operation context
    pub fn persistence(op: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Persistence {
            op: op.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<PeriodError> for CoreError {
    fn from(err: PeriodError) -> Self {
        CoreError::Validation {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (CoreError::validation("x"), "ERR_VALIDATION"),
            (
                CoreError::BatchNotFound {
                    batch_id: "b".into(),
                },
                "ERR_BATCH_NOT_FOUND",
            ),
            (
                CoreError::UnrecognizedAgent { agent: "x".into() },
                "ERR_UNRECOGNIZED_AGENT",
            ),
            (CoreError::upstream("boom"), "ERR_UPSTREAM"),
            (CoreError::persistence("put", "boom"), "ERR_PERSISTENCE"),
        ];
        for (err, expected_code) in cases {
            assert_eq!(err.code(), expected_code, "Wrong code for {:?}", err);
        }
    }

    #[test]
    fn test_period_error_maps_to_validation() {
        let err: CoreError = "2024-3".parse::<rutero_core_types::Period>().unwrap_err().into();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert_eq!(err.code(), "ERR_VALIDATION");
    }
}
