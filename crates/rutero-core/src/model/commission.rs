//! Commission ledger records
//!
//! One record per (agent, period). Recomputation is idempotent replacement:
//! the monthly computation overwrites the summed fields with freshly
//! computed values, never accumulates. A record is written for every
//! recognized agent even when nothing was routed, so reads never have to
//! disambiguate "zero" from "not found".

use chrono::{DateTime, Utc};
use rutero_core_types::Period;
use serde::{Deserialize, Serialize};

/// The closed set of sales agents eligible for commission
///
/// Delivery sheets whose responsible is outside this set contribute nothing
/// to the ledger (no partial credit, no error).
pub const RECOGNIZED_AGENTS: &[&str] = &["Guille", "Matias", "Ruben"];

/// Fixed commission percentage applied to the routed total
pub const COMMISSION_PERCENTAGE: f64 = 4.0;

/// Check membership in the recognized agent set
pub fn is_recognized(agent: &str) -> bool {
    RECOGNIZED_AGENTS.contains(&agent)
}

/// Commission ledger record for one agent and one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRecord {
    pub agent: String,
    pub period: Period,
    pub total_routed: f64,
    pub percentage: f64,
    pub commission_amount: f64,
    pub batch_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl CommissionRecord {
    /// Build a record from a freshly summed routed total
    pub fn from_total(
        agent: &str,
        period: Period,
        total_routed: f64,
        batch_count: u32,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            agent: agent.to_string(),
            period,
            total_routed,
            percentage: COMMISSION_PERCENTAGE,
            commission_amount: total_routed * COMMISSION_PERCENTAGE / 100.0,
            batch_count,
            updated_at,
        }
    }

    /// Synthetic zero-valued record for a valid agent+period that has never
    /// been computed; not persisted.
    pub fn zeroed(agent: &str, period: Period) -> Self {
        Self::from_total(agent, period, 0.0, 0, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_set_is_closed() {
        assert!(is_recognized("Guille"));
        assert!(!is_recognized("guille"));
        assert!(!is_recognized("Someone Else"));
        assert!(!is_recognized(""));
    }

    #[test]
    fn test_from_total_applies_fixed_percentage() {
        let period: Period = "2024-03".parse().unwrap();
        let record = CommissionRecord::from_total("Guille", period, 150_000.0, 2, Utc::now());
        assert_eq!(record.percentage, 4.0);
        assert_eq!(record.commission_amount, 6_000.0);
        assert_eq!(record.batch_count, 2);
    }

    #[test]
    fn test_zeroed_record() {
        let period: Period = "2024-03".parse().unwrap();
        let record = CommissionRecord::zeroed("Ruben", period);
        assert_eq!(record.total_routed, 0.0);
        assert_eq!(record.commission_amount, 0.0);
        assert_eq!(record.batch_count, 0);
        assert_eq!(record.percentage, COMMISSION_PERCENTAGE);
    }
}
