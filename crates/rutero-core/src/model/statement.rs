//! Account statement cache entries
//!
//! One entry per client id: the cached reconciliation of the external
//! invoicing system's invoices and payments into three totals. An entry is
//! fresh while its age is under the TTL; staleness alone never deletes it,
//! the last good aggregate is always servable. Refresh replaces the whole
//! entry in a single document write, never patches it.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reconciliation state of one invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

/// One line of an invoice as reported by the invoicing system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// One payment applied to an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Reconciled summary of one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: f64,
    pub paid: f64,
    pub status: InvoiceStatus,
    pub items: Vec<InvoiceLineItem>,
    pub payments: Vec<PaymentRecord>,
}

impl InvoiceSummary {
    /// Amount still owed on this invoice, clamped at zero for overpayments
    pub fn owed(&self) -> f64 {
        (self.total - self.paid).max(0.0)
    }
}

/// Cached per-client reconciliation aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementEntry {
    pub invoices: Vec<InvoiceSummary>,
    pub total_owed: f64,
    pub total_paid: f64,
    pub total_overall: f64,
    /// None only on the zero aggregate served for clients that were never
    /// refreshed; a persisted entry always carries the refresh instant.
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl StatementEntry {
    /// Zero aggregate served when no cache entry exists for a client
    pub fn empty() -> Self {
        Self {
            invoices: Vec::new(),
            total_owed: 0.0,
            total_paid: 0.0,
            total_overall: 0.0,
            last_refreshed_at: None,
        }
    }

    /// Recompute the three totals from scratch over an invoice set
    pub fn from_invoices(invoices: Vec<InvoiceSummary>, refreshed_at: DateTime<Utc>) -> Self {
        let total_owed = invoices.iter().map(InvoiceSummary::owed).sum();
        let total_paid = invoices.iter().map(|inv| inv.paid).sum();
        let total_overall = invoices.iter().map(|inv| inv.total).sum();
        Self {
            invoices,
            total_owed,
            total_paid,
            total_overall,
            last_refreshed_at: Some(refreshed_at),
        }
    }

    /// Freshness check: fresh iff the entry's age is strictly under the TTL
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_minutes: i64) -> bool {
        match self.last_refreshed_at {
            Some(refreshed_at) => now - refreshed_at < Duration::minutes(ttl_minutes),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(number: &str, total: f64, paid: f64) -> InvoiceSummary {
        InvoiceSummary {
            number: number.to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            total,
            paid,
            status: InvoiceStatus::Pending,
            items: Vec::new(),
            payments: Vec::new(),
        }
    }

    #[test]
    fn test_totals_from_empty_invoice_set() {
        let entry = StatementEntry::from_invoices(Vec::new(), Utc::now());
        assert_eq!(entry.total_owed, 0.0);
        assert_eq!(entry.total_paid, 0.0);
        assert_eq!(entry.total_overall, 0.0);
    }

    #[test]
    fn test_totals_reconcile() {
        let entry = StatementEntry::from_invoices(
            vec![invoice("A-1", 1000.0, 400.0), invoice("A-2", 500.0, 500.0)],
            Utc::now(),
        );
        assert_eq!(entry.total_owed, 600.0);
        assert_eq!(entry.total_paid, 900.0);
        assert_eq!(entry.total_overall, 1500.0);
        assert_eq!(entry.total_owed + entry.total_paid, entry.total_overall);
    }

    #[test]
    fn test_overpayment_owed_clamps_at_zero() {
        let inv = invoice("A-3", 100.0, 150.0);
        assert_eq!(inv.owed(), 0.0);
    }

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let entry = StatementEntry::from_invoices(Vec::new(), now - Duration::minutes(10));
        assert!(entry.is_fresh(now, 720));
        assert!(!entry.is_fresh(now + Duration::minutes(720), 720));
        assert!(!StatementEntry::empty().is_fresh(now, 720));
    }
}
