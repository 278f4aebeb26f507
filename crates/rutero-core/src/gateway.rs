//! InvoicingGateway collaborator seam
//!
//! Read-only remote API returning a client's invoices (with embedded line
//! items and payments) for a date range. The cache layer calls it only on
//! refresh; a failure must leave the previous cache entry untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One line of an invoice as returned by the invoicing system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// One payment as returned by the invoicing system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayPayment {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// One invoice as returned by the invoicing system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayInvoice {
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<GatewayLineItem>,
    #[serde(default)]
    pub payments: Vec<GatewayPayment>,
}

impl GatewayInvoice {
    /// Sum of embedded payments
    pub fn paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }
}

/// External invoicing system, queryable by client and date range
pub trait InvoicingGateway {
    /// Fetch all invoices for a client issued in `[from, to]`
    ///
    /// # Errors
    ///
    /// Returns `Upstream` on any transport or remote failure.
    fn invoices_for(
        &self,
        client_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<GatewayInvoice>>;
}
