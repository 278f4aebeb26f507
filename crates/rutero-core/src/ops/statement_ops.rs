//! Account statement cache
//!
//! Per-client cached reconciliation of the invoicing system's invoices and
//! payments. The surface is deliberately two methods: `read_statement` is a
//! pure cache read for render paths (never touches the gateway), and
//! `refresh_statement` is the explicit pull path with TTL-based freshness
//! and a forced bypass. A refresh always replaces the whole entry in one
//! document write; on gateway failure the previous entry stays servable.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::errors::Result;
use crate::gateway::{GatewayInvoice, InvoicingGateway};
use crate::model::{InvoiceLineItem, InvoiceStatus, InvoiceSummary, PaymentRecord, StatementEntry};
use crate::store::{collections, decode_body, encode_body, RecordStore};

/// Maximum cache age before an entry is considered stale (12 hours)
pub const STATEMENT_TTL_MINUTES: i64 = 720;

/// How far back a refresh pulls invoices from the gateway
pub const STATEMENT_LOOKBACK_DAYS: i64 = 365;

/// Cache read result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementView {
    pub exists: bool,
    #[serde(flatten)]
    pub entry: StatementEntry,
}

/// Refresh result; `fresh` is true only on the no-op path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    pub fresh: bool,
    #[serde(flatten)]
    pub entry: StatementEntry,
}

/// Pure cache read; never calls the gateway
///
/// Returns `exists = false` with a zero aggregate when no entry has ever
/// been written for the client.
pub fn read_statement(store: &dyn RecordStore, client_id: &str) -> Result<StatementView> {
    match store.get(collections::STATEMENTS, client_id)? {
        Some(doc) => Ok(StatementView {
            exists: true,
            entry: decode_body(&doc)?,
        }),
        None => Ok(StatementView {
            exists: false,
            entry: StatementEntry::empty(),
        }),
    }
}

/// Refresh the cache entry for a client
///
/// Without `forced`, an existing fresh entry short-circuits: the gateway is
/// not called and the entry is returned unchanged with `fresh = true`.
/// Otherwise the gateway is pulled for the lookback window, the three
/// totals are recomputed from scratch, and the entry is overwritten whole
/// with a new refresh instant.
///
/// # Errors
///
/// * `Upstream` - gateway failure; the previous entry (if any) is left
///   untouched and stays servable via `read_statement`
pub fn refresh_statement(
    store: &dyn RecordStore,
    gateway: &dyn InvoicingGateway,
    client_id: &str,
    forced: bool,
) -> Result<RefreshOutcome> {
    let now = Utc::now();

    if !forced {
        if let Some(doc) = store.get(collections::STATEMENTS, client_id)? {
            let entry: StatementEntry = decode_body(&doc)?;
            if entry.is_fresh(now, STATEMENT_TTL_MINUTES) {
                tracing::debug!(client_id, "statement cache fresh, skipping gateway pull");
                return Ok(RefreshOutcome { fresh: true, entry });
            }
        }
    }

    let today = now.date_naive();
    let from = today - Duration::days(STATEMENT_LOOKBACK_DAYS);
    let invoices = gateway.invoices_for(client_id, from, today)?;

    let summaries = invoices
        .into_iter()
        .map(|invoice| summarize_invoice(invoice, today))
        .collect();
    let entry = StatementEntry::from_invoices(summaries, now);
    store.put(
        collections::STATEMENTS,
        client_id,
        None,
        &encode_body(&entry)?,
    )?;

    tracing::info!(
        client_id,
        invoices = entry.invoices.len(),
        forced,
        "statement cache refreshed"
    );
    Ok(RefreshOutcome {
        fresh: false,
        entry,
    })
}

/// Reconcile one gateway invoice into a cached summary
fn summarize_invoice(invoice: GatewayInvoice, today: NaiveDate) -> InvoiceSummary {
    let paid = invoice.paid();
    let status = if paid >= invoice.total {
        InvoiceStatus::Paid
    } else if invoice.due_date < today {
        InvoiceStatus::Overdue
    } else {
        InvoiceStatus::Pending
    };
    InvoiceSummary {
        number: invoice.number,
        issue_date: invoice.issue_date,
        due_date: invoice.due_date,
        total: invoice.total,
        paid,
        status,
        items: invoice
            .items
            .into_iter()
            .map(|item| InvoiceLineItem {
                description: item.description,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
        payments: invoice
            .payments
            .into_iter()
            .map(|payment| PaymentRecord {
                date: payment.date,
                amount: payment.amount,
                method: payment.method,
            })
            .collect(),
    }
}
