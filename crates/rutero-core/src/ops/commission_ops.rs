//! Commission ledger
//!
//! Computes, for one calendar month and the closed set of recognized
//! agents, the total routed value and a fixed-percentage commission, and
//! persists exactly one record per (agent, period). Recomputation is a
//! full-snapshot replacement: the routed total is re-summed from the stop
//! amounts nested in each sheet document at calculation time, and the
//! upsert overwrites the summed fields, so re-running a period can never
//! accumulate. Running it twice concurrently interleaves safely for the
//! same reason.

use std::collections::BTreeMap;

use chrono::Utc;
use rutero_core_types::Period;

use crate::errors::{CoreError, Result};
use crate::model::commission::{is_recognized, RECOGNIZED_AGENTS};
use crate::model::{CommissionRecord, RouteBatch};
use crate::store::{collections, decode_body, encode_body, RecordStore};

/// Document id for a ledger record: one per (agent, period)
fn record_id(agent: &str, period: Period) -> String {
    format!("{}__{}", agent, period)
}

/// Compute and persist the ledger for one calendar month
///
/// Sheets whose responsible is outside `RECOGNIZED_AGENTS` are discarded
/// entirely (no partial credit, no error). A record is written for every
/// recognized agent, including zero-valued ones, so reads never face a
/// "record not found" ambiguity for a valid agent+period.
///
/// Returns the full set of records written.
///
/// # Errors
///
/// * `Validation` - malformed period (callers parsing user input hit this
///   at `Period::from_str`)
pub fn compute_monthly(store: &dyn RecordStore, period: Period) -> Result<Vec<CommissionRecord>> {
    let start = period.first_day().to_string();
    let end = period.last_day().to_string();
    let docs = store.query_range(collections::ROUTE_BATCHES, &start, &end)?;

    let mut sums: BTreeMap<&str, (f64, u32)> = RECOGNIZED_AGENTS
        .iter()
        .map(|agent| (*agent, (0.0, 0)))
        .collect();

    for doc in &docs {
        let batch: RouteBatch = decode_body(doc)?;
        let Some((total, count)) = sums.get_mut(batch.responsible.as_str()) else {
            // Unrecognized responsible: the whole sheet contributes nothing.
            continue;
        };
        // Re-sum the order totals nested in the sheet at calculation time;
        // never trust a previously cached figure.
        *total += batch.stops.iter().map(|stop| stop.amount).sum::<f64>();
        *count += 1;
    }

    let now = Utc::now();
    let mut records = Vec::with_capacity(RECOGNIZED_AGENTS.len());
    for agent in RECOGNIZED_AGENTS {
        let (total_routed, batch_count) = sums[agent];
        let record = CommissionRecord::from_total(agent, period, total_routed, batch_count, now);
        store.put(
            collections::COMMISSIONS,
            &record_id(agent, period),
            Some(&period.to_string()),
            &encode_body(&record)?,
        )?;
        records.push(record);
    }

    tracing::info!(
        period = %period,
        sheets = docs.len(),
        "commission ledger computed"
    );
    Ok(records)
}

/// Read the ledger record for one agent and period
///
/// A period that has never been computed returns a synthetic zero-valued
/// record (not persisted): absence is a valid business state, not an error.
///
/// # Errors
///
/// * `UnrecognizedAgent`
pub fn get_record(
    store: &dyn RecordStore,
    agent: &str,
    period: Period,
) -> Result<CommissionRecord> {
    if !is_recognized(agent) {
        return Err(CoreError::UnrecognizedAgent {
            agent: agent.to_string(),
        });
    }
    match store.get(collections::COMMISSIONS, &record_id(agent, period))? {
        Some(doc) => decode_body(&doc),
        None => Ok(CommissionRecord::zeroed(agent, period)),
    }
}

/// List all computed periods for one agent, newest first
///
/// # Errors
///
/// * `UnrecognizedAgent`
pub fn list_records(store: &dyn RecordStore, agent: &str) -> Result<Vec<CommissionRecord>> {
    if !is_recognized(agent) {
        return Err(CoreError::UnrecognizedAgent {
            agent: agent.to_string(),
        });
    }
    let mut records = Vec::new();
    for doc in store.list(collections::COMMISSIONS)? {
        let record: CommissionRecord = decode_body(&doc)?;
        if record.agent == agent {
            records.push(record);
        }
    }
    records.sort_by(|a, b| b.period.cmp(&a.period));
    Ok(records)
}
