//! Route batch engine
//!
//! Owns the RouteBatch lifecycle: assignment of source orders into an
//! ordered batch, per-stop delivery toggling, reordering, removal, and
//! deletion. Each mutating operation reads the whole batch document,
//! mutates the stop list, recomputes the derived status, and persists the
//! document in a single write. Two concurrent writers on the same batch
//! therefore race at document granularity (last write wins); that race is
//! accepted for this domain and reproduced by the race tests.

use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{CoreError, Result};
use crate::model::order::ROUTE_BATCH_REF_FIELD;
use crate::model::{RouteBatch, SourceOrder, Stop};
use crate::store::{collections, decode_body, encode_body, RecordStore};

/// Sum of stop amounts; pure, no I/O
pub fn total_of(batch: &RouteBatch) -> f64 {
    batch.stops.iter().map(|stop| stop.amount).sum()
}

/// Assign a set of source orders into a new route batch
///
/// Snapshots each order's client label, total and items into a stop, then
/// marks the order with a back-reference to the new batch id so it cannot
/// be assigned twice. The engine does not re-validate prior membership;
/// filtering already-referenced orders is the caller's contract.
///
/// # Errors
///
/// * `Validation` - empty `order_ids` or blank `responsible`
/// * `OrderNotFound` - a source order document is missing (checked before
///   any write)
pub fn create_batch(
    store: &dyn RecordStore,
    date: NaiveDate,
    responsible: &str,
    order_ids: &[String],
) -> Result<RouteBatch> {
    if responsible.trim().is_empty() {
        return Err(CoreError::validation("responsible must not be blank"));
    }
    if order_ids.is_empty() {
        return Err(CoreError::validation(
            "a route batch needs at least one source order",
        ));
    }

    // Resolve every order before writing anything.
    let mut stops = Vec::with_capacity(order_ids.len());
    let mut order_docs = Vec::with_capacity(order_ids.len());
    for order_id in order_ids {
        let doc = store
            .get(collections::ORDERS, order_id)?
            .ok_or_else(|| CoreError::OrderNotFound {
                order_id: order_id.clone(),
            })?;
        let order: SourceOrder = decode_body(&doc)?;
        stops.push(Stop {
            order_id: order_id.clone(),
            client_label: order.client_label,
            delivered: false,
            amount: order.total,
            items: order.items,
        });
        order_docs.push(doc);
    }

    let batch = RouteBatch::new(
        Uuid::now_v7().to_string(),
        date,
        responsible.trim().to_string(),
        stops,
    );
    persist_batch(store, &batch)?;

    // Back-references are separate document writes; this is not atomic with
    // the batch write (documented double-assignment window).
    for mut doc in order_docs {
        doc.body[ROUTE_BATCH_REF_FIELD] = Value::String(batch.id.clone());
        store.put(
            collections::ORDERS,
            &doc.id,
            doc.range_key.as_deref(),
            &doc.body,
        )?;
    }

    tracing::info!(
        batch_id = %batch.id,
        responsible = %batch.responsible,
        stops = batch.stops.len(),
        "route batch created"
    );
    Ok(batch)
}

/// Flip the delivered flag on the matching stop
///
/// Recomputes the derived status from the full stop list and persists stop
/// and status in the same document write.
///
/// # Errors
///
/// * `BatchNotFound` / `StopNotFound`
pub fn toggle_delivered(
    store: &dyn RecordStore,
    batch_id: &str,
    order_id: &str,
) -> Result<RouteBatch> {
    let mut batch = load_batch(store, batch_id)?;
    let stop = batch
        .stops
        .iter_mut()
        .find(|stop| stop.order_id == order_id)
        .ok_or_else(|| CoreError::StopNotFound {
            batch_id: batch_id.to_string(),
            order_id: order_id.to_string(),
        })?;
    stop.delivered = !stop.delivered;
    batch.recompute_status();
    persist_batch(store, &batch)?;

    tracing::debug!(batch_id, order_id, status = ?batch.status(), "stop toggled");
    Ok(batch)
}

/// Swap two stops' positions
///
/// Position is implied by array order, so this is an in-place swap of two
/// elements. A swap with either index out of bounds is a silent no-op, not
/// an error (nothing is written).
///
/// # Errors
///
/// * `BatchNotFound`
pub fn reorder_stops(
    store: &dyn RecordStore,
    batch_id: &str,
    from: usize,
    to: usize,
) -> Result<RouteBatch> {
    let mut batch = load_batch(store, batch_id)?;
    if from >= batch.stops.len() || to >= batch.stops.len() {
        return Ok(batch);
    }
    batch.stops.swap(from, to);
    batch.recompute_status();
    persist_batch(store, &batch)?;
    Ok(batch)
}

/// Remove a stop and clear the order's back-reference
///
/// The back-reference is cleared before the batch document is rewritten
/// (same ordering rule as `delete_batch`), then the status is recomputed
/// from the remaining stops.
///
/// # Errors
///
/// * `BatchNotFound` / `StopNotFound`
pub fn remove_stop(store: &dyn RecordStore, batch_id: &str, order_id: &str) -> Result<RouteBatch> {
    let mut batch = load_batch(store, batch_id)?;
    let index = batch
        .stops
        .iter()
        .position(|stop| stop.order_id == order_id)
        .ok_or_else(|| CoreError::StopNotFound {
            batch_id: batch_id.to_string(),
            order_id: order_id.to_string(),
        })?;

    clear_back_reference(store, order_id)?;
    batch.stops.remove(index);
    batch.recompute_status();
    persist_batch(store, &batch)?;

    tracing::debug!(batch_id, order_id, "stop removed");
    Ok(batch)
}

/// Delete a whole batch
///
/// Clears back-references on all remaining stops' orders first, then
/// deletes the batch document. If any clear fails the batch is left in
/// place, so back-references and batch existence never diverge; the full
/// clear set is applied before the delete, never interleaved with it.
///
/// # Errors
///
/// * `BatchNotFound`
pub fn delete_batch(store: &dyn RecordStore, batch_id: &str) -> Result<()> {
    let batch = load_batch(store, batch_id)?;

    for stop in &batch.stops {
        clear_back_reference(store, &stop.order_id)?;
    }
    store.delete(collections::ROUTE_BATCHES, batch_id)?;

    tracing::info!(batch_id, stops = batch.stops.len(), "route batch deleted");
    Ok(())
}

/// Fetch a batch or fail with `BatchNotFound`
pub fn load_batch(store: &dyn RecordStore, batch_id: &str) -> Result<RouteBatch> {
    let doc = store
        .get(collections::ROUTE_BATCHES, batch_id)?
        .ok_or_else(|| CoreError::BatchNotFound {
            batch_id: batch_id.to_string(),
        })?;
    decode_body(&doc)
}

fn persist_batch(store: &dyn RecordStore, batch: &RouteBatch) -> Result<()> {
    let body = encode_body(batch)?;
    let range_key = batch.date.to_string();
    store.put(
        collections::ROUTE_BATCHES,
        &batch.id,
        Some(&range_key),
        &body,
    )
}

/// Null out the order's back-reference; a missing order document means
/// there is nothing to clear.
fn clear_back_reference(store: &dyn RecordStore, order_id: &str) -> Result<()> {
    if let Some(mut doc) = store.get(collections::ORDERS, order_id)? {
        doc.body[ROUTE_BATCH_REF_FIELD] = Value::Null;
        store.put(
            collections::ORDERS,
            &doc.id,
            doc.range_key.as_deref(),
            &doc.body,
        )?;
    }
    Ok(())
}
