//! Whole-document last-write-wins behavior
//!
//! Stop mutations read the batch document, mutate in memory, and write the
//! whole document back. Two writers racing on the same batch therefore lose
//! the earlier write. This is accepted behavior for a single-operator tool;
//! these tests pin it down so a future conditional-write change is a
//! deliberate one.

use chrono::NaiveDate;
use rutero_core::ops::route_ops;
use rutero_core::store::{collections, decode_body, encode_body, MemoryStore, RecordStore};
use rutero_core::{RouteBatch, RouteStatus};

mod common;
use common::seed_order;

fn setup() -> (MemoryStore, RouteBatch) {
    let store = MemoryStore::new();
    for id in ["o1", "o2"] {
        seed_order(&store, id, "cliente", 100.0);
    }
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let batch =
        route_ops::create_batch(&store, date, "Guille", &["o1".into(), "o2".into()]).unwrap();
    (store, batch)
}

fn persisted(store: &MemoryStore, batch_id: &str) -> RouteBatch {
    let doc = store
        .get(collections::ROUTE_BATCHES, batch_id)
        .unwrap()
        .unwrap();
    decode_body(&doc).unwrap()
}

#[test]
fn test_concurrent_toggles_last_write_wins() {
    let (store, batch) = setup();

    // Writer B reads the batch before writer A's toggle lands.
    let mut stale: RouteBatch = persisted(&store, &batch.id);

    // Writer A toggles stop o1 through the engine.
    route_ops::toggle_delivered(&store, &batch.id, "o1").unwrap();

    // Writer B toggles stop o2 on its stale copy and writes the whole
    // document back, exactly as a second process would.
    stale.stops[1].delivered = true;
    store
        .put(
            collections::ROUTE_BATCHES,
            &batch.id,
            Some(&batch.date.to_string()),
            &encode_body(&stale).unwrap(),
        )
        .unwrap();

    // Writer A's change to o1 is lost.
    let after = persisted(&store, &batch.id);
    assert!(!after.stops[0].delivered);
    assert!(after.stops[1].delivered);
}

#[test]
fn test_next_engine_write_recomputes_from_the_surviving_state() {
    let (store, batch) = setup();

    let mut stale: RouteBatch = persisted(&store, &batch.id);
    route_ops::toggle_delivered(&store, &batch.id, "o1").unwrap();
    stale.stops[1].delivered = true;
    store
        .put(
            collections::ROUTE_BATCHES,
            &batch.id,
            Some(&batch.date.to_string()),
            &encode_body(&stale).unwrap(),
        )
        .unwrap();

    // The next engine toggle operates on the surviving document, so o1
    // flips from undelivered and the derived status lands correctly.
    let updated = route_ops::toggle_delivered(&store, &batch.id, "o1").unwrap();
    assert!(updated.stops.iter().all(|s| s.delivered));
    assert_eq!(persisted(&store, &batch.id).status(), RouteStatus::Complete);
}
