//! Commission ledger scenario tests

use chrono::NaiveDate;
use rutero_core::errors::CoreError;
use rutero_core::model::commission::RECOGNIZED_AGENTS;
use rutero_core::ops::{commission_ops, route_ops};
use rutero_core::store::MemoryStore;
use rutero_core_types::Period;

mod common;
use common::seed_order;

fn period() -> Period {
    "2024-03".parse().unwrap()
}

/// Seed one order and assign it to a batch on `date` for `responsible`
fn seed_batch(store: &MemoryStore, order_id: &str, responsible: &str, date: NaiveDate, total: f64) {
    seed_order(store, order_id, "cliente", total);
    route_ops::create_batch(store, date, responsible, &[order_id.to_string()]).unwrap();
}

#[test]
fn test_compute_monthly_sums_stop_amounts_per_agent() {
    let store = MemoryStore::new();
    let march_5 = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let march_20 = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    seed_batch(&store, "o1", "Guille", march_5, 100_000.0);
    seed_batch(&store, "o2", "Guille", march_20, 50_000.0);
    seed_batch(&store, "o3", "Matias", march_5, 30_000.0);

    commission_ops::compute_monthly(&store, period()).unwrap();

    let guille = commission_ops::get_record(&store, "Guille", period()).unwrap();
    assert_eq!(guille.total_routed, 150_000.0);
    assert_eq!(guille.percentage, 4.0);
    assert_eq!(guille.commission_amount, 6_000.0);
    assert_eq!(guille.batch_count, 2);

    let matias = commission_ops::get_record(&store, "Matias", period()).unwrap();
    assert_eq!(matias.total_routed, 30_000.0);
    assert_eq!(matias.batch_count, 1);
}

#[test]
fn test_compute_monthly_writes_zero_records_for_idle_agents() {
    let store = MemoryStore::new();
    seed_batch(
        &store,
        "o1",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        10_000.0,
    );

    let records = commission_ops::compute_monthly(&store, period()).unwrap();

    // One record per recognized agent, zero-valued ones included.
    assert_eq!(records.len(), RECOGNIZED_AGENTS.len());
    let ruben = commission_ops::get_record(&store, "Ruben", period()).unwrap();
    assert_eq!(ruben.total_routed, 0.0);
    assert_eq!(ruben.commission_amount, 0.0);
    assert_eq!(ruben.batch_count, 0);
}

#[test]
fn test_compute_monthly_respects_month_bounds() {
    let store = MemoryStore::new();
    seed_batch(
        &store,
        "feb",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        1_000.0,
    );
    seed_batch(
        &store,
        "first",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        2_000.0,
    );
    seed_batch(
        &store,
        "last",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        3_000.0,
    );
    seed_batch(
        &store,
        "apr",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        4_000.0,
    );

    commission_ops::compute_monthly(&store, period()).unwrap();

    let record = commission_ops::get_record(&store, "Guille", period()).unwrap();
    assert_eq!(record.total_routed, 5_000.0);
    assert_eq!(record.batch_count, 2);
}

#[test]
fn test_unrecognized_sheet_contributes_nothing() {
    let store = MemoryStore::new();
    let march_5 = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    seed_batch(&store, "o1", "Guille", march_5, 10_000.0);
    seed_batch(&store, "o2", "Temporal Worker", march_5, 999_999.0);

    let records = commission_ops::compute_monthly(&store, period()).unwrap();

    assert_eq!(records.len(), RECOGNIZED_AGENTS.len());
    assert!(records.iter().all(|r| r.agent != "Temporal Worker"));
    let total: f64 = records.iter().map(|r| r.total_routed).sum();
    assert_eq!(total, 10_000.0);
}

#[test]
fn test_recomputation_replaces_instead_of_accumulating() {
    let store = MemoryStore::new();
    seed_batch(
        &store,
        "o1",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        100_000.0,
    );

    let first = commission_ops::compute_monthly(&store, period()).unwrap();
    let second = commission_ops::compute_monthly(&store, period()).unwrap();

    // Identical modulo the refresh timestamp.
    for (a, b) in first.iter().zip(second.iter()) {
        let mut a = serde_json::to_value(a).unwrap();
        let mut b = serde_json::to_value(b).unwrap();
        a.as_object_mut().unwrap().remove("updatedAt");
        b.as_object_mut().unwrap().remove("updatedAt");
        assert_eq!(a, b);
    }

    let record = commission_ops::get_record(&store, "Guille", period()).unwrap();
    assert_eq!(record.total_routed, 100_000.0);
}

#[test]
fn test_recomputation_picks_up_sheet_changes() {
    let store = MemoryStore::new();
    let batch_date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    seed_order(&store, "o1", "cliente", 40_000.0);
    seed_order(&store, "o2", "cliente", 60_000.0);
    let batch =
        route_ops::create_batch(&store, batch_date, "Guille", &["o1".into(), "o2".into()])
            .unwrap();

    commission_ops::compute_monthly(&store, period()).unwrap();
    assert_eq!(
        commission_ops::get_record(&store, "Guille", period())
            .unwrap()
            .total_routed,
        100_000.0
    );

    // A stop is dropped from the sheet; the next run must re-sum, not reuse.
    route_ops::remove_stop(&store, &batch.id, "o2").unwrap();
    commission_ops::compute_monthly(&store, period()).unwrap();

    let record = commission_ops::get_record(&store, "Guille", period()).unwrap();
    assert_eq!(record.total_routed, 40_000.0);
    assert_eq!(record.commission_amount, 1_600.0);
}

#[test]
fn test_get_record_synthesizes_zero_for_uncomputed_period() {
    let store = MemoryStore::new();
    let record = commission_ops::get_record(&store, "Matias", period()).unwrap();
    assert_eq!(record.agent, "Matias");
    assert_eq!(record.total_routed, 0.0);
    assert_eq!(record.batch_count, 0);
}

#[test]
fn test_unrecognized_agent_is_rejected_on_reads() {
    let store = MemoryStore::new();
    let err = commission_ops::get_record(&store, "guille", period()).unwrap_err();
    assert!(matches!(err, CoreError::UnrecognizedAgent { .. }));

    let err = commission_ops::list_records(&store, "Nobody").unwrap_err();
    assert!(matches!(err, CoreError::UnrecognizedAgent { .. }));
}

#[test]
fn test_list_records_is_newest_first_and_per_agent() {
    let store = MemoryStore::new();
    seed_batch(
        &store,
        "jan",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        1_000.0,
    );
    seed_batch(
        &store,
        "mar",
        "Guille",
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        2_000.0,
    );
    commission_ops::compute_monthly(&store, "2024-01".parse().unwrap()).unwrap();
    commission_ops::compute_monthly(&store, "2024-03".parse().unwrap()).unwrap();

    let records = commission_ops::list_records(&store, "Guille").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].period.to_string(), "2024-03");
    assert_eq!(records[1].period.to_string(), "2024-01");
    assert!(records.iter().all(|r| r.agent == "Guille"));
}

#[test]
fn test_malformed_period_fails_at_parse() {
    assert!("2024-13".parse::<Period>().is_err());
    assert!("2024/03".parse::<Period>().is_err());
    assert!("not-a-period".parse::<Period>().is_err());
}
