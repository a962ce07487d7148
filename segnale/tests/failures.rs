mod helpers;

use chrono::NaiveDate;
use helpers::{d, daily, engine, id};
use rust_decimal::Decimal;
use segnale::{Segnale, SegnaleError, SignalKind, SkipReason};
use segnale_mock::{DynamicMock, MockBehavior, StoredRow};

fn old_rows() -> Vec<StoredRow> {
    vec![StoredRow {
        date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        price_z: Some(Decimal::new(1500, 3)),
        institutional_z: None,
        retail_z: None,
    }]
}

#[tokio::test]
async fn fetch_failure_propagates_and_keeps_rows() {
    let (engine, store) = engine();
    store.seed_rows(id("FAIL"), old_rows()).await;

    let err = engine.process(&id("FAIL")).await.unwrap_err();
    assert!(matches!(err, SegnaleError::Fetch { .. }));
    assert_eq!(store.replace_calls(), 0);
    assert_eq!(store.stored(&id("FAIL")).await, old_rows());
}

#[tokio::test]
async fn persist_failure_propagates_and_keeps_rows() {
    let (engine, store) = engine();
    store.seed_rows(id("FAIL-PERSIST"), old_rows()).await;

    let err = engine.process(&id("FAIL-PERSIST")).await.unwrap_err();
    assert!(matches!(err, SegnaleError::Persist { .. }));
    assert_eq!(store.replace_calls(), 1);
    assert_eq!(store.stored(&id("FAIL-PERSIST")).await, old_rows());
}

#[tokio::test]
async fn short_price_series_is_skipped_without_persisting() {
    let (engine, store) = engine();
    let values: Vec<f64> = (0..13).map(f64::from).collect();
    store
        .insert_series(id("SHORT"), SignalKind::Price, daily(d(2024, 1, 1), &values))
        .await;
    store.seed_rows(id("SHORT"), old_rows()).await;

    let report = engine.process(&id("SHORT")).await.unwrap();
    assert_eq!(report.rows_written, 0);
    assert_eq!(
        report.skipped,
        Some(SkipReason::InsufficientData {
            observations: 13,
            required: 14
        })
    );
    assert_eq!(store.replace_calls(), 0);
    assert_eq!(store.stored(&id("SHORT")).await, old_rows());
}

#[tokio::test]
async fn minimum_length_price_series_is_processed() {
    let (engine, store) = engine();
    let values: Vec<f64> = (0..14).map(f64::from).collect();
    store
        .insert_series(id("EDGE"), SignalKind::Price, daily(d(2024, 1, 1), &values))
        .await;

    let report = engine.process(&id("EDGE")).await.unwrap();
    assert_eq!(report.rows_written, 14);
    let stored = store.stored(&id("EDGE")).await;
    assert!(stored[13].price_z.is_some());
}

#[tokio::test]
async fn unknown_entity_is_insufficient_data() {
    let (engine, _) = engine();
    let outcome = engine.score(&id("NOBODY")).await.unwrap();
    assert!(outcome.scored().is_none());
}

#[tokio::test]
async fn secondary_signal_failure_propagates_unchanged() {
    let (mock, controller) = DynamicMock::new_with_controller("dyn");
    let engine = Segnale::builder().store(mock).build().unwrap();
    let values: Vec<f64> = (0..30).map(f64::from).collect();
    controller
        .set_series_behavior(
            id("ACME"),
            SignalKind::Price,
            MockBehavior::Return(daily(d(2024, 1, 1), &values)),
        )
        .await;
    let boom = SegnaleError::fetch("dyn", "holdings endpoint down");
    controller
        .set_series_behavior(
            id("ACME"),
            SignalKind::InstitutionalOwnership,
            MockBehavior::Fail(boom.clone()),
        )
        .await;

    let err = engine.process(&id("ACME")).await.unwrap_err();
    assert_eq!(err, boom);
    assert_eq!(controller.persisted(&id("ACME")).await, None);
}

#[tokio::test]
async fn unordered_source_data_is_a_data_error() {
    let (mock, controller) = DynamicMock::new_with_controller("dyn");
    let engine = Segnale::builder().store(mock).build().unwrap();
    let mut obs = daily(d(2024, 1, 1), &[1.0; 20]);
    obs.swap(3, 4);
    controller
        .set_series_behavior(id("ACME"), SignalKind::Price, MockBehavior::Return(obs))
        .await;

    let err = engine.process(&id("ACME")).await.unwrap_err();
    assert!(matches!(err, SegnaleError::Data(_)));
    assert_eq!(controller.persisted(&id("ACME")).await, None);
}

#[tokio::test]
async fn sink_failure_from_dynamic_mock_propagates() {
    let (mock, controller) = DynamicMock::new_with_controller("dyn");
    let engine = Segnale::builder().store(mock).build().unwrap();
    let values: Vec<f64> = (0..30).map(f64::from).collect();
    controller
        .set_series_behavior(
            id("ACME"),
            SignalKind::Price,
            MockBehavior::Return(daily(d(2024, 1, 1), &values)),
        )
        .await;
    let err = SegnaleError::persist("dyn", "constraint violation");
    controller
        .set_sink_behavior(id("ACME"), MockBehavior::Fail(err.clone()))
        .await;

    assert_eq!(engine.process(&id("ACME")).await.unwrap_err(), err);
}
