mod helpers;

use std::time::Duration;

use helpers::{d, daily, engine, id};
use segnale::{DEFAULT_CONCURRENCY, Segnale, SegnaleError, SignalKind};
use segnale_mock::{DynamicMock, MockBehavior};

#[tokio::test]
async fn failures_are_isolated_per_entity() {
    let (engine, store) = engine();
    let report = engine
        .batch()
        .entities(&[
            id("SYNTH-1"),
            id("FAIL"),
            id("LINEAR"),
            id("FAIL-PERSIST"),
            id("NOPE"),
        ])
        .unwrap()
        .run()
        .await
        .unwrap();

    let ok: Vec<_> = report.reports.iter().map(|r| r.entity.as_str()).collect();
    assert_eq!(ok, vec!["LINEAR", "NOPE", "SYNTH-1"]);
    let failed: Vec<_> = report.failures.iter().map(|f| f.entity.as_str()).collect();
    assert_eq!(failed, vec!["FAIL", "FAIL-PERSIST"]);
    assert!(matches!(report.failures[0].error, SegnaleError::Fetch { .. }));
    assert!(matches!(report.failures[1].error, SegnaleError::Persist { .. }));

    assert!(report.reports[1].skipped.is_some());
    assert_eq!(report.total_rows, 120 + 260);
    assert_eq!(store.stored(&id("LINEAR")).await.len(), 120);
}

#[tokio::test]
async fn single_entity_concurrency_gives_same_result() {
    let (engine, _) = engine();
    let entities = [id("LINEAR"), id("SYNTH-3"), id("SYNTH-4")];
    let serial = engine
        .batch()
        .entities(&entities)
        .unwrap()
        .concurrency(1)
        .unwrap()
        .run()
        .await
        .unwrap();
    let parallel = engine
        .batch()
        .entities(&entities)
        .unwrap()
        .concurrency(8)
        .unwrap()
        .run()
        .await
        .unwrap();
    assert_eq!(serial, parallel);
}

#[tokio::test]
async fn hanging_entity_times_out_without_blocking_others() {
    let (mock, controller) = DynamicMock::new_with_controller("dyn");
    let engine = Segnale::builder().store(mock).build().unwrap();
    let values: Vec<f64> = (0..20).map(f64::from).collect();
    controller
        .set_series_behavior(
            id("GOOD"),
            SignalKind::Price,
            MockBehavior::Return(daily(d(2024, 1, 1), &values)),
        )
        .await;
    controller
        .set_series_behavior(id("SLOW"), SignalKind::PublicInterest, MockBehavior::Hang)
        .await;
    controller
        .set_sink_behavior(id("STUCK"), MockBehavior::Hang)
        .await;
    controller
        .set_series_behavior(
            id("STUCK"),
            SignalKind::Price,
            MockBehavior::Return(daily(d(2024, 1, 1), &values)),
        )
        .await;

    let report = engine
        .batch()
        .entities(&[id("SLOW"), id("GOOD"), id("STUCK")])
        .unwrap()
        .entity_timeout(Duration::from_millis(100))
        .run()
        .await
        .unwrap();

    assert_eq!(report.reports.len(), 1);
    assert_eq!(report.reports[0].entity, id("GOOD"));
    assert_eq!(report.reports[0].rows_written, 20);
    assert_eq!(report.failures.len(), 2);
    for failure in &report.failures {
        assert_eq!(
            failure.error,
            SegnaleError::entity_timeout(failure.entity.as_str())
        );
    }
    assert_eq!(controller.persisted(&id("STUCK")).await, None);
}

#[test]
fn duplicate_entities_are_rejected() {
    let (engine, _) = engine();
    let err = engine
        .batch()
        .entities(&[id("A"), id("B"), id("A")])
        .err()
        .unwrap();
    assert!(matches!(err, SegnaleError::InvalidArg(_)));

    let err = engine
        .batch()
        .add_entity(id("A"))
        .unwrap()
        .add_entity(id("A"))
        .err()
        .unwrap();
    assert!(matches!(err, SegnaleError::InvalidArg(_)));
}

#[test]
fn zero_concurrency_is_rejected() {
    let (engine, _) = engine();
    assert_eq!(DEFAULT_CONCURRENCY, 4);
    assert!(matches!(
        engine.batch().concurrency(0).err().unwrap(),
        SegnaleError::InvalidArg(_)
    ));
}

#[tokio::test]
async fn empty_batch_is_an_error() {
    let (engine, _) = engine();
    let err = engine.batch().run().await.unwrap_err();
    assert!(matches!(err, SegnaleError::InvalidArg(_)));
}
