use chrono::NaiveDate;
use segnale_core::{EntityId, RawObservation, SegnaleError, Series, SignalKind};

fn obs(y: i32, m: u32, d: u32, v: f64) -> RawObservation {
    RawObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), v)
}

fn acme() -> EntityId {
    EntityId::new("ACME").unwrap()
}

#[test]
fn accepts_strictly_increasing_dates() {
    let s = Series::try_new(
        acme(),
        SignalKind::Price,
        vec![obs(2024, 1, 1, 1.0), obs(2024, 1, 2, 2.0), obs(2024, 1, 5, 3.0)],
    )
    .unwrap();
    assert_eq!(s.len(), 3);
    assert_eq!(s.values(), vec![1.0, 2.0, 3.0]);
    assert_eq!(s.kind(), SignalKind::Price);
    assert_eq!(s.entity().as_str(), "ACME");
}

#[test]
fn accepts_empty_series() {
    let s = Series::try_new(acme(), SignalKind::PublicInterest, Vec::new()).unwrap();
    assert!(s.is_empty());
}

#[test]
fn rejects_duplicate_dates() {
    let err = Series::try_new(
        acme(),
        SignalKind::Price,
        vec![obs(2024, 1, 1, 1.0), obs(2024, 1, 1, 2.0)],
    )
    .unwrap_err();
    assert!(matches!(err, SegnaleError::Data(_)));
}

#[test]
fn rejects_out_of_order_dates() {
    let err = Series::try_new(
        acme(),
        SignalKind::InstitutionalOwnership,
        vec![obs(2024, 3, 31, 1.0), obs(2023, 12, 31, 2.0)],
    )
    .unwrap_err();
    assert!(matches!(err, SegnaleError::Data(_)));
}

#[test]
fn rejects_non_finite_values() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = Series::try_new(
            acme(),
            SignalKind::Price,
            vec![obs(2024, 1, 1, 1.0), obs(2024, 1, 2, bad)],
        )
        .unwrap_err();
        assert!(matches!(err, SegnaleError::Data(_)));
    }
}
