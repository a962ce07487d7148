#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use segnale::{EntityId, RawObservation, Segnale};
use segnale_mock::MockStore;

/// Install a fmt subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn id(s: &str) -> EntityId {
    EntityId::new(s).unwrap()
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// `values` on consecutive days starting at `start`.
pub fn daily(start: NaiveDate, values: &[f64]) -> Vec<RawObservation> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| RawObservation::new(start + Days::new(i as u64), *v))
        .collect()
}

/// Engine over a fresh `MockStore` with the default configuration.
pub fn engine() -> (Segnale, Arc<MockStore>) {
    init_tracing();
    let store = Arc::new(MockStore::new());
    let engine = Segnale::builder().store(store.clone()).build().unwrap();
    (engine, store)
}
