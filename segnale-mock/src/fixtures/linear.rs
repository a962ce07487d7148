//! Hand-checkable fixture.
//!
//! - price: 120 consecutive days from 2023-12-15 valued 100, 101, ..., 219
//! - public interest: Mondays from 2023-10-02 to 2024-04-08
//! - institutional ownership: 60 at 2023-09-30 and 65 at 2023-12-31
use chrono::{Days, NaiveDate};
use segnale_core::{RawObservation, SignalKind};

/// Number of daily price observations.
pub const PRICE_DAYS: u64 = 120;

/// First price date.
#[must_use]
pub fn price_start() -> NaiveDate {
    ymd(2023, 12, 15)
}

/// Observations of `LINEAR` for `kind`.
#[must_use]
pub fn series(kind: SignalKind) -> Vec<RawObservation> {
    match kind {
        SignalKind::Price => (0..PRICE_DAYS)
            .map(|i| RawObservation::new(price_start() + Days::new(i), 100.0 + i as f64))
            .collect(),
        SignalKind::PublicInterest => {
            let last = ymd(2024, 4, 8);
            ymd(2023, 10, 2)
                .iter_weeks()
                .take_while(|d| *d <= last)
                .enumerate()
                .map(|(i, date)| RawObservation::new(date, 40.0 + ((i * 7) % 13) as f64))
                .collect()
        }
        SignalKind::InstitutionalOwnership => vec![
            RawObservation::new(ymd(2023, 9, 30), 60.0),
            RawObservation::new(ymd(2023, 12, 31), 65.0),
        ],
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}
