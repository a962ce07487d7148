use chrono::NaiveDate;

use crate::normalize::Normalized;
use crate::types::{AlignedRow, EngineConfig, EntityId, NormalizedPoint};

/// Align `points` onto `calendar` by staleness-capped forward fill.
///
/// Both inputs must be sorted by date. For each calendar day the most recent
/// point dated at or before that day is carried, including its null score.
/// The carried value becomes null once the day is more than
/// `max_staleness_days` calendar days after the point's date. Days before the
/// first point are null; nothing is back-filled.
///
/// The output has exactly one entry per calendar day.
#[must_use]
pub fn align_to_calendar(
    calendar: &[NaiveDate],
    points: &[NormalizedPoint],
    max_staleness_days: Option<u32>,
) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(calendar.len());
    let mut next = 0usize;
    let mut last: Option<&NormalizedPoint> = None;

    for &day in calendar {
        while next < points.len() && points[next].date <= day {
            last = Some(&points[next]);
            next += 1;
        }
        let value = last.and_then(|p| {
            let age = (day - p.date).num_days();
            match max_staleness_days {
                Some(cap) if age > i64::from(cap) => None,
                _ => p.z,
            }
        });
        out.push(value);
    }
    out
}

/// Assemble the persisted table for one entity.
///
/// The price series defines the calendar; the public-interest and
/// institutional-ownership scores are aligned onto it independently, each with
/// its own staleness cap from `cfg`.
#[must_use]
pub fn build_aligned_rows(
    entity: &EntityId,
    price: &Normalized,
    interest: &Normalized,
    holdings: &Normalized,
    cfg: &EngineConfig,
) -> Vec<AlignedRow> {
    let calendar: Vec<NaiveDate> = price.points.iter().map(|p| p.date).collect();
    let retail = align_to_calendar(
        &calendar,
        &interest.points,
        cfg.public_interest.max_staleness_days,
    );
    let institutional = align_to_calendar(
        &calendar,
        &holdings.points,
        cfg.institutional.max_staleness_days,
    );

    price
        .points
        .iter()
        .zip(institutional)
        .zip(retail)
        .map(|((p, institutional_z), retail_z)| AlignedRow {
            entity: entity.clone(),
            date: p.date,
            price_z: p.z,
            institutional_z,
            retail_z,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn pt(date: NaiveDate, z: Option<f64>) -> NormalizedPoint {
        NormalizedPoint { date, z }
    }

    #[test]
    fn no_backfill_before_first_point() {
        let cal = [d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)];
        let out = align_to_calendar(&cal, &[pt(d(2024, 1, 2), Some(1.5))], None);
        assert_eq!(out, vec![None, Some(1.5), Some(1.5)]);
    }

    #[test]
    fn weekly_cap_is_inclusive() {
        let start = d(2024, 1, 1);
        let cal: Vec<NaiveDate> = (0..=8).map(|i| start + chrono::Days::new(i)).collect();
        let out = align_to_calendar(&cal, &[pt(start, Some(-0.7))], Some(7));
        assert_eq!(out[7], Some(-0.7));
        assert_eq!(out[8], None);
    }

    #[test]
    fn newer_null_point_replaces_older_score() {
        let cal = [d(2024, 1, 1), d(2024, 1, 8), d(2024, 1, 9)];
        let pts = [pt(d(2024, 1, 1), Some(2.0)), pt(d(2024, 1, 8), None)];
        let out = align_to_calendar(&cal, &pts, Some(7));
        assert_eq!(out, vec![Some(2.0), None, None]);
    }

    #[test]
    fn points_between_calendar_days_are_picked_up() {
        // weekend points land on the next trading day
        let cal = [d(2024, 1, 5), d(2024, 1, 8)];
        let pts = [pt(d(2024, 1, 6), Some(0.3)), pt(d(2024, 1, 7), Some(0.4))];
        let out = align_to_calendar(&cal, &pts, Some(7));
        assert_eq!(out, vec![None, Some(0.4)]);
    }

    #[test]
    fn empty_points_yield_all_null() {
        let cal = [d(2024, 1, 1), d(2024, 1, 2)];
        assert_eq!(align_to_calendar(&cal, &[], Some(95)), vec![None, None]);
    }
}
