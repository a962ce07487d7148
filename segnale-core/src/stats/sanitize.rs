use crate::stats::quantile::{quantile_sorted, sorted_copy};
use crate::types::WinsorConfig;

/// Clip every value into the `[lower, upper]` percentile band of the whole series.
///
/// The band is computed once over the entire history, so a late extreme value
/// can move the clip bounds seen by earlier points. This is a known look-ahead
/// inconsistency with the otherwise causal rolling estimators and is kept for
/// compatibility with previously persisted scores.
///
/// Values are expected to be finite. An empty input returns an empty vector.
#[must_use]
pub fn winsorize(values: &[f64], bounds: WinsorConfig) -> Vec<f64> {
    let sorted = sorted_copy(values);
    let (Some(lo), Some(hi)) = (
        quantile_sorted(&sorted, bounds.lower),
        quantile_sorted(&sorted, bounds.upper),
    ) else {
        return Vec::new();
    };
    values.iter().map(|v| v.max(lo).min(hi)).collect()
}
