//! Rolling z-score strategies.
//!
//! Both strategies look only at the trailing window ending at the scored
//! position; nothing after position `i` ever influences the score at `i`.

use crate::stats::quantile::median;
use crate::stats::skew::is_skewed;
use crate::types::{EstimatorKind, RollingWindow};

/// Strategy interface: score the last value of a trailing window.
pub trait WindowEstimator {
    /// Which strategy this is.
    fn kind(&self) -> EstimatorKind;

    /// Score `current` against `window`, whose last element is `current`.
    ///
    /// Returns `None` when the window has no usable spread.
    fn score(&self, window: &[f64], current: f64) -> Option<f64>;
}

/// Mean / sample standard deviation z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassicEstimator;

impl WindowEstimator for ClassicEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Classic
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, window: &[f64], current: f64) -> Option<f64> {
        let n = window.len();
        if n < 2 {
            return None;
        }
        // constant windows can leave rounding residue in the mean
        let first = window[0];
        if window.iter().all(|v| *v == first) {
            return None;
        }
        let nf = n as f64;
        let mean = window.iter().sum::<f64>() / nf;
        let ss = window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
        let std = (ss / (nf - 1.0)).sqrt();
        if std == 0.0 || !std.is_finite() {
            return None;
        }
        Some((current - mean) / std)
    }
}

/// Median / scaled MAD z-score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustEstimator {
    scale: f64,
}

impl RobustEstimator {
    /// Consistency constant making the MAD estimate a normal standard deviation.
    pub const NORMAL_CONSISTENCY: f64 = 1.4826;

    /// Build a robust estimator with the given MAD scale.
    #[must_use]
    pub const fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// The MAD scale factor.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for RobustEstimator {
    fn default() -> Self {
        Self::new(Self::NORMAL_CONSISTENCY)
    }
}

impl WindowEstimator for RobustEstimator {
    fn kind(&self) -> EstimatorKind {
        EstimatorKind::Robust
    }

    fn score(&self, window: &[f64], current: f64) -> Option<f64> {
        let center = median(window)?;
        let deviations: Vec<f64> = window.iter().map(|v| (v - center).abs()).collect();
        let spread = self.scale * median(&deviations)?;
        if spread == 0.0 || !spread.is_finite() {
            return None;
        }
        Some((current - center) / spread)
    }
}

/// The strategy picked for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    /// Mean / standard deviation.
    Classic(ClassicEstimator),
    /// Median / MAD.
    Robust(RobustEstimator),
}

impl Estimator {
    /// Pick the strategy for an already sanitized series.
    ///
    /// Skewed series get the robust estimator, everything else the classic one.
    #[must_use]
    pub fn select(sanitized: &[f64], skew_threshold: f64, mad_scale: f64) -> Self {
        if is_skewed(sanitized, skew_threshold) {
            Self::Robust(RobustEstimator::new(mad_scale))
        } else {
            Self::Classic(ClassicEstimator)
        }
    }
}

impl WindowEstimator for Estimator {
    fn kind(&self) -> EstimatorKind {
        match self {
            Self::Classic(e) => e.kind(),
            Self::Robust(e) => e.kind(),
        }
    }

    fn score(&self, window: &[f64], current: f64) -> Option<f64> {
        match self {
            Self::Classic(e) => e.score(window, current),
            Self::Robust(e) => e.score(window, current),
        }
    }
}

/// Score every position of `values` against its trailing window.
///
/// Position `i` uses `values[i + 1 - size ..= i]` (clipped at the start).
/// Positions whose window holds fewer than `min_periods` values score `None`.
/// The output has the same length and order as `values`.
#[must_use]
pub fn rolling_zscores<E>(
    values: &[f64],
    window: RollingWindow,
    estimator: &E,
) -> Vec<Option<f64>>
where
    E: WindowEstimator + ?Sized,
{
    let size = window.size.max(1);
    let min_periods = window.min_periods.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, &current)| {
            let start = (i + 1).saturating_sub(size);
            let trailing = &values[start..=i];
            if trailing.len() < min_periods {
                None
            } else {
                estimator.score(trailing, current)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_scores_last_value_of_window() {
        let z = ClassicEstimator.score(&[1.0, 2.0, 3.0], 3.0).unwrap();
        // mean 2, sample std 1
        assert!((z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn classic_single_value_has_no_spread() {
        assert_eq!(ClassicEstimator.score(&[4.0], 4.0), None);
    }

    #[test]
    fn robust_uses_scaled_mad() {
        // median 12, |x - 12| = [88, 1, 0], MAD 1
        let z = RobustEstimator::default()
            .score(&[100.0, 11.0, 12.0], 12.0)
            .unwrap();
        assert!(z.abs() < 1e-12);

        let z = RobustEstimator::default()
            .score(&[11.0, 12.0, 100.0], 100.0)
            .unwrap();
        assert!((z - 88.0 / 1.4826).abs() < 1e-9);
    }

    #[test]
    fn robust_zero_mad_is_null() {
        assert_eq!(
            RobustEstimator::default().score(&[10.0, 10.0, 10.0, 100.0], 100.0),
            None
        );
    }

    #[test]
    fn select_follows_skew() {
        let flat: Vec<f64> = (0..20).map(f64::from).collect();
        assert_eq!(
            Estimator::select(&flat, 1.5, 1.4826).kind(),
            EstimatorKind::Classic
        );

        let mut lumpy = vec![0.0; 90];
        lumpy.extend(std::iter::repeat_n(100.0, 10));
        assert_eq!(
            Estimator::select(&lumpy, 1.5, 1.4826).kind(),
            EstimatorKind::Robust
        );
    }
}
