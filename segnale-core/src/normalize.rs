use crate::stats::estimator::{Estimator, WindowEstimator, rolling_zscores};
use crate::stats::sanitize::winsorize;
use crate::types::{EngineConfig, EstimatorKind, NormalizedPoint, Series, SignalKind};

/// One normalized series: its z-scores and the strategy that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Signal the scores belong to.
    pub kind: SignalKind,
    /// Strategy used for the whole series; `None` when the series was empty.
    pub estimator: Option<EstimatorKind>,
    /// One point per source observation, same order.
    pub points: Vec<NormalizedPoint>,
}

impl Normalized {
    /// An empty result for `kind`.
    #[must_use]
    pub const fn empty(kind: SignalKind) -> Self {
        Self {
            kind,
            estimator: None,
            points: Vec::new(),
        }
    }

    /// Number of non-null scores.
    #[must_use]
    pub fn scored(&self) -> usize {
        self.points.iter().filter(|p| p.z.is_some()).count()
    }
}

/// Sanitize, classify and estimate one series.
///
/// The percentile clip is computed over the whole series before the causal
/// rolling pass, so a late outlier can shift the clipped values (and the
/// scores) of earlier dates. This look-ahead is kept deliberately for
/// compatibility with previously persisted scores; see [`winsorize`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "segnale_core::normalize_series",
        skip(series, cfg),
        fields(entity = %series.entity(), kind = %series.kind(), len = series.len()),
    )
)]
#[must_use]
pub fn normalize_series(series: &Series, cfg: &EngineConfig) -> Normalized {
    if series.is_empty() {
        return Normalized::empty(series.kind());
    }
    let signal = cfg.signal(series.kind());
    let sanitized = winsorize(&series.values(), cfg.winsor);
    let estimator = Estimator::select(&sanitized, cfg.skew_threshold, cfg.mad_scale);
    let scores = rolling_zscores(&sanitized, signal.window, &estimator);

    let points: Vec<NormalizedPoint> = series
        .dates()
        .zip(scores)
        .map(|(date, z)| NormalizedPoint { date, z })
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        estimator = ?estimator.kind(),
        scored = points.iter().filter(|p| p.z.is_some()).count(),
        "normalized series"
    );

    Normalized {
        kind: series.kind(),
        estimator: Some(estimator.kind()),
        points,
    }
}
