//! segnale-core
//!
//! Core types, traits, and statistics shared across the segnale workspace.
//!
//! - `types`: the data model (raw observations, series, normalized points, aligned rows).
//! - `connector`: the `SeriesSource` and `ScoreSink` collaborator traits.
//! - `stats`: outlier sanitizing, skew classification, and rolling z-score estimators.
//! - `timeseries`: frequency-aware alignment onto the daily price calendar.
//! - `validate`: diagnostics over an aligned score table.
//!
//! Everything outside `connector` is pure and synchronous; the collaborator
//! traits are async so that I/O-bound sources and sinks can be plugged in
//! without blocking the runtime.
#![warn(missing_docs)]

/// Collaborator traits for fetching raw series and persisting scores.
pub mod connector;
/// Sanitize → classify → estimate for a single series.
pub mod normalize;
/// Robust statistics: quantiles, winsorizing, skewness, rolling estimators.
pub mod stats;
/// Calendar alignment with staleness-capped forward fill.
pub mod timeseries;
pub mod types;
/// Quality checks over aligned score tables.
pub mod validate;

pub use connector::{ScoreSink, SeriesSource};
pub use normalize::{Normalized, normalize_series};
pub use stats::estimator::{
    ClassicEstimator, Estimator, RobustEstimator, WindowEstimator, rolling_zscores,
};
pub use stats::sanitize::winsorize;
pub use stats::skew::{is_skewed, sample_skewness};
pub use timeseries::align::{align_to_calendar, build_aligned_rows};
pub use types::*;
pub use validate::validate_scores;
