//! Statistics used to turn raw series into z-scores.
//!
//! Modules include:
//! - `quantile`: sorted-slice quantiles and medians
//! - `sanitize`: global winsorizing clip applied before estimation
//! - `skew`: sample skewness and the classic/robust decision
//! - `estimator`: rolling classic and robust (MAD) z-score strategies
/// Rolling z-score strategies.
pub mod estimator;
/// Quantile and median helpers.
pub mod quantile;
/// Percentile clipping of whole series.
pub mod sanitize;
/// Skewness classification.
pub mod skew;
