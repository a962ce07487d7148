//! Segnale turns daily, weekly and quarterly signals into comparable z-scores.
//!
//! Overview
//! - Fetches three series per entity from a [`SeriesSource`]: daily price,
//!   weekly public interest and quarterly institutional ownership.
//! - Clips each series to its 1st/99th percentile band, picks a classic
//!   (mean/std) or robust (median/MAD) estimator from its skewness, and
//!   computes trailing rolling z-scores.
//! - Aligns the lower-frequency scores onto the price calendar by forward
//!   fill, nulling values older than a per-signal staleness cap.
//! - Validates the aligned table and replaces the entity's stored rows in one
//!   atomic [`ScoreSink`] call.
//!
//! Key behaviors and trade-offs
//! - Full recompute: every run rebuilds an entity's whole history. There is no
//!   incremental update.
//! - The percentile clip is computed over the entire series, so a late outlier
//!   can change the scores of earlier dates. The rolling estimators themselves
//!   are strictly causal. This look-ahead is a known inconsistency and is kept
//!   for compatibility with previously stored scores.
//! - Forward fill carries the most recent lower-frequency point, even when
//!   that point's own score is null (warmup), until the staleness cap.
//! - Collaborator errors propagate unchanged; the engine never retries.
//!   [`BatchBuilder`] isolates failures per entity.
//!
//! Examples
//! Building an engine and processing one entity:
//! ```rust,ignore
//! use std::sync::Arc;
//! use segnale::{EntityId, Segnale};
//!
//! let store = Arc::new(MyWarehouse::connect("...")?);
//! let engine = Segnale::builder().store(store).build()?;
//!
//! let report = engine.process(&EntityId::new("AAPL")?).await?;
//! println!("{} rows written", report.rows_written);
//! ```
//!
//! Dry run without touching the sink:
//! ```rust,ignore
//! if let Some(scored) = engine.score(&EntityId::new("AAPL")?).await?.scored() {
//!     for issue in &scored.issues {
//!         eprintln!("{}", issue.message);
//!     }
//! }
//! ```
//!
//! Batch over many entities:
//! ```rust,ignore
//! use std::time::Duration;
//!
//! let report = engine
//!     .batch()
//!     .entities(&[EntityId::new("AAPL")?, EntityId::new("MSFT")?])?
//!     .concurrency(8)?
//!     .entity_timeout(Duration::from_secs(30))
//!     .run()
//!     .await?;
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.entity, failure.error);
//! }
//! ```
#![warn(missing_docs)]

mod batch;
pub(crate) mod core;
mod pipeline;

pub use batch::{BatchBuilder, DEFAULT_CONCURRENCY};
pub use core::{Segnale, SegnaleBuilder};
pub use pipeline::{ScoreOutcome, ScoredEntity};

pub use segnale_core::{
    AlignedRow, Normalized, NormalizedPoint, RawObservation, ScoreSink, Series, SeriesSource,
};

// Re-export shared types for convenience
pub use segnale_types::{
    BatchReport, Cadence, EngineConfig, EntityFailure, EntityId, EstimatorChoice, EstimatorKind,
    IssueKind, ProcessReport, RollingWindow, ScoreColumn, SegnaleError, Severity, SignalConfig,
    SignalKind, SkipReason, ValidationConfig, ValidationIssue, WinsorConfig,
};
