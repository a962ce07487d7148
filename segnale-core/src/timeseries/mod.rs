//! Time-series utilities shared by the orchestrator.
//!
//! - `align`: reindex lower-frequency scores onto the daily price calendar
/// Staleness-capped forward fill and aligned row assembly.
pub mod align;
