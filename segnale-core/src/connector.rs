use async_trait::async_trait;

use crate::types::{AlignedRow, EntityId, RawObservation, SegnaleError, SignalKind};

/// Role trait for collaborators that deliver raw observations.
///
/// Implementations are expected to return observations with strictly
/// increasing, unique dates. An entity with no data for a signal yields an
/// empty vector rather than an error.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Short, stable name used to tag errors and log fields.
    fn name(&self) -> &'static str;

    /// Fetch the full history of `kind` for `entity`.
    async fn series(
        &self,
        entity: &EntityId,
        kind: SignalKind,
    ) -> Result<Vec<RawObservation>, SegnaleError>;
}

/// Role trait for collaborators that persist aligned scores.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    /// Short, stable name used to tag errors and log fields.
    fn name(&self) -> &'static str;

    /// Replace every stored row of `entity` with `rows`.
    ///
    /// The delete and the insert must be a single atomic operation: on error
    /// the previously stored rows stay untouched, and no reader may observe a
    /// mix of old and new rows.
    async fn replace_scores(
        &self,
        entity: &EntityId,
        rows: Vec<AlignedRow>,
    ) -> Result<(), SegnaleError>;
}
