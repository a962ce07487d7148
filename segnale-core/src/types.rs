//! Data model shared by the engine, plus re-exports of `segnale-types`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use segnale_types::{
    BatchReport, Cadence, EngineConfig, EntityFailure, EntityId, EstimatorChoice, EstimatorKind,
    IssueKind, ProcessReport, RollingWindow, ScoreColumn, SegnaleError, Severity, SignalConfig,
    SignalKind, SkipReason, ValidationConfig, ValidationIssue, WinsorConfig,
};

/// A single raw value as delivered by a [`SeriesSource`](crate::SeriesSource).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

impl RawObservation {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered observations of one signal for one entity.
///
/// Invariants (checked by [`Series::try_new`]): dates strictly increase and
/// every value is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    entity: EntityId,
    kind: SignalKind,
    observations: Vec<RawObservation>,
}

impl Series {
    /// Build a series, verifying the ordering and finiteness invariants.
    ///
    /// # Errors
    /// Returns `Data` if two observations are out of order or share a date,
    /// or if any value is NaN or infinite.
    pub fn try_new(
        entity: EntityId,
        kind: SignalKind,
        observations: Vec<RawObservation>,
    ) -> Result<Self, SegnaleError> {
        if let Some(bad) = observations.iter().find(|o| !o.value.is_finite()) {
            return Err(SegnaleError::Data(format!(
                "{kind} series for {entity} has a non-finite value on {}",
                bad.date
            )));
        }
        if let Some(w) = observations.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(SegnaleError::Data(format!(
                "{kind} series for {entity} is not strictly increasing: {} then {}",
                w[0].date, w[1].date
            )));
        }
        Ok(Self {
            entity,
            kind,
            observations,
        })
    }

    /// Entity the series belongs to.
    #[must_use]
    pub const fn entity(&self) -> &EntityId {
        &self.entity
    }

    /// Signal carried by the series.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Observations in chronological order.
    #[must_use]
    pub fn observations(&self) -> &[RawObservation] {
        &self.observations
    }

    /// Observation dates in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|o| o.date)
    }

    /// Observed values in chronological order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// A z-score (or its absence) at one observation date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Date of the source observation.
    pub date: NaiveDate,
    /// Score, `None` during warmup or for a degenerate window.
    pub z: Option<f64>,
}

/// One persisted row: the three scores of an entity on a price-calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// Entity the row belongs to.
    pub entity: EntityId,
    /// Price-calendar date.
    pub date: NaiveDate,
    /// Price z-score.
    pub price_z: Option<f64>,
    /// Institutional-ownership z-score, forward-filled within its staleness cap.
    pub institutional_z: Option<f64>,
    /// Public-interest z-score, forward-filled within its staleness cap.
    pub retail_z: Option<f64>,
}

impl AlignedRow {
    /// Score stored in `column`.
    #[must_use]
    pub const fn get(&self, column: ScoreColumn) -> Option<f64> {
        match column {
            ScoreColumn::Price => self.price_z,
            ScoreColumn::Institutional => self.institutional_z,
            ScoreColumn::Retail => self.retail_z,
        }
    }
}
