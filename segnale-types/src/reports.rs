//! Report envelopes produced by the orchestrator and validator.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EstimatorKind, SignalKind};
use crate::error::SegnaleError;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious pattern worth a look; never blocks persistence.
    Warning,
}

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// One or more scores exceed the extreme-value threshold in magnitude.
    ExtremeValues,
    /// The share of null scores exceeds the configured fraction.
    ExcessiveNulls,
}

/// One of the three persisted score columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreColumn {
    /// `price_z`
    Price,
    /// `institutional_z`
    Institutional,
    /// `retail_z`
    Retail,
}

impl ScoreColumn {
    /// All columns in persisted order.
    pub const ALL: [Self; 3] = [Self::Price, Self::Institutional, Self::Retail];

    /// Column name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price_z",
            Self::Institutional => "institutional_z",
            Self::Retail => "retail_z",
        }
    }

    /// Signal feeding this column.
    #[must_use]
    pub const fn signal(self) -> SignalKind {
        match self {
            Self::Price => SignalKind::Price,
            Self::Institutional => SignalKind::InstitutionalOwnership,
            Self::Retail => SignalKind::PublicInterest,
        }
    }
}

impl fmt::Display for ScoreColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic finding about an aligned score table.
///
/// Issues are ephemeral: they are reported and logged but never persisted
/// alongside the scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity of the finding.
    pub severity: Severity,
    /// Category of the finding.
    pub kind: IssueKind,
    /// Affected column.
    pub column: ScoreColumn,
    /// Number of offending values (extreme values or nulls).
    pub count: usize,
    /// Number of rows inspected.
    pub total: usize,
    /// Human-readable description.
    pub message: String,
}

/// Estimator picked for each signal, `None` when the series was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EstimatorChoice {
    /// Price estimator.
    pub price: Option<EstimatorKind>,
    /// Public-interest estimator.
    pub public_interest: Option<EstimatorKind>,
    /// Institutional-ownership estimator.
    pub institutional: Option<EstimatorKind>,
}

impl EstimatorChoice {
    /// Record the estimator used for `kind`.
    pub fn set(&mut self, kind: SignalKind, estimator: Option<EstimatorKind>) {
        match kind {
            SignalKind::Price => self.price = estimator,
            SignalKind::PublicInterest => self.public_interest = estimator,
            SignalKind::InstitutionalOwnership => self.institutional = estimator,
        }
    }

    /// Estimator used for `kind`.
    #[must_use]
    pub const fn get(&self, kind: SignalKind) -> Option<EstimatorKind> {
        match kind {
            SignalKind::Price => self.price,
            SignalKind::PublicInterest => self.public_interest,
            SignalKind::InstitutionalOwnership => self.institutional,
        }
    }
}

/// Why an entity was skipped without touching the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SkipReason {
    /// The price series is shorter than its minimum periods.
    InsufficientData {
        /// Price observations available.
        observations: usize,
        /// Price observations required.
        required: usize,
    },
}

/// Outcome of processing a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Processed entity.
    pub entity: EntityId,
    /// Rows handed to the sink; zero when skipped.
    pub rows_written: usize,
    /// Estimator used per signal.
    pub estimators: EstimatorChoice,
    /// Validation findings for the aligned table.
    pub issues: Vec<ValidationIssue>,
    /// Set when the entity was skipped before persistence.
    pub skipped: Option<SkipReason>,
}

impl ProcessReport {
    /// Report for an entity skipped before any scoring.
    #[must_use]
    pub fn skipped(entity: EntityId, reason: SkipReason) -> Self {
        Self {
            entity,
            rows_written: 0,
            estimators: EstimatorChoice::default(),
            issues: Vec::new(),
            skipped: Some(reason),
        }
    }
}

/// A per-entity failure captured by the batch runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFailure {
    /// Entity whose pipeline failed.
    pub entity: EntityId,
    /// The propagated error.
    pub error: SegnaleError,
}

/// Summary of a batch run across many entities.
///
/// Failures never abort the batch; they are collected next to the successful
/// reports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Successful (or skipped) entities, sorted by entity id.
    pub reports: Vec<ProcessReport>,
    /// Failed entities, sorted by entity id.
    pub failures: Vec<EntityFailure>,
    /// Sum of `rows_written` across `reports`.
    pub total_rows: usize,
}
