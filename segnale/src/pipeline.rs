use segnale_core::{
    AlignedRow, EntityId, EstimatorChoice, Normalized, ProcessReport, SegnaleError, Series,
    SignalKind, SkipReason, ValidationIssue, build_aligned_rows, normalize_series,
    validate_scores,
};

use crate::Segnale;

/// Everything computed for one entity before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntity {
    /// Entity the scores belong to.
    pub entity: EntityId,
    /// One row per price-calendar date.
    pub rows: Vec<AlignedRow>,
    /// Strategy picked for each series.
    pub estimators: EstimatorChoice,
    /// Normalized price series.
    pub price: Normalized,
    /// Normalized public-interest series, at its native dates.
    pub public_interest: Normalized,
    /// Normalized institutional-ownership series, at its native dates.
    pub institutional: Normalized,
    /// Validator findings for `rows`.
    pub issues: Vec<ValidationIssue>,
}

/// Result of a dry run.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// The full table was computed.
    Scored(Box<ScoredEntity>),
    /// The price series is too short to score; nothing was computed.
    InsufficientData {
        /// Price observations available.
        observations: usize,
        /// Price observations required (the price minimum periods).
        required: usize,
    },
}

impl ScoreOutcome {
    /// The scored entity, if any.
    #[must_use]
    pub fn scored(self) -> Option<ScoredEntity> {
        match self {
            Self::Scored(s) => Some(*s),
            Self::InsufficientData { .. } => None,
        }
    }
}

impl Segnale {
    async fn fetch(&self, entity: &EntityId, kind: SignalKind) -> Result<Series, SegnaleError> {
        let observations = self.source.series(entity, kind).await?;
        Series::try_new(entity.clone(), kind, observations)
    }

    /// Fetch, normalize, align and validate one entity without persisting.
    ///
    /// # Errors
    /// Propagates source failures unchanged, and returns `Data` when a source
    /// breaks the ordering or finiteness contract.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "segnale::pipeline::score",
            skip(self),
            fields(entity = %entity, source = self.source.name()),
        )
    )]
    pub async fn score(&self, entity: &EntityId) -> Result<ScoreOutcome, SegnaleError> {
        let (price, interest, holdings) = futures::try_join!(
            self.fetch(entity, SignalKind::Price),
            self.fetch(entity, SignalKind::PublicInterest),
            self.fetch(entity, SignalKind::InstitutionalOwnership),
        )?;

        let required = self.cfg.price.window.min_periods;
        if price.len() < required {
            #[cfg(feature = "tracing")]
            tracing::info!(
                observations = price.len(),
                required,
                "insufficient price history; skipping"
            );
            return Ok(ScoreOutcome::InsufficientData {
                observations: price.len(),
                required,
            });
        }

        let price = normalize_series(&price, &self.cfg);
        let public_interest = normalize_series(&interest, &self.cfg);
        let institutional = normalize_series(&holdings, &self.cfg);

        let mut estimators = EstimatorChoice::default();
        for n in [&price, &public_interest, &institutional] {
            estimators.set(n.kind, n.estimator);
        }

        let rows = build_aligned_rows(entity, &price, &public_interest, &institutional, &self.cfg);
        let issues = validate_scores(entity, &rows, &self.cfg.validation);

        Ok(ScoreOutcome::Scored(Box::new(ScoredEntity {
            entity: entity.clone(),
            rows,
            estimators,
            price,
            public_interest,
            institutional,
            issues,
        })))
    }

    /// Run the full pipeline for one entity and replace its stored scores.
    ///
    /// Behavior:
    /// - An entity whose price series is shorter than the price minimum
    ///   periods is skipped: the report has zero rows and the sink is not called.
    /// - Otherwise every stored row of the entity is replaced by the newly
    ///   computed table in one sink call. Validation findings never block it.
    ///
    /// # Errors
    /// Propagates source and sink failures unchanged. The engine never
    /// retries; on error the previously stored rows are left as they were.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "segnale::pipeline::process",
            skip(self),
            fields(entity = %entity, sink = self.sink.name()),
        )
    )]
    pub async fn process(&self, entity: &EntityId) -> Result<ProcessReport, SegnaleError> {
        let scored = match self.score(entity).await? {
            ScoreOutcome::Scored(s) => *s,
            ScoreOutcome::InsufficientData {
                observations,
                required,
            } => {
                return Ok(ProcessReport::skipped(
                    entity.clone(),
                    SkipReason::InsufficientData {
                        observations,
                        required,
                    },
                ));
            }
        };

        let rows_written = scored.rows.len();
        self.sink.replace_scores(entity, scored.rows).await?;

        #[cfg(feature = "tracing")]
        tracing::info!(rows = rows_written, issues = scored.issues.len(), "scores replaced");

        Ok(ProcessReport {
            entity: scored.entity,
            rows_written,
            estimators: scored.estimators,
            issues: scored.issues,
            skipped: None,
        })
    }
}
