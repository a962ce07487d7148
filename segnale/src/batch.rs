use std::collections::HashSet;
use std::time::Duration;

use futures::StreamExt;
use segnale_core::{BatchReport, EntityFailure, EntityId, ProcessReport, SegnaleError};

use crate::Segnale;

/// Default number of entities processed at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Builder to run the pipeline over many entities.
pub struct BatchBuilder<'a> {
    pub(crate) segnale: &'a Segnale,
    pub(crate) entities: Vec<EntityId>,
    pub(crate) concurrency: usize,
    pub(crate) entity_timeout: Option<Duration>,
}

impl<'a> BatchBuilder<'a> {
    /// Create a new builder bound to a `Segnale` instance.
    ///
    /// Starts with an empty entity list, [`DEFAULT_CONCURRENCY`] and no
    /// per-entity timeout.
    #[must_use]
    pub const fn new(segnale: &'a Segnale) -> Self {
        Self {
            segnale,
            entities: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            entity_timeout: None,
        }
    }

    /// Replace the entity list.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the list contains the same entity twice.
    pub fn entities(mut self, entities: &[EntityId]) -> Result<Self, SegnaleError> {
        let mut seen = HashSet::new();
        for entity in entities {
            if !seen.insert(entity) {
                return Err(SegnaleError::InvalidArg(format!(
                    "duplicate entity '{entity}' in entities list"
                )));
            }
        }
        self.entities = entities.to_vec();
        Ok(self)
    }

    /// Append one entity.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the entity is already in the list.
    pub fn add_entity(mut self, entity: EntityId) -> Result<Self, SegnaleError> {
        if self.entities.contains(&entity) {
            return Err(SegnaleError::InvalidArg(format!(
                "duplicate entity '{entity}' already exists in entities list"
            )));
        }
        self.entities.push(entity);
        Ok(self)
    }

    /// Bound the number of entities in flight.
    ///
    /// # Errors
    /// Returns `InvalidArg` for zero.
    pub fn concurrency(mut self, n: usize) -> Result<Self, SegnaleError> {
        if n == 0 {
            return Err(SegnaleError::InvalidArg("concurrency must be >= 1".into()));
        }
        self.concurrency = n;
        Ok(self)
    }

    /// Abandon an entity whose whole pipeline takes longer than `timeout`.
    ///
    /// The abandoned entity is reported as an `EntityTimeout` failure.
    #[must_use]
    pub const fn entity_timeout(mut self, timeout: Duration) -> Self {
        self.entity_timeout = Some(timeout);
        self
    }

    /// Process every entity and collect the outcomes.
    ///
    /// Behavior:
    /// - Entities run concurrently up to the configured bound, in no particular order.
    /// - A failing entity is recorded in `failures` and never stops the others.
    /// - Reports and failures are sorted by entity id.
    ///
    /// # Errors
    /// Returns an error only if no entities are specified.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "segnale::batch::run",
            skip(self),
            fields(entities = self.entities.len(), concurrency = self.concurrency),
        )
    )]
    pub async fn run(self) -> Result<BatchReport, SegnaleError> {
        if self.entities.is_empty() {
            return Err(SegnaleError::InvalidArg("no entities specified for batch".into()));
        }

        let segnale = self.segnale;
        let timeout = self.entity_timeout;
        let outcomes: Vec<(EntityId, Result<ProcessReport, SegnaleError>)> =
            futures::stream::iter(self.entities)
                .map(move |entity| async move {
                    let result = match timeout {
                        Some(limit) => {
                            match tokio::time::timeout(limit, segnale.process(&entity)).await {
                                Ok(r) => r,
                                Err(_) => Err(SegnaleError::entity_timeout(entity.as_str())),
                            }
                        }
                        None => segnale.process(&entity).await,
                    };
                    (entity, result)
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        let mut report = BatchReport::default();
        for (entity, result) in outcomes {
            match result {
                Ok(r) => {
                    report.total_rows += r.rows_written;
                    report.reports.push(r);
                }
                Err(error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(entity = %entity, error = %error, "entity failed; continuing");
                    report.failures.push(EntityFailure { entity, error });
                }
            }
        }
        report.reports.sort_by(|a, b| a.entity.cmp(&b.entity));
        report.failures.sort_by(|a, b| a.entity.cmp(&b.entity));
        Ok(report)
    }
}

impl Segnale {
    /// Begin building a batch run.
    ///
    /// Typical usage: chain `entities`/`concurrency`/`entity_timeout` then call `run()`.
    #[must_use]
    pub const fn batch(&'_ self) -> BatchBuilder<'_> {
        BatchBuilder::new(self)
    }
}
