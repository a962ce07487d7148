//! In-memory collaborators for the segnale engine.
//!
//! - [`MockStore`]: a [`SeriesSource`] and [`ScoreSink`] backed by static
//!   fixtures, with a fixed-point store shaped like a `DECIMAL(6,3)` column.
//! - [`DynamicMock`]: a scriptable source/sink driven by a controller, for
//!   failure and timeout tests.
//!
//! Fixture entities:
//! - `LINEAR`: hand-checkable linear price series with weekly interest and two
//!   quarterly holdings reports.
//! - `SYNTH-<tag>`: seeded random data; the same tag always yields the same series.
//! - `FAIL`: every fetch fails.
//! - `FAIL-PERSIST`: fetches succeed with the `LINEAR` data, persistence fails.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use segnale_core::{
    AlignedRow, EntityId, RawObservation, ScoreSink, SegnaleError, SeriesSource, SignalKind,
};
use tokio::sync::{Mutex, RwLock};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMock, DynamicMockController, MockBehavior};

/// Largest magnitude a stored score may have.
pub const STORED_SCORE_LIMIT: Decimal = Decimal::from_parts(999_999, 0, 0, false, 3);

/// A persisted row with scores rounded to three decimal places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    /// Price-calendar date.
    pub date: NaiveDate,
    /// Price z-score.
    pub price_z: Option<Decimal>,
    /// Institutional-ownership z-score.
    pub institutional_z: Option<Decimal>,
    /// Public-interest z-score.
    pub retail_z: Option<Decimal>,
}

impl StoredRow {
    fn from_aligned(row: &AlignedRow) -> Result<Self, SegnaleError> {
        Ok(Self {
            date: row.date,
            price_z: to_stored(row.price_z)?,
            institutional_z: to_stored(row.institutional_z)?,
            retail_z: to_stored(row.retail_z)?,
        })
    }
}

fn to_stored(z: Option<f64>) -> Result<Option<Decimal>, SegnaleError> {
    let Some(z) = z else {
        return Ok(None);
    };
    let d = Decimal::from_f64(z).map(|d| d.round_dp(3)).ok_or_else(|| {
        SegnaleError::persist(MockStore::NAME, format!("unrepresentable score {z}"))
    })?;
    if d.abs() > STORED_SCORE_LIMIT {
        return Err(SegnaleError::persist(
            MockStore::NAME,
            format!("score {d} out of range for DECIMAL(6,3)"),
        ));
    }
    Ok(Some(d))
}

/// In-memory source and sink with deterministic fixture data.
///
/// Series set with [`MockStore::insert_series`] take precedence over
/// fixtures. Entities with neither yield empty series.
#[derive(Default)]
pub struct MockStore {
    series: RwLock<HashMap<(EntityId, SignalKind), Vec<RawObservation>>>,
    rows: Mutex<HashMap<EntityId, Vec<StoredRow>>>,
    replace_calls: AtomicUsize,
}

impl MockStore {
    /// Name used by both roles.
    pub const NAME: &'static str = "segnale-mock";

    /// Create an empty store; fixture entities are always available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the series returned for `(entity, kind)`.
    pub async fn insert_series(
        &self,
        entity: EntityId,
        kind: SignalKind,
        observations: Vec<RawObservation>,
    ) {
        self.series.write().await.insert((entity, kind), observations);
    }

    /// Pre-populate stored rows, as if left by an earlier run.
    pub async fn seed_rows(&self, entity: EntityId, rows: Vec<StoredRow>) {
        self.rows.lock().await.insert(entity, rows);
    }

    /// Rows currently stored for `entity`, in date order.
    pub async fn stored(&self, entity: &EntityId) -> Vec<StoredRow> {
        self.rows
            .lock()
            .await
            .get(entity)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of `replace_scores` calls received, including failed ones.
    #[must_use]
    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeriesSource for MockStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn series(
        &self,
        entity: &EntityId,
        kind: SignalKind,
    ) -> Result<Vec<RawObservation>, SegnaleError> {
        if entity.as_str() == "FAIL" {
            return Err(SegnaleError::fetch(
                Self::NAME,
                format!("forced failure: {kind}"),
            ));
        }
        if let Some(obs) = self.series.read().await.get(&(entity.clone(), kind)) {
            return Ok(obs.clone());
        }
        Ok(fixtures::by_entity(entity.as_str(), kind).unwrap_or_default())
    }
}

#[async_trait]
impl ScoreSink for MockStore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn replace_scores(
        &self,
        entity: &EntityId,
        rows: Vec<AlignedRow>,
    ) -> Result<(), SegnaleError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        if entity.as_str() == "FAIL-PERSIST" {
            return Err(SegnaleError::persist(Self::NAME, "forced failure"));
        }
        // convert everything before touching the table so a bad row leaves it intact
        let converted = rows
            .iter()
            .map(StoredRow::from_aligned)
            .collect::<Result<Vec<_>, _>>()?;
        self.rows.lock().await.insert(entity.clone(), converted);
        Ok(())
    }
}
