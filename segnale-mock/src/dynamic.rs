use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use segnale_core::{
    AlignedRow, EntityId, RawObservation, ScoreSink, SegnaleError, SeriesSource, SignalKind,
};

/// Instruction for how a call should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(SegnaleError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    series_rules: HashMap<(EntityId, SignalKind), MockBehavior<Vec<RawObservation>>>,
    sink_rules: HashMap<EntityId, MockBehavior<()>>,
    persisted: HashMap<EntityId, Vec<AlignedRow>>,
    fetch_log: Vec<(EntityId, SignalKind)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior of `series` calls for one entity and signal.
    pub async fn set_series_behavior(
        &self,
        entity: EntityId,
        kind: SignalKind,
        behavior: MockBehavior<Vec<RawObservation>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.series_rules.insert((entity, kind), behavior);
    }

    /// Set the behavior of `replace_scores` calls for one entity.
    pub async fn set_sink_behavior(&self, entity: EntityId, behavior: MockBehavior<()>) {
        let mut guard = self.state.lock().await;
        guard.sink_rules.insert(entity, behavior);
    }

    /// Rows accepted by the sink for `entity`, if any.
    pub async fn persisted(&self, entity: &EntityId) -> Option<Vec<AlignedRow>> {
        let guard = self.state.lock().await;
        guard.persisted.get(entity).cloned()
    }

    /// Every `series` call received so far, in call order.
    pub async fn fetch_log(&self) -> Vec<(EntityId, SignalKind)> {
        let guard = self.state.lock().await;
        guard.fetch_log.clone()
    }

    /// Clear all configured behaviors, stored rows and logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.series_rules.clear();
        guard.sink_rules.clear();
        guard.persisted.clear();
        guard.fetch_log.clear();
    }
}

/// A source and sink that defer all behavior to an external controller.
///
/// Without a rule, `series` returns an empty series and `replace_scores`
/// accepts the rows.
pub struct DynamicMock {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMock {
    /// Create a new dynamic mock and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        (Arc::new(Self { name, state }), controller)
    }
}

#[async_trait]
impl SeriesSource for DynamicMock {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn series(
        &self,
        entity: &EntityId,
        kind: SignalKind,
    ) -> Result<Vec<RawObservation>, SegnaleError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.fetch_log.push((entity.clone(), kind));
            guard.series_rules.get(&(entity.clone(), kind)).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(obs)) => Ok(obs),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl ScoreSink for DynamicMock {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn replace_scores(
        &self,
        entity: &EntityId,
        rows: Vec<AlignedRow>,
    ) -> Result<(), SegnaleError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.sink_rules.get(entity).cloned()
        };

        match behavior {
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            Some(MockBehavior::Return(())) | None => {
                let mut guard = self.state.lock().await;
                guard.persisted.insert(entity.clone(), rows);
                Ok(())
            }
        }
    }
}
