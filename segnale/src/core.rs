use std::sync::Arc;

use segnale_core::{
    EngineConfig, RollingWindow, ScoreSink, SegnaleError, SeriesSource, SignalKind,
    ValidationConfig, WinsorConfig,
};

/// Orchestrator that runs the per-entity normalization pipeline.
///
/// A `Segnale` owns its configuration and its collaborator handles; there is
/// no shared mutable state, so one instance can process many entities
/// concurrently.
pub struct Segnale {
    pub(crate) source: Arc<dyn SeriesSource>,
    pub(crate) sink: Arc<dyn ScoreSink>,
    pub(crate) cfg: EngineConfig,
}

/// Builder for constructing a `Segnale` orchestrator.
pub struct SegnaleBuilder {
    source: Option<Arc<dyn SeriesSource>>,
    sink: Option<Arc<dyn ScoreSink>>,
    cfg: EngineConfig,
}

impl Default for SegnaleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SegnaleBuilder {
    /// Create a new builder with the default engine configuration.
    ///
    /// Starts with no collaborators; both a source and a sink must be set
    /// before [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            sink: None,
            cfg: EngineConfig::default(),
        }
    }

    /// Set the series source.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn SeriesSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the score sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn ScoreSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Use one collaborator as both source and sink.
    #[must_use]
    pub fn store<S>(mut self, store: Arc<S>) -> Self
    where
        S: SeriesSource + ScoreSink + 'static,
    {
        let source: Arc<dyn SeriesSource> = store.clone();
        let sink: Arc<dyn ScoreSink> = store;
        self.source = Some(source);
        self.sink = Some(sink);
        self
    }

    /// Replace the whole engine configuration.
    #[must_use]
    pub const fn config(mut self, cfg: EngineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the rolling window of one signal.
    ///
    /// Bounds are checked in [`build`](Self::build).
    #[must_use]
    pub fn window(mut self, kind: SignalKind, size: usize, min_periods: usize) -> Self {
        self.cfg.signal_mut(kind).window = RollingWindow::new(size, min_periods);
        self
    }

    /// Set the forward-fill staleness cap of one signal, in calendar days.
    ///
    /// `None` disables the cap. The price signal defines the calendar and
    /// ignores this value.
    #[must_use]
    pub fn max_staleness_days(mut self, kind: SignalKind, days: Option<u32>) -> Self {
        self.cfg.signal_mut(kind).max_staleness_days = days;
        self
    }

    /// Set the winsorizing percentiles, as fractions in `[0, 1]`.
    #[must_use]
    pub const fn winsor(mut self, lower: f64, upper: f64) -> Self {
        self.cfg.winsor = WinsorConfig { lower, upper };
        self
    }

    /// Set the absolute skewness above which the robust estimator is used.
    #[must_use]
    pub const fn skew_threshold(mut self, threshold: f64) -> Self {
        self.cfg.skew_threshold = threshold;
        self
    }

    /// Set the MAD consistency constant of the robust estimator.
    #[must_use]
    pub const fn mad_scale(mut self, scale: f64) -> Self {
        self.cfg.mad_scale = scale;
        self
    }

    /// Set the score validator thresholds.
    #[must_use]
    pub const fn validation(mut self, validation: ValidationConfig) -> Self {
        self.cfg.validation = validation;
        self
    }

    /// Build the `Segnale` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the source or the sink is missing, or if the
    /// configuration fails [`EngineConfig::validate`].
    pub fn build(self) -> Result<Segnale, SegnaleError> {
        let source = self.source.ok_or_else(|| {
            SegnaleError::InvalidArg("no series source set; add one via source(...)".into())
        })?;
        let sink = self.sink.ok_or_else(|| {
            SegnaleError::InvalidArg("no score sink set; add one via sink(...)".into())
        })?;
        self.cfg.validate()?;

        Ok(Segnale {
            source,
            sink,
            cfg: self.cfg,
        })
    }
}

impl Segnale {
    /// Start building a new `Segnale` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use segnale::{Segnale, SignalKind};
    ///
    /// let store = Arc::new(MyWarehouse::connect("...")?);
    /// let engine = Segnale::builder()
    ///     .store(store)
    ///     .window(SignalKind::Price, 60, 20)
    ///     .max_staleness_days(SignalKind::InstitutionalOwnership, Some(100))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SegnaleBuilder {
        SegnaleBuilder::new()
    }

    /// The validated engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Name of the configured series source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Name of the configured score sink.
    #[must_use]
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }
}
