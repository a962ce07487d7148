//! Engine configuration passed explicitly into every orchestrator.

use serde::{Deserialize, Serialize};

use crate::{SegnaleError, SignalKind};

/// Trailing window parameters for a rolling estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    /// Number of most recent observations (including the current one) in the window.
    pub size: usize,
    /// Smallest number of observations required before a score is emitted.
    pub min_periods: usize,
}

impl RollingWindow {
    /// Construct a window without validation; see [`RollingWindow::validate`].
    #[must_use]
    pub const fn new(size: usize, min_periods: usize) -> Self {
        Self { size, min_periods }
    }

    /// Check `1 <= min_periods <= size`.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the violated bound.
    pub fn validate(&self) -> Result<(), SegnaleError> {
        if self.size == 0 {
            return Err(SegnaleError::InvalidArg("window size must be >= 1".into()));
        }
        if self.min_periods == 0 {
            return Err(SegnaleError::InvalidArg("min_periods must be >= 1".into()));
        }
        if self.min_periods > self.size {
            return Err(SegnaleError::InvalidArg(format!(
                "min_periods ({}) must not exceed window size ({})",
                self.min_periods, self.size
            )));
        }
        Ok(())
    }
}

/// Per-signal parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Rolling window used by the estimator.
    pub window: RollingWindow,
    /// Maximum age in days of a forward-filled value; `None` never goes stale.
    ///
    /// Ignored for the price signal, which defines the calendar.
    pub max_staleness_days: Option<u32>,
}

impl SignalConfig {
    /// Build a config whose staleness cap follows the signal's native cadence.
    #[must_use]
    pub const fn for_signal(kind: SignalKind, size: usize, min_periods: usize) -> Self {
        Self {
            window: RollingWindow::new(size, min_periods),
            max_staleness_days: kind.native_cadence().default_staleness_days(),
        }
    }
}

/// Percentile bounds for the global winsorizing clip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinsorConfig {
    /// Lower percentile as a fraction in `[0, 1]`.
    pub lower: f64,
    /// Upper percentile as a fraction in `[0, 1]`.
    pub upper: f64,
}

impl Default for WinsorConfig {
    fn default() -> Self {
        Self {
            lower: 0.01,
            upper: 0.99,
        }
    }
}

/// Thresholds used by the score validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Absolute z-score above which a value counts as extreme.
    pub extreme_threshold: f64,
    /// Null fraction in `[0, 1]` above which a column is reported.
    pub max_null_fraction: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            extreme_threshold: 5.0,
            max_null_fraction: 0.5,
        }
    }
}

/// Full configuration of the normalization engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Daily price signal.
    pub price: SignalConfig,
    /// Weekly public-interest signal.
    pub public_interest: SignalConfig,
    /// Quarterly institutional-ownership signal.
    pub institutional: SignalConfig,
    /// Winsorizing percentiles applied to every series before estimation.
    pub winsor: WinsorConfig,
    /// Absolute sample skewness above which the robust estimator is used.
    pub skew_threshold: f64,
    /// Consistency constant applied to the MAD.
    pub mad_scale: f64,
    /// Score validator thresholds.
    pub validation: ValidationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            price: SignalConfig::for_signal(SignalKind::Price, 30, 14),
            public_interest: SignalConfig::for_signal(SignalKind::PublicInterest, 4, 4),
            institutional: SignalConfig::for_signal(SignalKind::InstitutionalOwnership, 4, 2),
            winsor: WinsorConfig::default(),
            skew_threshold: 1.5,
            mad_scale: 1.4826,
            validation: ValidationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parameters for the given signal.
    #[must_use]
    pub const fn signal(&self, kind: SignalKind) -> &SignalConfig {
        match kind {
            SignalKind::Price => &self.price,
            SignalKind::PublicInterest => &self.public_interest,
            SignalKind::InstitutionalOwnership => &self.institutional,
        }
    }

    /// Mutable parameters for the given signal.
    pub fn signal_mut(&mut self, kind: SignalKind) -> &mut SignalConfig {
        match kind {
            SignalKind::Price => &mut self.price,
            SignalKind::PublicInterest => &mut self.public_interest,
            SignalKind::InstitutionalOwnership => &mut self.institutional,
        }
    }

    /// Validate every parameter.
    ///
    /// # Errors
    /// Returns `InvalidArg` for the first parameter found out of range.
    pub fn validate(&self) -> Result<(), SegnaleError> {
        for kind in SignalKind::ALL {
            self.signal(kind)
                .window
                .validate()
                .map_err(|e| match e {
                    SegnaleError::InvalidArg(msg) => {
                        SegnaleError::InvalidArg(format!("{kind}: {msg}"))
                    }
                    other => other,
                })?;
        }

        let WinsorConfig { lower, upper } = self.winsor;
        if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) {
            return Err(SegnaleError::InvalidArg(format!(
                "winsor percentiles must lie in [0, 1], got lower={lower} upper={upper}"
            )));
        }
        if lower > upper {
            return Err(SegnaleError::InvalidArg(format!(
                "winsor lower percentile ({lower}) exceeds upper ({upper})"
            )));
        }

        for (label, value) in [
            ("skew_threshold", self.skew_threshold),
            ("mad_scale", self.mad_scale),
            ("extreme_threshold", self.validation.extreme_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SegnaleError::InvalidArg(format!(
                    "{label} must be finite and positive, got {value}"
                )));
            }
        }

        let nulls = self.validation.max_null_fraction;
        if !(0.0..=1.0).contains(&nulls) {
            return Err(SegnaleError::InvalidArg(format!(
                "max_null_fraction must lie in [0, 1], got {nulls}"
            )));
        }
        Ok(())
    }
}
