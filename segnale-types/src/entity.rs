//! Entity identifiers and signal labels usable across crates.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::SegnaleError;

/// Identifier of a tracked entity (for example a ticker symbol).
///
/// The id is opaque to the engine. It only has to be non-empty and free of
/// whitespace so it can be used as a key in stores and log fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Build a validated entity id.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `id` is empty or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, SegnaleError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SegnaleError::InvalidArg("entity id must not be empty".into()));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(SegnaleError::InvalidArg(format!(
                "entity id '{id}' must not contain whitespace"
            )));
        }
        Ok(Self(id))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = SegnaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Native sampling cadence of a signal.
///
/// The engine only uses the cadence to derive default staleness caps; nothing enforces that a series actually arrives at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Cadence {
    /// One observation per trading day.
    Daily,
    /// One observation per week.
    Weekly,
    /// One observation per fiscal quarter.
    Quarterly,
}

impl Cadence {
    /// Default forward-fill cap, in calendar days, for a series of this cadence.
    ///
    /// `None` means the series defines the calendar and is never forward-filled.
    #[must_use]
    pub const fn default_staleness_days(self) -> Option<u32> {
        match self {
            Self::Daily => None,
            Self::Weekly => Some(7),
            Self::Quarterly => Some(95),
        }
    }

    /// Stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three signals tracked per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    /// Daily closing price. Defines the output calendar.
    Price,
    /// Weekly public search interest (the "retail" signal).
    PublicInterest,
    /// Quarterly institutional ownership (the "smart money" signal).
    InstitutionalOwnership,
}

impl SignalKind {
    /// All signal kinds in processing order.
    pub const ALL: [Self; 3] = [
        Self::Price,
        Self::PublicInterest,
        Self::InstitutionalOwnership,
    ];

    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::PublicInterest => "public-interest",
            Self::InstitutionalOwnership => "institutional-ownership",
        }
    }

    /// Native cadence the signal usually arrives at.
    #[must_use]
    pub const fn native_cadence(self) -> Cadence {
        match self {
            Self::Price => Cadence::Daily,
            Self::PublicInterest => Cadence::Weekly,
            Self::InstitutionalOwnership => Cadence::Quarterly,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rolling estimator produced a series' scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorKind {
    /// Rolling mean and sample standard deviation.
    Classic,
    /// Rolling median and scaled median absolute deviation.
    Robust,
}

impl EstimatorKind {
    /// Stable identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Robust => "robust",
        }
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
