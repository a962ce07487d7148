use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the segnale workspace.
///
/// This wraps configuration validation errors, malformed collaborator data,
/// tagged fetch/persist failures from the surrounding application, and the
/// timeouts applied by the batch runner.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SegnaleError {
    /// Issues with the data returned by a collaborator (ordering, non-finite values).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The series source failed.
    #[error("{provider} fetch failed: {msg}")]
    Fetch {
        /// Name of the series source that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The score sink failed.
    #[error("{sink} persist failed: {msg}")]
    Persist {
        /// Name of the score sink that failed.
        sink: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource or entity could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "price series for AAPL".
        what: String,
    },

    /// A single entity's pipeline exceeded the batch's per-entity timeout.
    #[error("entity timed out: {entity}")]
    EntityTimeout {
        /// Entity whose pipeline was abandoned.
        entity: String,
    },
}

impl SegnaleError {
    /// Helper: build a `Fetch` error with the source name and message.
    pub fn fetch(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Persist` error with the sink name and message.
    pub fn persist(sink: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Persist {
            sink: sink.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `EntityTimeout` error.
    pub fn entity_timeout(entity: impl Into<String>) -> Self {
        Self::EntityTimeout {
            entity: entity.into(),
        }
    }

    /// Returns true if the error came from a collaborator rather than the engine.
    ///
    /// Collaborator failures are the ones a batch caller is expected to isolate
    /// per entity and move past.
    #[must_use]
    pub const fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Persist { .. } | Self::NotFound { .. } | Self::Data(_)
        )
    }
}
