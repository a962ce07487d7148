//! Segnale-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod reports;

pub use config::{EngineConfig, RollingWindow, SignalConfig, ValidationConfig, WinsorConfig};
pub use entity::{Cadence, EntityId, EstimatorKind, SignalKind};
pub use error::SegnaleError;
pub use reports::{
    BatchReport, EntityFailure, EstimatorChoice, IssueKind, ProcessReport, ScoreColumn, Severity,
    SkipReason, ValidationIssue,
};
