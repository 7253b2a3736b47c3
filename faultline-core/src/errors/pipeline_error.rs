//! Run-level errors.

use super::error_code::{self, FaultlineErrorCode};
use super::{ConfigError, FilterError, IngestError, RegistryError, SelectionError};

/// Errors that halt an analysis run.
/// Aggregates subsystem errors via `From` conversions.
///
/// Detector failures never appear here: they are isolated per detector and
/// reported through the bug sink.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("{0}")]
    Ingest(IngestError),

    #[error("Could not find class {name} in repository")]
    UnitNotFound { name: String },

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl PipelineError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Cancelled => Self::Cancelled,
            other => Self::Ingest(other),
        }
    }
}

impl FaultlineErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Selection(e) => e.error_code(),
            Self::Filter(e) => e.error_code(),
            Self::Ingest(e) => e.error_code(),
            Self::UnitNotFound { .. } => error_code::UNIT_NOT_FOUND,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
