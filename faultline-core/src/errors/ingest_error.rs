//! Ingestion errors.

use std::path::PathBuf;

use super::error_code::{self, FaultlineErrorCode};
use super::DecodeError;

/// Errors that abort ingestion. Every variant but `Cancelled` names the
/// input path that caused it.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Could not analyze {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not analyze {path}: bad archive: {message}")]
    Archive { path: PathBuf, message: String },

    #[error("Could not analyze {path}: {source}")]
    Decode {
        path: PathBuf,
        entry: Option<String>,
        source: DecodeError,
    },

    #[error("Ingestion cancelled")]
    Cancelled,
}

impl IngestError {
    /// The input path this error is attributed to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::Archive { path, .. } | Self::Decode { path, .. } => {
                Some(path)
            }
            Self::Cancelled => None,
        }
    }
}

impl FaultlineErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Cancelled => error_code::CANCELLED,
            Self::Decode { .. } => error_code::DECODE_ERROR,
            _ => error_code::INGEST_ERROR,
        }
    }
}
