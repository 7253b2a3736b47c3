//! Detector selection errors.

use super::error_code::{self, FaultlineErrorCode};

/// Configuration inconsistencies found while computing the active detector set.
/// All of these are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Detector inclusion and exclusion lists are mutually exclusive")]
    ConflictingModes,

    #[error("No such detector: {name}")]
    UnknownDetector { name: String },

    #[error("Bad omit list: detector {name} is listed more than once")]
    DuplicateOmitted { name: String },

    #[error("Bad omit list: no such detector: {name}")]
    UnknownOmitted { name: String },

    #[error("Bad omit list: expected {expected} active detectors, built {actual}")]
    OmitCountMismatch { expected: usize, actual: usize },
}

impl FaultlineErrorCode for SelectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDetector { .. } | Self::UnknownOmitted { .. } => {
                error_code::UNKNOWN_DETECTOR
            }
            _ => error_code::SELECTION_ERROR,
        }
    }
}
