//! Detector-local analysis errors.

use super::error_code::{self, FaultlineErrorCode};

/// Errors a detector returns from `examine` or `finalize`.
///
/// Neither variant stops a run. The pipeline logs both to the bug sink and
/// moves on to the next detector.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The detector could not make sense of this particular unit.
    #[error("Analysis of {unit} failed: {message}")]
    UnitAnalysis { unit: String, message: String },

    /// Anything the detector did not anticipate.
    #[error("Internal analysis failure: {message}")]
    Internal { message: String },
}

impl AnalysisError {
    pub fn unit(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnitAnalysis {
            unit: unit.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn is_unit_analysis(&self) -> bool {
        matches!(self, Self::UnitAnalysis { .. })
    }
}

impl FaultlineErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitAnalysis { .. } => error_code::UNIT_ANALYSIS_ERROR,
            Self::Internal { .. } => error_code::INTERNAL_ANALYSIS_ERROR,
        }
    }
}
