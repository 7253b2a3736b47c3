//! Bug filter loading errors.

use std::path::PathBuf;

use super::error_code::{self, FaultlineErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Could not read filter file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid filter file {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Filter file {path} configured but no filter loader is available")]
    NoLoader { path: PathBuf },
}

impl FaultlineErrorCode for FilterError {
    fn error_code(&self) -> &'static str {
        error_code::FILTER_ERROR
    }
}
