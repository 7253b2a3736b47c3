//! Decoder errors.

use super::error_code::{self, FaultlineErrorCode};

/// A unit decoder could not turn raw bytes into a program unit.
#[derive(Debug, thiserror::Error)]
#[error("Could not decode {source_name}: {message}")]
pub struct DecodeError {
    pub source_name: String,
    pub message: String,
}

impl DecodeError {
    pub fn new(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

impl FaultlineErrorCode for DecodeError {
    fn error_code(&self) -> &'static str {
        error_code::DECODE_ERROR
    }
}
