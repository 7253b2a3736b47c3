//! FaultlineErrorCode trait and the stable code strings.

/// Trait giving every Faultline error a stable, machine-readable code.
/// Hosts use the code to pick an exit status or to group diagnostics.
pub trait FaultlineErrorCode {
    /// Returns the error code string (e.g., "INGEST_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const REGISTRY_ERROR: &str = "REGISTRY_ERROR";
pub const DUPLICATE_DETECTOR: &str = "DUPLICATE_DETECTOR";
pub const PLUGIN_DIR_ERROR: &str = "PLUGIN_DIR_ERROR";
pub const SELECTION_ERROR: &str = "SELECTION_ERROR";
pub const UNKNOWN_DETECTOR: &str = "UNKNOWN_DETECTOR";
pub const DECODE_ERROR: &str = "DECODE_ERROR";
pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const UNIT_ANALYSIS_ERROR: &str = "UNIT_ANALYSIS_ERROR";
pub const INTERNAL_ANALYSIS_ERROR: &str = "INTERNAL_ANALYSIS_ERROR";
pub const FILTER_ERROR: &str = "FILTER_ERROR";
pub const UNIT_NOT_FOUND: &str = "UNIT_NOT_FOUND";
pub const CANCELLED: &str = "CANCELLED";
