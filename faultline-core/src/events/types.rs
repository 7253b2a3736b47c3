//! Event payload types for progress reporting.

use std::path::PathBuf;

/// Payload for `on_archives_counted`. Fired once, before ingestion.
#[derive(Debug, Clone)]
pub struct ArchivesCountedEvent {
    pub count: usize,
}

/// Payload for `on_archive_finished`. Fired after each input is ingested.
#[derive(Debug, Clone)]
pub struct ArchiveFinishedEvent {
    pub path: PathBuf,
    pub units: usize,
}

/// Payload for `on_analysis_started`.
#[derive(Debug, Clone)]
pub struct AnalysisStartedEvent {
    pub unit_count: usize,
}

/// Payload for `on_unit_finished`.
#[derive(Debug, Clone)]
pub struct UnitFinishedEvent {
    pub unit: String,
    /// 1-based position of the unit in ingestion order.
    pub position: usize,
    pub total: usize,
}

/// Payload for `on_analysis_pass_finished`.
#[derive(Debug, Clone)]
pub struct AnalysisPassFinishedEvent {
    pub units: usize,
    pub duration_ms: u64,
}

/// Payload for `on_detector_failed`.
#[derive(Debug, Clone)]
pub struct DetectorFailedEvent {
    pub detector: String,
    /// `None` when the failure happened in finalize.
    pub unit: Option<String>,
    pub message: String,
    pub error_code: String,
}

/// Payload for `on_run_cancelled`.
#[derive(Debug, Clone)]
pub struct RunCancelledEvent {
    /// Lifecycle state the run was in when cancellation was observed.
    pub stage: String,
}
