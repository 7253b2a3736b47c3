//! ProgressHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing analysis progress.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the milestones they care about.
pub trait ProgressHandler: Send + Sync {
    fn on_archives_counted(&self, _event: &ArchivesCountedEvent) {}
    fn on_archive_finished(&self, _event: &ArchiveFinishedEvent) {}
    fn on_analysis_started(&self, _event: &AnalysisStartedEvent) {}
    fn on_unit_finished(&self, _event: &UnitFinishedEvent) {}
    fn on_analysis_pass_finished(&self, _event: &AnalysisPassFinishedEvent) {}

    fn on_detector_failed(&self, _event: &DetectorFailedEvent) {}
    fn on_run_cancelled(&self, _event: &RunCancelledEvent) {}
}
