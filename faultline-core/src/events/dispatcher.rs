//! ProgressDispatcher: synchronous fan-out to registered progress handlers.

use std::sync::Arc;

use super::handler::ProgressHandler;
use super::types::*;

/// Synchronous dispatcher wrapping a list of handlers.
///
/// With no handlers registered every `emit_*` call is a loop over an empty
/// Vec, which gives the no-op default progress reporter.
#[derive(Default)]
pub struct ProgressDispatcher {
    handlers: Vec<Arc<dyn ProgressHandler>>,
}

impl ProgressDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a progress handler.
    pub fn register(&mut self, handler: Arc<dyn ProgressHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A handler that panics is logged and does not prevent subsequent
    /// handlers from receiving the event.
    fn emit<F: Fn(&dyn ProgressHandler)>(&self, event: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event, "Progress handler panicked; continuing");
            }
        }
    }

    pub fn emit_archives_counted(&self, event: &ArchivesCountedEvent) {
        self.emit("archives_counted", |h| h.on_archives_counted(event));
    }

    pub fn emit_archive_finished(&self, event: &ArchiveFinishedEvent) {
        self.emit("archive_finished", |h| h.on_archive_finished(event));
    }

    pub fn emit_analysis_started(&self, event: &AnalysisStartedEvent) {
        self.emit("analysis_started", |h| h.on_analysis_started(event));
    }

    pub fn emit_unit_finished(&self, event: &UnitFinishedEvent) {
        self.emit("unit_finished", |h| h.on_unit_finished(event));
    }

    pub fn emit_analysis_pass_finished(&self, event: &AnalysisPassFinishedEvent) {
        self.emit("analysis_pass_finished", |h| h.on_analysis_pass_finished(event));
    }

    pub fn emit_detector_failed(&self, event: &DetectorFailedEvent) {
        self.emit("detector_failed", |h| h.on_detector_failed(event));
    }

    pub fn emit_run_cancelled(&self, event: &RunCancelledEvent) {
        self.emit("run_cancelled", |h| h.on_run_cancelled(event));
    }
}
