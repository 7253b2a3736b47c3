//! Bug sink interface and the in-memory reference sink.

use std::sync::{Mutex, MutexGuard};

use faultline_core::config::ErrorVerbosity;

use super::bug::BugInstance;

/// The findings and diagnostics output boundary.
///
/// Every detector of a run holds the same sink, so methods take `&self`
/// and implementations serialize concurrent writers themselves.
pub trait BugSink: Send + Sync {
    /// Accept one finding.
    fn report(&self, bug: BugInstance);

    /// Queue an error or diagnostic message.
    fn log_error(&self, message: &str);

    /// Flush accumulated findings.
    fn finish(&self);

    /// Flush accumulated error and diagnostic messages.
    fn report_queued_errors(&self);

    /// Adjust how much diagnostic output the sink emits.
    fn set_error_verbosity(&self, _level: ErrorVerbosity) {}
}

#[derive(Debug, Default)]
struct MemoryState {
    pending: Vec<BugInstance>,
    flushed: Vec<BugInstance>,
    queued_errors: Vec<String>,
    reported_errors: Vec<String>,
    verbosity: ErrorVerbosity,
}

/// Sink that keeps everything in memory.
///
/// `finish` moves pending findings to the flushed list.
/// `report_queued_errors` emits queued messages through `tracing` (unless
/// silent) and keeps them for inspection.
#[derive(Debug, Default)]
pub struct MemoryBugSink {
    state: Mutex<MemoryState>,
}

impl MemoryBugSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every finding received so far, flushed first, in arrival order.
    pub fn findings(&self) -> Vec<BugInstance> {
        let state = self.state();
        state.flushed.iter().chain(state.pending.iter()).cloned().collect()
    }

    /// Findings flushed by `finish`.
    pub fn flushed_findings(&self) -> Vec<BugInstance> {
        self.state().flushed.clone()
    }

    /// Every error message logged so far, reported first.
    pub fn errors(&self) -> Vec<String> {
        let state = self.state();
        state
            .reported_errors
            .iter()
            .chain(state.queued_errors.iter())
            .cloned()
            .collect()
    }

    /// Errors still waiting for `report_queued_errors`.
    pub fn queued_error_count(&self) -> usize {
        self.state().queued_errors.len()
    }

    pub fn verbosity(&self) -> ErrorVerbosity {
        self.state().verbosity
    }

    /// Forget everything, keeping the verbosity.
    pub fn clear(&self) {
        let mut state = self.state();
        let verbosity = state.verbosity;
        *state = MemoryState {
            verbosity,
            ..Default::default()
        };
    }

    /// Flushed findings as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.state().flushed)
    }
}

impl BugSink for MemoryBugSink {
    fn report(&self, bug: BugInstance) {
        self.state().pending.push(bug);
    }

    fn log_error(&self, message: &str) {
        self.state().queued_errors.push(message.to_string());
    }

    fn finish(&self) {
        let mut state = self.state();
        let pending = std::mem::take(&mut state.pending);
        state.flushed.extend(pending);
    }

    fn report_queued_errors(&self) {
        let mut state = self.state();
        let queued = std::mem::take(&mut state.queued_errors);
        if state.verbosity != ErrorVerbosity::Silent {
            for message in &queued {
                tracing::error!(target: "faultline_analysis::report", "{message}");
            }
        }
        state.reported_errors.extend(queued);
    }

    fn set_error_verbosity(&self, level: ErrorVerbosity) {
        self.state().verbosity = level;
    }
}
