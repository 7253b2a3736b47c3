//! Filter wrapper around a bug sink.
//!
//! The filter language is external: a [`FilterLoader`] turns a filter
//! definition file into a [`BugFilter`] predicate.

use std::path::Path;
use std::sync::Arc;

use faultline_core::config::{ErrorVerbosity, FilterMode};
use faultline_core::errors::FilterError;

use super::bug::BugInstance;
use super::sink::BugSink;

/// Predicate over findings.
pub trait BugFilter: Send + Sync {
    fn matches(&self, bug: &BugInstance) -> bool;
}

impl<F> BugFilter for F
where
    F: Fn(&BugInstance) -> bool + Send + Sync,
{
    fn matches(&self, bug: &BugInstance) -> bool {
        self(bug)
    }
}

/// Builds a filter from a filter definition file.
pub trait FilterLoader {
    fn load(&self, path: &Path) -> Result<Arc<dyn BugFilter>, FilterError>;
}

/// Sink that forwards only the findings admitted by its filter.
/// Errors and flushes pass through untouched.
pub struct FilterBugSink {
    inner: Arc<dyn BugSink>,
    filter: Arc<dyn BugFilter>,
    mode: FilterMode,
}

impl FilterBugSink {
    pub fn new(inner: Arc<dyn BugSink>, filter: Arc<dyn BugFilter>, mode: FilterMode) -> Self {
        Self {
            inner,
            filter,
            mode,
        }
    }

    /// Load the filter at `path` and wrap `inner` with it.
    pub fn from_file(
        inner: Arc<dyn BugSink>,
        loader: &dyn FilterLoader,
        path: &Path,
        mode: FilterMode,
    ) -> Result<Self, FilterError> {
        let filter = loader.load(path)?;
        Ok(Self::new(inner, filter, mode))
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    fn admits(&self, bug: &BugInstance) -> bool {
        let matched = self.filter.matches(bug);
        match self.mode {
            FilterMode::Include => matched,
            FilterMode::Exclude => !matched,
        }
    }
}

impl BugSink for FilterBugSink {
    fn report(&self, bug: BugInstance) {
        if self.admits(&bug) {
            self.inner.report(bug);
        }
    }

    fn log_error(&self, message: &str) {
        self.inner.log_error(message);
    }

    fn finish(&self) {
        self.inner.finish();
    }

    fn report_queued_errors(&self) {
        self.inner.report_queued_errors();
    }

    fn set_error_verbosity(&self, level: ErrorVerbosity) {
        self.inner.set_error_verbosity(level);
    }
}
