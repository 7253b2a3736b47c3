//! The per-unit, per-detector execution loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use faultline_core::errors::error_code::INTERNAL_ANALYSIS_ERROR;
use faultline_core::errors::AnalysisError;
use faultline_core::events::types::DetectorFailedEvent;
use faultline_core::events::ProgressDispatcher;
use faultline_core::{Cancellable, CancellationToken, FaultlineErrorCode, PipelineError};

use super::context::UnitContext;
use crate::detectors::ActiveDetectorSet;
use crate::report::BugSink;
use crate::unit::UnitRepository;

/// How one detector call went wrong.
enum Failure {
    Error(AnalysisError),
    Panic(String),
}

/// Runs active detectors over units, isolating every detector failure.
///
/// Detector failures are routed to the sink and never surface as
/// `PipelineError`. Only a missing unit and cancellation stop the loop.
pub struct UnitPipeline<'a> {
    sink: &'a dyn BugSink,
    progress: &'a ProgressDispatcher,
    cancellation: &'a CancellationToken,
    failures: usize,
}

impl<'a> UnitPipeline<'a> {
    pub fn new(
        sink: &'a dyn BugSink,
        progress: &'a ProgressDispatcher,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            sink,
            progress,
            cancellation,
            failures: 0,
        }
    }

    /// Number of detector failures isolated so far.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Run every detector, in selection order, over the unit called `name`.
    pub fn examine_unit(
        &mut self,
        repository: &mut UnitRepository,
        name: &str,
        detectors: &mut ActiveDetectorSet,
    ) -> Result<(), PipelineError> {
        let unit = repository
            .lookup(name)
            .ok_or_else(|| PipelineError::UnitNotFound {
                name: name.to_string(),
            })?;
        repository.record_source_file(&unit.name, unit.source_file.clone());

        let ctx = UnitContext::new(&unit);
        for active in detectors.iter_mut() {
            self.checkpoint()?;

            let detector = &mut active.detector;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| detector.examine(&ctx)));
            if let Some(failure) = Self::failure_of(outcome) {
                self.isolate(&active.name, Some(name), failure);
            }
        }
        Ok(())
    }

    /// Call `finalize` on every detector, in selection order.
    pub fn finalize_all(&mut self, detectors: &mut ActiveDetectorSet) -> Result<(), PipelineError> {
        for active in detectors.iter_mut() {
            self.checkpoint()?;

            let detector = &mut active.detector;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| detector.finalize()));
            if let Some(failure) = Self::failure_of(outcome) {
                self.isolate(&active.name, None, failure);
            }
        }
        Ok(())
    }

    fn checkpoint(&self) -> Result<(), PipelineError> {
        if self.cancellation.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        Ok(())
    }

    fn failure_of(
        outcome: Result<Result<(), AnalysisError>, Box<dyn Any + Send>>,
    ) -> Option<Failure> {
        match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(Failure::Error(err)),
            Err(payload) => Some(Failure::Panic(panic_message(payload.as_ref()))),
        }
    }

    fn isolate(&mut self, detector: &str, unit: Option<&str>, failure: Failure) {
        self.failures += 1;

        let (message, code) = match &failure {
            Failure::Error(err @ AnalysisError::UnitAnalysis { .. }) => {
                (err.to_string(), err.error_code())
            }
            Failure::Error(AnalysisError::Internal { message }) | Failure::Panic(message) => {
                let text = match unit {
                    Some(unit) => format!(
                        "Unexpected analysis failure in detector {detector} on {unit}: {message}"
                    ),
                    None => format!(
                        "Unexpected failure finalizing detector {detector}: {message}"
                    ),
                };
                (text, INTERNAL_ANALYSIS_ERROR)
            }
        };

        match failure {
            Failure::Error(AnalysisError::UnitAnalysis { .. }) => {
                tracing::debug!(detector, unit, error = %message, "Detector could not analyze unit");
            }
            _ => {
                tracing::warn!(detector, unit, error = %message, "Detector failed unexpectedly");
            }
        }

        self.sink.log_error(&message);
        self.progress.emit_detector_failed(&DetectorFailedEvent {
            detector: detector.to_string(),
            unit: unit.map(str::to_string),
            message,
            error_code: code.to_string(),
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "detector panicked".to_string()
    }
}
