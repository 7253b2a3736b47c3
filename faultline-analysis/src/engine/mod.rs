//! Analysis engine: one complete invocation from selection to the final
//! sink flush.
//!
//! Lifecycle of a run:
//! `Idle -> Ingesting -> Analyzing -> Finalizing -> Flushed`, with
//! `Cancelled` reachable from any non-terminal state and `Failed` reachable
//! from `Ingesting` (input I/O or decode failure) and `Analyzing` (a unit
//! missing from the repository).

pub mod context;
pub mod pipeline;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use faultline_core::config::{ErrorVerbosity, FaultlineConfig, FilterMode, SelectionSpec};
use faultline_core::errors::FilterError;
use faultline_core::events::types::{
    AnalysisPassFinishedEvent, AnalysisStartedEvent, ArchivesCountedEvent, RunCancelledEvent,
    UnitFinishedEvent,
};
use faultline_core::events::{ProgressDispatcher, ProgressHandler};
use faultline_core::{CancellationToken, PipelineError};

use crate::detectors::{select, ActiveDetectorSet, DetectorRegistry};
use crate::ingest::Ingestor;
use crate::report::{BugFilter, BugSink, FilterBugSink, FilterLoader};
use crate::unit::{UnitDecoder, UnitRepository};

pub use context::UnitContext;
pub use pipeline::UnitPipeline;

/// Where the current (or last) run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Ingesting,
    Analyzing,
    Finalizing,
    Flushed,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ingesting => "ingesting",
            Self::Analyzing => "analyzing",
            Self::Finalizing => "finalizing",
            Self::Flushed => "flushed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Flushed | Self::Cancelled | Self::Failed)
    }
}

/// Outcome of a run that reached `Flushed`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub units_analyzed: usize,
    /// Active detectors, in execution order.
    pub detectors: Vec<String>,
    /// Detector failures isolated during the run.
    pub detector_failures: usize,
    pub duration_ms: u64,
}

/// Reusable analysis engine.
///
/// The registry is shared and read-only. The repository, run state and
/// active detectors are rebuilt by every call to [`execute`](Self::execute).
pub struct AnalysisEngine {
    registry: Arc<DetectorRegistry>,
    sink: Arc<dyn BugSink>,
    decoder: Arc<dyn UnitDecoder>,
    selection: SelectionSpec,
    archive_extensions: Vec<String>,
    repository: UnitRepository,
    progress: ProgressDispatcher,
    cancellation: CancellationToken,
    state: RunState,
}

impl AnalysisEngine {
    pub fn new(
        registry: Arc<DetectorRegistry>,
        sink: Arc<dyn BugSink>,
        decoder: Arc<dyn UnitDecoder>,
    ) -> Self {
        Self {
            registry,
            sink,
            decoder,
            selection: SelectionSpec::AllEnabled,
            archive_extensions: vec!["jar".to_string(), "zip".to_string()],
            repository: UnitRepository::new(),
            progress: ProgressDispatcher::new(),
            cancellation: CancellationToken::new(),
            state: RunState::Idle,
        }
    }

    /// Build an engine with the run options of `config` applied.
    ///
    /// A configured filter file needs `filter_loader`.
    pub fn from_config(
        registry: Arc<DetectorRegistry>,
        sink: Arc<dyn BugSink>,
        decoder: Arc<dyn UnitDecoder>,
        config: &FaultlineConfig,
        filter_loader: Option<&dyn FilterLoader>,
    ) -> Result<Self, PipelineError> {
        let mut engine = Self::new(registry, sink, decoder);
        engine.set_selection(config.selection_spec()?);
        engine.set_archive_extensions(config.ingest.effective_archive_extensions());
        engine.set_error_verbosity(config.report.effective_verbosity());

        if let Some(path) = &config.report.filter_file {
            let loader = filter_loader.ok_or_else(|| FilterError::NoLoader { path: path.clone() })?;
            engine.set_filter_from_file(loader, path, config.report.effective_filter_mode())?;
        }

        Ok(engine)
    }

    /// Share `token` with the engine so it can be cancelled from elsewhere.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_selection(mut self, selection: SelectionSpec) -> Self {
        self.selection = selection;
        self
    }

    pub fn set_selection(&mut self, selection: SelectionSpec) {
        self.selection = selection;
    }

    pub fn selection(&self) -> &SelectionSpec {
        &self.selection
    }

    /// Route findings through `filter` before they reach the current sink.
    pub fn set_filter(&mut self, filter: Arc<dyn BugFilter>, mode: FilterMode) {
        let inner = Arc::clone(&self.sink);
        self.sink = Arc::new(FilterBugSink::new(inner, filter, mode));
    }

    pub fn set_filter_from_file(
        &mut self,
        loader: &dyn FilterLoader,
        path: &Path,
        mode: FilterMode,
    ) -> Result<(), FilterError> {
        let filter = loader.load(path)?;
        self.set_filter(filter, mode);
        Ok(())
    }

    pub fn set_error_verbosity(&mut self, level: ErrorVerbosity) {
        self.sink.set_error_verbosity(level);
    }

    /// Extensions (without the dot) of inputs opened as archives.
    pub fn set_archive_extensions(&mut self, extensions: Vec<String>) {
        self.archive_extensions = extensions;
    }

    pub fn add_progress_handler(&mut self, handler: Arc<dyn ProgressHandler>) {
        self.progress.register(handler);
    }

    /// A handle that cancels the current run from any thread.
    ///
    /// The flag stays set after the run unwinds; call `reset` on the token
    /// before reusing the engine.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    /// The sink findings are routed to, including any filter wrapper.
    pub fn sink(&self) -> &Arc<dyn BugSink> {
        &self.sink
    }

    pub fn repository(&self) -> &UnitRepository {
        &self.repository
    }

    /// Source file of a unit examined by the last run.
    pub fn source_file(&self, class_name: &str) -> Option<&str> {
        self.repository.source_file(class_name)
    }

    /// Run one complete analysis over `inputs`.
    ///
    /// Selection errors are returned before the run starts and leave the
    /// state at `Idle`. Once a run has started, errors move it to
    /// `Cancelled` or `Failed`.
    pub fn execute<P: AsRef<Path>>(&mut self, inputs: &[P]) -> Result<RunSummary, PipelineError> {
        self.state = RunState::Idle;
        let mut detectors = select(&self.registry, &self.selection, &self.sink)?;

        match self.run(inputs, &mut detectors) {
            Ok(summary) => Ok(summary),
            Err(err) => {
                let stage = self.state;
                if err.is_cancelled() {
                    tracing::info!(stage = stage.name(), "Analysis run cancelled");
                    self.state = RunState::Cancelled;
                    self.progress.emit_run_cancelled(&RunCancelledEvent {
                        stage: stage.name().to_string(),
                    });
                } else {
                    tracing::error!(stage = stage.name(), error = %err, "Analysis run failed");
                    self.state = RunState::Failed;
                }
                Err(err)
            }
        }
    }

    fn run<P: AsRef<Path>>(
        &mut self,
        inputs: &[P],
        detectors: &mut ActiveDetectorSet,
    ) -> Result<RunSummary, PipelineError> {
        let start = Instant::now();

        self.state = RunState::Ingesting;
        self.progress
            .emit_archives_counted(&ArchivesCountedEvent { count: inputs.len() });
        let units = Ingestor::new(
            self.decoder.as_ref(),
            &self.archive_extensions,
            &self.cancellation,
            &self.progress,
        )
        .ingest(inputs, &mut self.repository)?;

        self.state = RunState::Analyzing;
        self.progress.emit_analysis_started(&AnalysisStartedEvent {
            unit_count: units.len(),
        });

        let mut pipeline = UnitPipeline::new(self.sink.as_ref(), &self.progress, &self.cancellation);
        for (index, name) in units.iter().enumerate() {
            pipeline.examine_unit(&mut self.repository, name, detectors)?;
            self.progress.emit_unit_finished(&UnitFinishedEvent {
                unit: name.clone(),
                position: index + 1,
                total: units.len(),
            });
        }
        self.progress
            .emit_analysis_pass_finished(&AnalysisPassFinishedEvent {
                units: units.len(),
                duration_ms: start.elapsed().as_millis() as u64,
            });

        self.state = RunState::Finalizing;
        pipeline.finalize_all(detectors)?;
        let detector_failures = pipeline.failures();

        self.sink.finish();
        self.sink.report_queued_errors();
        self.state = RunState::Flushed;

        let summary = RunSummary {
            units_analyzed: units.len(),
            detectors: detectors.names(),
            detector_failures,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        tracing::info!(
            units = summary.units_analyzed,
            detectors = summary.detectors.len(),
            failures = summary.detector_failures,
            duration_ms = summary.duration_ms,
            "Analysis run complete"
        );
        Ok(summary)
    }
}
