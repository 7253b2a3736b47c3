//! Faultline analysis engine.
//!
//! Loads detector factories from plugin bundles into a [`DetectorRegistry`],
//! selects the detectors for a run, ingests program units from archives and
//! single files into a [`UnitRepository`], runs every selected detector over
//! every unit with per-detector failure isolation, and routes findings to a
//! [`BugSink`].

pub mod detectors;
pub mod engine;
pub mod ingest;
pub mod report;
pub mod unit;

pub use detectors::{
    ActiveDetectorSet, ConstructorCatalog, Detector, DetectorFactory, DetectorRegistry,
    SelectionSpec,
};
pub use engine::{AnalysisEngine, RunState, RunSummary};
pub use report::{BugInstance, BugSink, MemoryBugSink};
pub use unit::{ProgramUnit, UnitDecoder, UnitRepository};
