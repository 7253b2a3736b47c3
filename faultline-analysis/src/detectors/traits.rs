//! Detector trait.

use faultline_core::errors::AnalysisError;

use crate::engine::context::UnitContext;

/// Trait that every analysis pass implements.
///
/// A detector is created per run, bound to the run's bug sink, and reports
/// findings through that sink rather than returning them.
pub trait Detector: Send {
    /// Examine one unit.
    ///
    /// Return `AnalysisError::UnitAnalysis` when this particular unit cannot
    /// be analyzed. The failure is logged and the run continues.
    fn examine(&mut self, ctx: &UnitContext<'_>) -> Result<(), AnalysisError>;

    /// Report anything accumulated across units. Called once after the last unit.
    fn finalize(&mut self) -> Result<(), AnalysisError> {
        Ok(())
    }
}
