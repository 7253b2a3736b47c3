//! Detector selection: from registry and selection spec to the detector
//! instances that run for one invocation.

use std::sync::Arc;

use faultline_core::errors::SelectionError;
use faultline_core::types::collections::FxHashSet;

pub use faultline_core::config::SelectionSpec;

use super::registry::DetectorRegistry;
use super::traits::Detector;
use crate::report::BugSink;

/// One instantiated detector and the short name it was created under.
pub struct ActiveDetector {
    pub name: String,
    pub detector: Box<dyn Detector>,
}

/// The detectors of one run, in execution order.
#[derive(Default)]
pub struct ActiveDetectorSet {
    detectors: Vec<ActiveDetector>,
}

impl ActiveDetectorSet {
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Short names in execution order.
    pub fn names(&self) -> Vec<String> {
        self.detectors.iter().map(|d| d.name.clone()).collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActiveDetector> {
        self.detectors.iter_mut()
    }

    fn push(&mut self, name: &str, detector: Box<dyn Detector>) {
        self.detectors.push(ActiveDetector {
            name: name.to_string(),
            detector,
        });
    }
}

impl std::fmt::Debug for ActiveDetectorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.detectors.iter().map(|d| &d.name)).finish()
    }
}

/// Compute the active detector set for a run, each detector bound to `sink`.
///
/// - `AllEnabled`: default-enabled factories, registration order.
/// - `Include`: the named factories, list order; an unknown name fails.
/// - `Exclude`: every factory not named, registration order; the list must
///   name each registered detector at most once.
pub fn select(
    registry: &DetectorRegistry,
    spec: &SelectionSpec,
    sink: &Arc<dyn BugSink>,
) -> Result<ActiveDetectorSet, SelectionError> {
    let mut active = ActiveDetectorSet::default();

    match spec {
        SelectionSpec::AllEnabled => {
            for factory in registry.factories().iter().filter(|f| f.is_enabled()) {
                active.push(factory.short_name(), factory.create(Arc::clone(sink)));
            }
        }
        SelectionSpec::Include(names) => {
            for name in names {
                let factory = registry
                    .lookup(name)
                    .ok_or_else(|| SelectionError::UnknownDetector { name: name.clone() })?;
                active.push(factory.short_name(), factory.create(Arc::clone(sink)));
            }
        }
        SelectionSpec::Exclude(names) => {
            let mut omitted: FxHashSet<&str> = FxHashSet::default();
            for name in names {
                if !omitted.insert(name.as_str()) {
                    return Err(SelectionError::DuplicateOmitted { name: name.clone() });
                }
                if registry.lookup(name).is_none() {
                    return Err(SelectionError::UnknownOmitted { name: name.clone() });
                }
            }

            for factory in registry.factories() {
                if !omitted.contains(factory.short_name()) {
                    active.push(factory.short_name(), factory.create(Arc::clone(sink)));
                }
            }

            let expected = registry.len().saturating_sub(names.len());
            if active.len() != expected || registry.len() < names.len() {
                return Err(SelectionError::OmitCountMismatch {
                    expected,
                    actual: active.len(),
                });
            }
        }
    }

    tracing::debug!(detectors = ?active, "Selected detectors");
    Ok(active)
}
