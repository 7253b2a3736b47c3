//! Run-scoped repository of decoded program units.

use std::sync::Arc;

use faultline_core::types::collections::FxHashMap;

use super::types::ProgramUnit;

/// Mapping from fully-qualified name to decoded unit, plus the
/// name to source-file table used for report attribution.
///
/// One repository belongs to one run at a time. The engine clears it before
/// ingestion, so nothing leaks from a previous run.
#[derive(Debug, Default)]
pub struct UnitRepository {
    units: FxHashMap<String, Arc<ProgramUnit>>,
    source_files: FxHashMap<String, Option<String>>,
}

impl UnitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every unit and every recorded source-file mapping.
    pub fn clear(&mut self) {
        self.units.clear();
        self.source_files.clear();
    }

    /// Insert a unit, returning the unit it replaced, if any.
    pub fn add(&mut self, unit: ProgramUnit) -> Option<Arc<ProgramUnit>> {
        self.units.insert(unit.name.clone(), Arc::new(unit))
    }

    /// Resolve a unit by fully-qualified name.
    pub fn lookup(&self, name: &str) -> Option<Arc<ProgramUnit>> {
        self.units.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Record (or refresh) the source file of an examined unit.
    pub fn record_source_file(&mut self, name: &str, source_file: Option<String>) {
        self.source_files.insert(name.to_string(), source_file);
    }

    /// Source file of a unit examined during the current run.
    ///
    /// `None` both for units not examined yet and for units that declare no
    /// source file.
    pub fn source_file(&self, name: &str) -> Option<&str> {
        self.source_files.get(name).and_then(|s| s.as_deref())
    }
}
