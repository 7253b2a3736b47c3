//! Per-unit analysis context handed to detectors.

use crate::unit::{ProgramUnit, UnitBody};

/// Everything a detector may look at while examining one unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitContext<'a> {
    unit: &'a ProgramUnit,
}

impl<'a> UnitContext<'a> {
    pub fn new(unit: &'a ProgramUnit) -> Self {
        Self { unit }
    }

    /// Fully-qualified unit name.
    pub fn name(&self) -> &'a str {
        &self.unit.name
    }

    pub fn source_file(&self) -> Option<&'a str> {
        self.unit.source_file.as_deref()
    }

    /// Decoder-produced structural body.
    pub fn body(&self) -> &'a UnitBody {
        &self.unit.body
    }

    pub fn unit(&self) -> &'a ProgramUnit {
        self.unit
    }
}
