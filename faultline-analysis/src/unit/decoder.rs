//! Unit decoder interface.
//!
//! Turning the bytes of a compiled unit into a [`ProgramUnit`] is the job of
//! an external decoder. The engine only needs [`UnitDecoder`].

use faultline_core::errors::DecodeError;

use super::types::ProgramUnit;

/// Extension of archive entries and standalone files holding compiled units.
pub const UNIT_EXTENSION: &str = ".class";

/// Decodes one compiled unit.
pub trait UnitDecoder: Send + Sync {
    /// Decode `bytes` read from `source_name` (a file path or archive entry name).
    fn decode(&self, bytes: &[u8], source_name: &str) -> Result<ProgramUnit, DecodeError>;

    /// Whether an archive entry holds a compiled unit. Other entries are skipped.
    fn is_unit_entry(&self, entry_name: &str) -> bool {
        entry_name.ends_with(UNIT_EXTENSION)
    }
}

/// Decoder for unit descriptors written as TOML.
///
/// Hosts that extract class metadata ahead of time, and test fixtures, use
/// this instead of a binary classfile decoder:
///
/// ```toml
/// name = "a.Foo"
/// source_file = "Foo.java"
///
/// [body]
/// super_name = "java.lang.Object"
/// methods = [{ name = "run", descriptor = "()V" }]
/// ```
#[derive(Debug, Clone)]
pub struct TomlUnitDecoder {
    extension: String,
}

impl TomlUnitDecoder {
    pub fn new() -> Self {
        Self {
            extension: UNIT_EXTENSION.to_string(),
        }
    }

    /// Recognize archive entries ending in `extension` instead of `.class`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl Default for TomlUnitDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitDecoder for TomlUnitDecoder {
    fn decode(&self, bytes: &[u8], source_name: &str) -> Result<ProgramUnit, DecodeError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| DecodeError::new(source_name, format!("not UTF-8: {e}")))?;
        let unit: ProgramUnit =
            toml::from_str(text).map_err(|e| DecodeError::new(source_name, e.to_string()))?;
        if unit.name.trim().is_empty() {
            return Err(DecodeError::new(source_name, "unit name is empty"));
        }
        Ok(unit)
    }

    fn is_unit_entry(&self, entry_name: &str) -> bool {
        entry_name.ends_with(&self.extension)
    }
}

/// Render a unit as a TOML descriptor readable by [`TomlUnitDecoder`].
pub fn to_descriptor(unit: &ProgramUnit) -> Result<String, toml::ser::Error> {
    toml::to_string(unit)
}
