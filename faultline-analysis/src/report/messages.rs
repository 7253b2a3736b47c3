//! Bug patterns and bug codes contributed by plugin bundles.

use serde::{Deserialize, Serialize};

use faultline_core::types::collections::FxHashMap;

/// Describes one kind of finding a detector may report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugPattern {
    /// Unique pattern type, e.g. `NP_ALWAYS_NULL`.
    #[serde(rename = "type")]
    pub bug_type: String,
    /// Abbreviation of the bug code this pattern belongs to, e.g. `NP`.
    pub abbrev: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: Option<String>,
}

/// Groups related bug patterns under one abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugCode {
    pub abbrev: String,
    #[serde(default)]
    pub description: String,
}

/// Lookup tables for bug patterns (by type) and bug codes (by abbreviation).
#[derive(Debug, Default, Clone)]
pub struct MessageCatalog {
    patterns: FxHashMap<String, BugPattern>,
    codes: FxHashMap<String, BugCode>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern. A later registration of the same type wins.
    pub fn register_pattern(&mut self, pattern: BugPattern) {
        if let Some(previous) = self.patterns.insert(pattern.bug_type.clone(), pattern) {
            tracing::warn!(bug_type = %previous.bug_type, "Bug pattern redefined by a later plugin");
        }
    }

    /// Register a code. A later registration of the same abbreviation wins.
    pub fn register_code(&mut self, code: BugCode) {
        if let Some(previous) = self.codes.insert(code.abbrev.clone(), code) {
            tracing::warn!(abbrev = %previous.abbrev, "Bug code redefined by a later plugin");
        }
    }

    pub fn pattern(&self, bug_type: &str) -> Option<&BugPattern> {
        self.patterns.get(bug_type)
    }

    pub fn code(&self, abbrev: &str) -> Option<&BugCode> {
        self.codes.get(abbrev)
    }

    /// Short description of a pattern, or the raw type when it is unknown.
    pub fn short_description<'a>(&'a self, bug_type: &'a str) -> &'a str {
        match self.patterns.get(bug_type) {
            Some(p) if !p.short_description.is_empty() => &p.short_description,
            _ => bug_type,
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }
}
