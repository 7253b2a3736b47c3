//! A single finding.

use serde::{Deserialize, Serialize};

/// Finding priority, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
}

/// One finding emitted by a detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BugInstance {
    /// Bug pattern type, e.g. `NP_NULL_ON_SOME_PATH`.
    pub bug_type: String,
    pub priority: Priority,
    /// Short name of the detector that reported it.
    pub detector: String,
    /// Fully-qualified name of the unit the finding is attributed to.
    pub class_name: String,
    pub source_file: Option<String>,
    pub method: Option<String>,
    pub line: Option<u32>,
    pub message: String,
}

impl BugInstance {
    pub fn new(
        bug_type: impl Into<String>,
        priority: Priority,
        detector: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            bug_type: bug_type.into(),
            priority,
            detector: detector.into(),
            class_name: class_name.into(),
            source_file: None,
            method: None,
            line: None,
            message: String::new(),
        }
    }

    pub fn with_source_file(mut self, source_file: Option<&str>) -> Self {
        self.source_file = source_file.map(String::from);
        self
    }

    pub fn at_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}
