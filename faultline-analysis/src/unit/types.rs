//! Program unit types.

use serde::{Deserialize, Serialize};

/// One field or method declared by a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    /// Type descriptor, e.g. `(Ljava/lang/String;)V`.
    #[serde(default)]
    pub descriptor: String,
    #[serde(default)]
    pub access_flags: u16,
}

/// Structural body of a decoded unit, consumed by detectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitBody {
    pub access_flags: u16,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<MemberInfo>,
    pub methods: Vec<MemberInfo>,
}

/// The decoded representation of one compiled unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramUnit {
    /// Fully-qualified name, unique within a run (e.g. `a.Foo`).
    pub name: String,
    /// Declared source-file name, when the unit carries one.
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub body: UnitBody,
}

impl ProgramUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_file: None,
            body: UnitBody::default(),
        }
    }

    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = Some(source_file.into());
        self
    }

    pub fn with_body(mut self, body: UnitBody) -> Self {
        self.body = body;
        self
    }

    /// Package part of the name, empty for the default package.
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }
}
