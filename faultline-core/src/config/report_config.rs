//! Reporting configuration: filter file and error verbosity.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a bug filter is applied to findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only findings the filter matches.
    Include,
    /// Drop findings the filter matches.
    Exclude,
}

impl FilterMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "include" => Some(Self::Include),
            "exclude" => Some(Self::Exclude),
            _ => None,
        }
    }
}

/// How much error/diagnostic output a bug sink emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorVerbosity {
    Silent,
    #[default]
    Normal,
}

/// Configuration for the reporting boundary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Filter definition file.
    pub filter_file: Option<PathBuf>,
    /// Filter mode. Default: exclude.
    pub filter_mode: Option<FilterMode>,
    /// Suppress error messages. Default: false.
    pub quiet: Option<bool>,
}

impl ReportConfig {
    pub fn effective_filter_mode(&self) -> FilterMode {
        self.filter_mode.unwrap_or(FilterMode::Exclude)
    }

    pub fn effective_verbosity(&self) -> ErrorVerbosity {
        if self.quiet.unwrap_or(false) {
            ErrorVerbosity::Silent
        } else {
            ErrorVerbosity::Normal
        }
    }
}
