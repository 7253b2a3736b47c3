//! Ingestion configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the ingestion stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// File extensions (without the dot) treated as archives.
    /// Default: `jar`, `zip`.
    pub archive_extensions: Vec<String>,
}

impl IngestConfig {
    /// Returns the effective archive extensions, lower-cased.
    pub fn effective_archive_extensions(&self) -> Vec<String> {
        if self.archive_extensions.is_empty() {
            vec!["jar".to_string(), "zip".to_string()]
        } else {
            self.archive_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }
}
