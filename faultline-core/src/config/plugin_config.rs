//! Plugin discovery configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where detector plugin bundles are discovered.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PluginConfig {
    /// Directory holding one manifest per plugin bundle.
    pub plugin_dir: Option<PathBuf>,
    /// Installation root; `<home>/plugin` is used when `plugin_dir` is unset.
    pub home: Option<PathBuf>,
}

impl PluginConfig {
    /// Returns the plugin directory: `plugin_dir`, else `<home>/plugin`.
    pub fn effective_plugin_dir(&self) -> Option<PathBuf> {
        self.plugin_dir
            .clone()
            .or_else(|| self.home.as_ref().map(|h| h.join("plugin")))
    }
}
