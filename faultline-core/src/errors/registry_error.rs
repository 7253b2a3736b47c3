//! Detector registry and plugin loading errors.

use std::path::PathBuf;

use super::error_code::{self, FaultlineErrorCode};

/// Errors raised while building the detector registry at startup.
///
/// `BundleLoad` and `UnknownConstructor` are per-bundle failures: the loader
/// logs them and skips the bundle. The remaining variants abort startup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Detector {name} is already registered")]
    DuplicateDetector { name: String },

    #[error("No plugin directory configured (set plugins.plugin_dir or FAULTLINE_HOME)")]
    PluginDirNotConfigured,

    #[error("The path {path} does not seem to be a plugin directory: {source}")]
    PluginDirUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not load plugin {path}: {message}")]
    BundleLoad { path: PathBuf, message: String },

    #[error("Plugin {bundle} references unknown detector constructor {constructor}")]
    UnknownConstructor { bundle: String, constructor: String },
}

impl FaultlineErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateDetector { .. } => error_code::DUPLICATE_DETECTOR,
            Self::PluginDirNotConfigured | Self::PluginDirUnreadable { .. } => {
                error_code::PLUGIN_DIR_ERROR
            }
            _ => error_code::REGISTRY_ERROR,
        }
    }
}
