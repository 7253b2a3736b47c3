//! Top-level Faultline configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DetectorConfig, FilterMode, IngestConfig, PluginConfig, ReportConfig, SelectionSpec};
use crate::errors::{ConfigError, SelectionError};

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "faultline.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FAULTLINE_*`)
/// 3. Project config (`faultline.toml` in project root)
/// 4. User config (`~/.faultline/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FaultlineConfig {
    pub plugins: PluginConfig,
    pub detectors: DetectorConfig,
    pub ingest: IngestConfig,
    pub report: ReportConfig,
}

/// Command line options that override every other layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub plugin_dir: Option<PathBuf>,
    pub visitors: Option<Vec<String>>,
    pub omit_visitors: Option<Vec<String>>,
    pub filter_file: Option<PathBuf>,
    pub filter_mode: Option<FilterMode>,
    pub quiet: Option<bool>,
}

impl FaultlineConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(error = %err, "Ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FaultlineConfig) -> Result<(), ConfigError> {
        if config.detectors.visitors.is_some() && config.detectors.omit_visitors.is_some() {
            return Err(ConfigError::ValidationFailed {
                field: "detectors".to_string(),
                message: "visitors and omit_visitors are mutually exclusive".to_string(),
            });
        }
        if config.report.filter_mode.is_some() && config.report.filter_file.is_none() {
            return Err(ConfigError::ValidationFailed {
                field: "report.filter_mode".to_string(),
                message: "requires report.filter_file".to_string(),
            });
        }
        if config
            .ingest
            .archive_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::ValidationFailed {
                field: "ingest.archive_extensions".to_string(),
                message: "extensions must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.faultline/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FaultlineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FaultlineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if file_config.detectors.visitors.is_some() && file_config.detectors.omit_visitors.is_some()
        {
            return Err(ConfigError::ValidationFailed {
                field: "detectors".to_string(),
                message: format!(
                    "visitors and omit_visitors are mutually exclusive ({})",
                    path.display()
                ),
            });
        }

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut FaultlineConfig, other: &FaultlineConfig) {
        if other.plugins.plugin_dir.is_some() {
            base.plugins.plugin_dir = other.plugins.plugin_dir.clone();
        }
        if other.plugins.home.is_some() {
            base.plugins.home = other.plugins.home.clone();
        }

        // An explicit list in a higher layer replaces both lists below it,
        // so the two modes never end up set together by merging.
        if other.detectors.visitors.is_some() {
            base.detectors.visitors = other.detectors.visitors.clone();
            base.detectors.omit_visitors = None;
        }
        if other.detectors.omit_visitors.is_some() {
            base.detectors.omit_visitors = other.detectors.omit_visitors.clone();
            base.detectors.visitors = None;
        }

        if !other.ingest.archive_extensions.is_empty() {
            base.ingest.archive_extensions = other.ingest.archive_extensions.clone();
        }

        if other.report.filter_file.is_some() {
            base.report.filter_file = other.report.filter_file.clone();
        }
        if other.report.filter_mode.is_some() {
            base.report.filter_mode = other.report.filter_mode;
        }
        if other.report.quiet.is_some() {
            base.report.quiet = other.report.quiet;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut FaultlineConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("FAULTLINE_HOME") {
            config.plugins.home = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FAULTLINE_PLUGIN_DIR") {
            config.plugins.plugin_dir = Some(PathBuf::from(val));
        }
        match (
            std::env::var("FAULTLINE_DETECTORS"),
            std::env::var("FAULTLINE_OMIT_DETECTORS"),
        ) {
            (Ok(_), Ok(_)) => {
                return Err(ConfigError::InvalidValue {
                    field: "FAULTLINE_OMIT_DETECTORS".to_string(),
                    message: "cannot be combined with FAULTLINE_DETECTORS".to_string(),
                });
            }
            (Ok(val), Err(_)) => {
                config.detectors.visitors = Some(DetectorConfig::parse_list(&val));
                config.detectors.omit_visitors = None;
            }
            (Err(_), Ok(val)) => {
                config.detectors.omit_visitors = Some(DetectorConfig::parse_list(&val));
                config.detectors.visitors = None;
            }
            (Err(_), Err(_)) => {}
        }
        if let Ok(val) = std::env::var("FAULTLINE_FILTER_FILE") {
            config.report.filter_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FAULTLINE_FILTER_MODE") {
            let mode = FilterMode::parse(&val).ok_or_else(|| ConfigError::InvalidValue {
                field: "FAULTLINE_FILTER_MODE".to_string(),
                message: format!("expected include or exclude, got {val}"),
            })?;
            config.report.filter_mode = Some(mode);
        }
        if let Ok(val) = std::env::var("FAULTLINE_QUIET") {
            if let Ok(v) = val.parse::<bool>() {
                config.report.quiet = Some(v);
            }
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FaultlineConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.plugin_dir {
            config.plugins.plugin_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.visitors {
            config.detectors.visitors = Some(v.clone());
            config.detectors.omit_visitors = None;
        }
        if let Some(ref v) = cli.omit_visitors {
            config.detectors.omit_visitors = Some(v.clone());
            if cli.visitors.is_none() {
                config.detectors.visitors = None;
            }
        }
        if let Some(ref v) = cli.filter_file {
            config.report.filter_file = Some(v.clone());
        }
        if let Some(v) = cli.filter_mode {
            config.report.filter_mode = Some(v);
        }
        if let Some(v) = cli.quiet {
            config.report.quiet = Some(v);
        }
    }

    /// The detector selection this configuration asks for.
    pub fn selection_spec(&self) -> Result<SelectionSpec, SelectionError> {
        self.detectors.selection_spec()
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.faultline/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".faultline"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
