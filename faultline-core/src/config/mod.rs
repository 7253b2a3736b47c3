//! Configuration system for Faultline.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod detector_config;
pub mod faultline_config;
pub mod ingest_config;
pub mod plugin_config;
pub mod report_config;

pub use detector_config::{DetectorConfig, SelectionSpec};
pub use faultline_config::{CliOverrides, FaultlineConfig};
pub use ingest_config::IngestConfig;
pub use plugin_config::PluginConfig;
pub use report_config::{ErrorVerbosity, FilterMode, ReportConfig};
