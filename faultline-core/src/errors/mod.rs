//! Error handling for Faultline.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod config_error;
pub mod decode_error;
pub mod error_code;
pub mod filter_error;
pub mod ingest_error;
pub mod pipeline_error;
pub mod registry_error;
pub mod selection_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use error_code::FaultlineErrorCode;
pub use filter_error::FilterError;
pub use ingest_error::IngestError;
pub use pipeline_error::PipelineError;
pub use registry_error::RegistryError;
pub use selection_error::SelectionError;
