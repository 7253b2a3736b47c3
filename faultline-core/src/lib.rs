//! Faultline core: errors, configuration, progress events, tracing, and
//! cancellation shared by every crate in the workspace.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use errors::{FaultlineErrorCode, PipelineError};
pub use traits::cancellation::{Cancellable, CancellationToken};
