//! Progress events emitted at run lifecycle milestones.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::ProgressDispatcher;
pub use handler::ProgressHandler;
