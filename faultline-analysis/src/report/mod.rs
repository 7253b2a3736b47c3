//! Reporting boundary: findings, the bug sink interface, the filter wrapper,
//! and the catalog of bug patterns and codes contributed by plugins.

pub mod bug;
pub mod filter;
pub mod messages;
pub mod sink;

pub use bug::{BugInstance, Priority};
pub use filter::{BugFilter, FilterBugSink, FilterLoader};
pub use messages::{BugCode, BugPattern, MessageCatalog};
pub use sink::{BugSink, MemoryBugSink};
