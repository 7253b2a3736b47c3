//! Program units: the decoded form of one compiled class, the decoder
//! interface that produces them, and the run-scoped repository that holds them.

pub mod decoder;
pub mod repository;
pub mod types;

pub use decoder::{TomlUnitDecoder, UnitDecoder};
pub use repository::UnitRepository;
pub use types::{MemberInfo, ProgramUnit, UnitBody};
