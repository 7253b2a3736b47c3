//! Detector system.
//!
//! Detectors are pluggable analysis passes. Each one is described by a
//! [`DetectorFactory`], registered once at startup in the [`DetectorRegistry`]
//! (usually from the plugin bundles found in a plugin directory), and
//! instantiated per run by the selector.

pub mod factory;
pub mod plugin;
pub mod registry;
pub mod selector;
pub mod traits;

pub use factory::{ConstructorCatalog, DetectorConstructor, DetectorFactory};
pub use plugin::{discover_bundles, ManifestBundle, PluginBundle};
pub use registry::{DetectorRegistry, DetectorRegistryBuilder};
pub use selector::{select, ActiveDetector, ActiveDetectorSet, SelectionSpec};
pub use traits::Detector;
