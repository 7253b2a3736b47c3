//! Detector registry: every detector factory known to the process.

use std::path::Path;

use faultline_core::config::PluginConfig;
use faultline_core::errors::RegistryError;
use faultline_core::types::collections::FxHashMap;

use super::factory::{ConstructorCatalog, DetectorFactory};
use super::plugin::{discover_bundles, PluginBundle};
use crate::report::MessageCatalog;

/// Ordered, immutable collection of detector factories.
///
/// Built once at startup and shared read-only by every engine, so it needs
/// no synchronization. Registration order is preserved and drives the order
/// of default and exclusion-mode selection.
#[derive(Debug, Default)]
pub struct DetectorRegistry {
    factories: Vec<DetectorFactory>,
    by_name: FxHashMap<String, usize>,
    messages: MessageCatalog,
    bundles: Vec<String>,
}

impl DetectorRegistry {
    pub fn builder() -> DetectorRegistryBuilder {
        DetectorRegistryBuilder::new()
    }

    /// Load every bundle manifest in `dir` and register its contents.
    ///
    /// An unreadable directory is fatal. A bundle that fails to load is
    /// logged and skipped. A detector name registered twice is fatal.
    pub fn from_plugin_dir(dir: &Path, catalog: &ConstructorCatalog) -> Result<Self, RegistryError> {
        let bundles = discover_bundles(dir, catalog)?;
        let mut builder = Self::builder();
        for bundle in &bundles {
            builder.register_bundle(bundle)?;
        }
        let registry = builder.build();
        tracing::info!(
            plugin_dir = %dir.display(),
            bundles = registry.bundles.len(),
            detectors = registry.len(),
            "Detector registry loaded"
        );
        Ok(registry)
    }

    /// Resolve the plugin directory from configuration and load it.
    pub fn from_config(config: &PluginConfig, catalog: &ConstructorCatalog) -> Result<Self, RegistryError> {
        let dir = config
            .effective_plugin_dir()
            .ok_or(RegistryError::PluginDirNotConfigured)?;
        Self::from_plugin_dir(&dir, catalog)
    }

    /// Look up a factory by short name.
    pub fn lookup(&self, name: &str) -> Option<&DetectorFactory> {
        self.by_name.get(name).map(|&i| &self.factories[i])
    }

    /// All factories in registration order.
    pub fn factories(&self) -> &[DetectorFactory] {
        &self.factories
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Bug patterns and bug codes contributed by the registered bundles.
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Ids of the bundles registered, in load order.
    pub fn bundle_ids(&self) -> &[String] {
        &self.bundles
    }
}

/// Populates a [`DetectorRegistry`]. Once built, the registry is read-only.
#[derive(Debug, Default)]
pub struct DetectorRegistryBuilder {
    registry: DetectorRegistry,
}

impl DetectorRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory. Its name must not be registered yet.
    pub fn register(&mut self, factory: DetectorFactory) -> Result<&mut Self, RegistryError> {
        let name = factory.short_name().to_string();
        if self.registry.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateDetector { name });
        }
        self.registry.by_name.insert(name, self.registry.factories.len());
        self.registry.factories.push(factory);
        Ok(self)
    }

    /// Register a bundle's detectors, bug patterns, and bug codes.
    pub fn register_bundle(&mut self, bundle: &dyn PluginBundle) -> Result<&mut Self, RegistryError> {
        for factory in bundle.detector_factories() {
            self.register(factory)?;
        }
        for pattern in bundle.bug_patterns() {
            self.registry.messages.register_pattern(pattern);
        }
        for code in bundle.bug_codes() {
            self.registry.messages.register_code(code);
        }
        self.registry.bundles.push(bundle.id().to_string());
        Ok(self)
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with_factory(mut self, factory: DetectorFactory) -> Result<Self, RegistryError> {
        self.register(factory)?;
        Ok(self)
    }

    pub fn build(self) -> DetectorRegistry {
        self.registry
    }
}
