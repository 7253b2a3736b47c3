//! Detector factories and the catalog of detector constructors.

use std::fmt;
use std::sync::Arc;

use faultline_core::types::collections::{FxHashMap, SmallVec4};

use super::traits::Detector;
use crate::report::BugSink;

/// Creates a detector instance bound to a bug sink.
pub type DetectorConstructor = Arc<dyn Fn(Arc<dyn BugSink>) -> Box<dyn Detector> + Send + Sync>;

/// Immutable descriptor of one detector: its unique short name, whether it
/// runs by default, and how to construct it.
#[derive(Clone)]
pub struct DetectorFactory {
    short_name: String,
    enabled: bool,
    plugin_id: String,
    reports: SmallVec4<String>,
    constructor: DetectorConstructor,
}

impl DetectorFactory {
    pub fn new<F>(short_name: impl Into<String>, enabled: bool, constructor: F) -> Self
    where
        F: Fn(Arc<dyn BugSink>) -> Box<dyn Detector> + Send + Sync + 'static,
    {
        Self::from_constructor(short_name, enabled, Arc::new(constructor))
    }

    pub fn from_constructor(
        short_name: impl Into<String>,
        enabled: bool,
        constructor: DetectorConstructor,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            enabled,
            plugin_id: String::new(),
            reports: SmallVec4::new(),
            constructor,
        }
    }

    /// Record the bundle that contributed this factory.
    pub fn with_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_id = plugin_id.into();
        self
    }

    /// Record the bug pattern types this detector reports.
    pub fn with_reports<I, S>(mut self, reports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reports = reports.into_iter().map(Into::into).collect();
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    /// Create a new detector bound to `sink`.
    pub fn create(&self, sink: Arc<dyn BugSink>) -> Box<dyn Detector> {
        (self.constructor)(sink)
    }
}

impl fmt::Debug for DetectorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorFactory")
            .field("short_name", &self.short_name)
            .field("enabled", &self.enabled)
            .field("plugin_id", &self.plugin_id)
            .field("reports", &self.reports)
            .finish_non_exhaustive()
    }
}

/// Detector constructors known to the host, keyed by constructor id.
///
/// Plugin manifests name constructors by id. This catalog is what those ids
/// resolve against, in place of loading code at run time.
#[derive(Default, Clone)]
pub struct ConstructorCatalog {
    constructors: FxHashMap<String, DetectorConstructor>,
}

impl ConstructorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constructor. Registering an id twice replaces the earlier one.
    pub fn register<F>(&mut self, id: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(Arc<dyn BugSink>) -> Box<dyn Detector> + Send + Sync + 'static,
    {
        self.constructors.insert(id.into(), Arc::new(constructor));
        self
    }

    pub fn get(&self, id: &str) -> Option<DetectorConstructor> {
        self.constructors.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for ConstructorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.constructors.keys().collect();
        ids.sort();
        f.debug_struct("ConstructorCatalog").field("ids", &ids).finish()
    }
}
