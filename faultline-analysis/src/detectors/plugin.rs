//! Plugin bundles.
//!
//! A plugin directory holds one TOML manifest per bundle. A manifest lists
//! the detectors the bundle provides (by constructor id, resolved against the
//! host's [`ConstructorCatalog`]) plus the bug patterns and bug codes those
//! detectors report:
//!
//! ```toml
//! id = "core"
//!
//! [[detector]]
//! name = "FindNullDeref"
//! enabled = true
//! reports = ["NP_ALWAYS_NULL"]
//!
//! [[bug_pattern]]
//! type = "NP_ALWAYS_NULL"
//! abbrev = "NP"
//! category = "CORRECTNESS"
//!
//! [[bug_code]]
//! abbrev = "NP"
//! description = "Null pointer dereference"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use faultline_core::errors::RegistryError;

use super::factory::{ConstructorCatalog, DetectorFactory};
use crate::report::{BugCode, BugPattern};

/// Extension of bundle manifests inside a plugin directory.
pub const MANIFEST_EXTENSION: &str = "toml";

/// Everything one plugin contributes to the registry.
pub trait PluginBundle {
    fn id(&self) -> &str;

    fn detector_factories(&self) -> Vec<DetectorFactory>;

    fn bug_patterns(&self) -> Vec<BugPattern> {
        Vec::new()
    }

    fn bug_codes(&self) -> Vec<BugCode> {
        Vec::new()
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    id: Option<String>,
    #[serde(default, rename = "detector")]
    detectors: Vec<DetectorEntry>,
    #[serde(default, rename = "bug_pattern")]
    bug_patterns: Vec<BugPattern>,
    #[serde(default, rename = "bug_code")]
    bug_codes: Vec<BugCode>,
}

#[derive(Debug, Deserialize)]
struct DetectorEntry {
    name: String,
    /// Constructor id; defaults to `name`.
    constructor: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    reports: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

/// A bundle read from a manifest file, with constructors already resolved.
#[derive(Debug, Clone)]
pub struct ManifestBundle {
    id: String,
    path: PathBuf,
    factories: Vec<DetectorFactory>,
    patterns: Vec<BugPattern>,
    codes: Vec<BugCode>,
}

impl ManifestBundle {
    /// Read and resolve one manifest.
    pub fn load(path: &Path, catalog: &ConstructorCatalog) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::BundleLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path, catalog)
    }

    /// Resolve a manifest already in memory. `path` is used for the default
    /// id and for error messages.
    pub fn parse(content: &str, path: &Path, catalog: &ConstructorCatalog) -> Result<Self, RegistryError> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| RegistryError::BundleLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let id = manifest.id.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        let mut factories = Vec::with_capacity(manifest.detectors.len());
        for entry in manifest.detectors {
            let constructor_id = entry.constructor.as_deref().unwrap_or(&entry.name);
            let constructor =
                catalog
                    .get(constructor_id)
                    .ok_or_else(|| RegistryError::UnknownConstructor {
                        bundle: id.clone(),
                        constructor: constructor_id.to_string(),
                    })?;
            factories.push(
                DetectorFactory::from_constructor(entry.name, entry.enabled, constructor)
                    .with_plugin(id.clone())
                    .with_reports(entry.reports),
            );
        }

        Ok(Self {
            id,
            path: path.to_path_buf(),
            factories,
            patterns: manifest.bug_patterns,
            codes: manifest.bug_codes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PluginBundle for ManifestBundle {
    fn id(&self) -> &str {
        &self.id
    }

    fn detector_factories(&self) -> Vec<DetectorFactory> {
        self.factories.clone()
    }

    fn bug_patterns(&self) -> Vec<BugPattern> {
        self.patterns.clone()
    }

    fn bug_codes(&self) -> Vec<BugCode> {
        self.codes.clone()
    }
}

/// Load every bundle manifest in `dir`, in file-name order.
///
/// Fails only when the directory itself cannot be read. Manifests that fail
/// to load are logged and skipped; files with other extensions are ignored.
pub fn discover_bundles(dir: &Path, catalog: &ConstructorCatalog) -> Result<Vec<ManifestBundle>, RegistryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| RegistryError::PluginDirUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut manifests: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                let is_manifest = path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION));
                if is_manifest {
                    manifests.push(path);
                }
            }
            Err(e) => {
                tracing::warn!(plugin_dir = %dir.display(), error = %e, "Skipping unreadable plugin directory entry");
            }
        }
    }
    manifests.sort();

    let mut bundles = Vec::with_capacity(manifests.len());
    for path in manifests {
        match ManifestBundle::load(&path, catalog) {
            Ok(bundle) => {
                tracing::info!(
                    plugin = %bundle.id,
                    detectors = bundle.factories.len(),
                    "Loaded plugin bundle"
                );
                bundles.push(bundle);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load plugin; skipping");
            }
        }
    }
    Ok(bundles)
}
