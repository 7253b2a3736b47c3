//! Tests for plugin discovery and the detector registry.

mod common;

use std::path::Path;
use std::sync::Arc;

use faultline_analysis::detectors::{ConstructorCatalog, DetectorRegistry, ManifestBundle};
use faultline_analysis::engine::UnitContext;
use faultline_analysis::{Detector, MemoryBugSink, ProgramUnit};
use faultline_core::config::PluginConfig;
use faultline_core::errors::RegistryError;

use common::{noop_factory, registry_of, scripted_factory, Behavior, CallLog};

fn catalog() -> ConstructorCatalog {
    let mut catalog = ConstructorCatalog::new();
    for id in ["FindNullDeref", "DumbMethods", "SerializableIdiom", "find-dead-stores"] {
        let factory = noop_factory(id, true);
        catalog.register(id, move |sink| factory.create(sink));
    }
    catalog
}

const CORE_MANIFEST: &str = r#"
id = "core"

[[detector]]
name = "FindNullDeref"
reports = ["NP_ALWAYS_NULL"]

[[detector]]
name = "DumbMethods"
enabled = false

[[bug_pattern]]
type = "NP_ALWAYS_NULL"
abbrev = "NP"
category = "CORRECTNESS"
short_description = "Null pointer dereference"

[[bug_code]]
abbrev = "NP"
description = "Null pointer dereference"
"#;

const EXTRA_MANIFEST: &str = r#"
[[detector]]
name = "FindDeadStores"
constructor = "find-dead-stores"
"#;

#[test]
fn test_loads_bundles_in_file_name_order() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("b-extra.toml"), EXTRA_MANIFEST).unwrap();
    std::fs::write(dir.path().join("a-core.toml"), CORE_MANIFEST).unwrap();
    std::fs::write(dir.path().join("README.md"), "not a manifest").unwrap();

    let registry = DetectorRegistry::from_plugin_dir(dir.path(), &catalog()).unwrap();

    let names: Vec<&str> = registry.factories().iter().map(|f| f.short_name()).collect();
    assert_eq!(names, vec!["FindNullDeref", "DumbMethods", "FindDeadStores"]);
    assert_eq!(registry.bundle_ids(), &["core".to_string(), "b-extra".to_string()]);

    let dumb = registry.lookup("DumbMethods").unwrap();
    assert!(!dumb.is_enabled());
    assert_eq!(dumb.plugin_id(), "core");

    let null_deref = registry.lookup("FindNullDeref").unwrap();
    assert_eq!(null_deref.reports(), &["NP_ALWAYS_NULL".to_string()]);

    assert_eq!(
        registry.messages().short_description("NP_ALWAYS_NULL"),
        "Null pointer dereference"
    );
    assert!(registry.messages().code("NP").is_some());
}

#[test]
fn test_bad_bundle_is_skipped() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a-core.toml"), CORE_MANIFEST).unwrap();
    std::fs::write(dir.path().join("b-broken.toml"), "[[detector]\nname = ").unwrap();
    std::fs::write(
        dir.path().join("c-unknown.toml"),
        "[[detector]]\nname = \"Mystery\"\n",
    )
    .unwrap();

    let registry = DetectorRegistry::from_plugin_dir(dir.path(), &catalog()).unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.lookup("Mystery").is_none());
    assert_eq!(registry.bundle_ids(), &["core".to_string()]);
}

#[test]
fn test_missing_plugin_dir_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("no-such-dir");

    let err = DetectorRegistry::from_plugin_dir(&missing, &catalog()).unwrap_err();
    assert!(matches!(err, RegistryError::PluginDirUnreadable { .. }));
}

#[test]
fn test_unconfigured_plugin_dir_is_fatal() {
    let config = PluginConfig::default();
    let err = DetectorRegistry::from_config(&config, &catalog()).unwrap_err();
    assert!(matches!(err, RegistryError::PluginDirNotConfigured));
}

#[test]
fn test_plugin_dir_from_home() {
    let home = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(home.path().join("plugin")).unwrap();
    std::fs::write(home.path().join("plugin").join("core.toml"), CORE_MANIFEST).unwrap();

    let config = PluginConfig {
        home: Some(home.path().to_path_buf()),
        ..Default::default()
    };
    let registry = DetectorRegistry::from_config(&config, &catalog()).unwrap();
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_duplicate_detector_across_bundles_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.toml"), CORE_MANIFEST).unwrap();
    std::fs::write(
        dir.path().join("b.toml"),
        "[[detector]]\nname = \"FindNullDeref\"\n",
    )
    .unwrap();

    let err = DetectorRegistry::from_plugin_dir(dir.path(), &catalog()).unwrap_err();
    match err {
        RegistryError::DuplicateDetector { name } => assert_eq!(name, "FindNullDeref"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_builder_rejects_duplicate_name() {
    let result = DetectorRegistry::builder()
        .with_factory(noop_factory("D1", true))
        .and_then(|b| b.with_factory(noop_factory("D1", false)));
    assert!(matches!(result, Err(RegistryError::DuplicateDetector { .. })));
}

#[test]
fn test_registration_order_preserved() {
    let registry = registry_of(vec![
        noop_factory("Zeta", true),
        noop_factory("Alpha", false),
        noop_factory("Mid", true),
    ]);
    let names: Vec<&str> = registry.factories().iter().map(|f| f.short_name()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    assert!(registry.lookup("Alpha").is_some());
    assert!(registry.lookup("alpha").is_none());
}

#[test]
fn test_manifest_constructor_binds_sink() {
    let log = CallLog::default();
    let mut catalog = ConstructorCatalog::new();
    let factory = scripted_factory("Recorder", true, Behavior::Report, &log);
    catalog.register("recorder", move |sink| factory.create(sink));

    let bundle = ManifestBundle::parse(
        "[[detector]]\nname = \"Recorder\"\nconstructor = \"recorder\"\n",
        Path::new("inline.toml"),
        &catalog,
    )
    .unwrap();
    let mut builder = DetectorRegistry::builder();
    builder.register_bundle(&bundle).unwrap();
    let registry = builder.build();
    assert_eq!(registry.bundle_ids(), &["inline".to_string()]);

    let sink = Arc::new(MemoryBugSink::new());
    let mut detector = registry.lookup("Recorder").unwrap().create(sink.clone());
    let unit = ProgramUnit::new("a.Foo");
    detector.examine(&UnitContext::new(&unit)).unwrap();

    assert_eq!(log.entries(), vec!["Recorder.examine(a.Foo)".to_string()]);
    assert_eq!(sink.findings().len(), 1);
    assert_eq!(sink.findings()[0].detector, "Recorder");
}
