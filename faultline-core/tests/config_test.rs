//! Tests for the Faultline configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use faultline_core::config::{CliOverrides, ErrorVerbosity, FaultlineConfig, FilterMode, SelectionSpec};
use faultline_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all FAULTLINE_ env vars to prevent cross-test contamination.
fn clear_env_vars() {
    for key in [
        "FAULTLINE_HOME",
        "FAULTLINE_PLUGIN_DIR",
        "FAULTLINE_DETECTORS",
        "FAULTLINE_OMIT_DETECTORS",
        "FAULTLINE_FILTER_FILE",
        "FAULTLINE_FILTER_MODE",
        "FAULTLINE_QUIET",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("faultline.toml"),
        r#"
[plugins]
plugin_dir = "/opt/project/plugins"

[detectors]
omit_visitors = ["DumbMethods"]

[report]
quiet = false
"#,
    )
    .unwrap();

    std::env::set_var("FAULTLINE_PLUGIN_DIR", "/env/plugins");

    let cli = CliOverrides {
        quiet: Some(true),
        ..Default::default()
    };

    let config = FaultlineConfig::load(dir.path(), Some(&cli)).unwrap();

    // Env beats project.
    assert_eq!(
        config.plugins.effective_plugin_dir(),
        Some(PathBuf::from("/env/plugins"))
    );
    // CLI beats project.
    assert_eq!(config.report.effective_verbosity(), ErrorVerbosity::Silent);
    // Untouched project value survives.
    assert_eq!(
        config.detectors.selection_spec().unwrap(),
        SelectionSpec::Exclude(vec!["DumbMethods".to_string()])
    );

    clear_env_vars();
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let config = FaultlineConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.plugins.effective_plugin_dir(), None);
    assert_eq!(config.detectors.selection_spec().unwrap(), SelectionSpec::AllEnabled);
    assert_eq!(
        config.ingest.effective_archive_extensions(),
        vec!["jar".to_string(), "zip".to_string()]
    );
    assert_eq!(config.report.effective_verbosity(), ErrorVerbosity::Normal);
    assert_eq!(config.report.effective_filter_mode(), FilterMode::Exclude);
}

#[test]
fn test_home_env_derives_plugin_dir() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::env::set_var("FAULTLINE_HOME", "/usr/local/faultline");
    let config = FaultlineConfig::load(dir.path(), None).unwrap();
    assert_eq!(
        config.plugins.effective_plugin_dir(),
        Some(PathBuf::from("/usr/local/faultline/plugin"))
    );

    clear_env_vars();
}

#[test]
fn test_env_detector_list_replaces_project_omit_list() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("faultline.toml"),
        "[detectors]\nomit_visitors = [\"D1\"]\n",
    )
    .unwrap();
    std::env::set_var("FAULTLINE_DETECTORS", "D3,D1");

    let config = FaultlineConfig::load(dir.path(), None).unwrap();
    assert_eq!(
        config.detectors.selection_spec().unwrap(),
        SelectionSpec::Include(vec!["D3".to_string(), "D1".to_string()])
    );

    clear_env_vars();
}

#[test]
fn test_both_env_lists_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::env::set_var("FAULTLINE_DETECTORS", "D1");
    std::env::set_var("FAULTLINE_OMIT_DETECTORS", "D2");

    let result = FaultlineConfig::load(dir.path(), None);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    clear_env_vars();
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("faultline.toml"), "this is not valid toml {{{{").unwrap();

    match FaultlineConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { .. }) => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_both_lists_in_one_file_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("faultline.toml"),
        "[detectors]\nvisitors = [\"D1\"]\nomit_visitors = [\"D2\"]\n",
    )
    .unwrap();

    match FaultlineConfig::load(dir.path(), None) {
        Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, "detectors"),
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_cli_lists_both_set_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let cli = CliOverrides {
        visitors: Some(vec!["D1".into()]),
        omit_visitors: Some(vec!["D2".into()]),
        ..Default::default()
    };
    assert!(matches!(
        FaultlineConfig::load(dir.path(), Some(&cli)),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn test_filter_mode_requires_file() {
    let result = FaultlineConfig::from_toml("[report]\nfilter_mode = \"include\"\n");
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "report.filter_mode")
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }

    let ok = FaultlineConfig::from_toml(
        "[report]\nfilter_file = \"bugs.xml\"\nfilter_mode = \"include\"\n",
    )
    .unwrap();
    assert_eq!(ok.report.effective_filter_mode(), FilterMode::Include);
}

#[test]
fn test_unknown_keys_ignored_and_round_trip() {
    let config = FaultlineConfig::from_toml(
        r#"
[ingest]
archive_extensions = [".JAR", "war"]

[future_section]
anything = 1
"#,
    )
    .unwrap();
    assert_eq!(
        config.ingest.effective_archive_extensions(),
        vec!["jar".to_string(), "war".to_string()]
    );

    let text = config.to_toml().unwrap();
    let reparsed = FaultlineConfig::from_toml(&text).unwrap();
    assert_eq!(reparsed.ingest.archive_extensions, config.ingest.archive_extensions);
}
