//! Configuration loading and precedence tests

use nutest_config::{ColorMode, ConfigError, ConfigLoader, RunnerConfig, CONFIG_FILE_NAME};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> std::path::PathBuf {
    let config_path = dir.join(CONFIG_FILE_NAME);
    fs::write(&config_path, content).unwrap();
    config_path
}

fn clear_env() {
    for key in [
        "NUTEST_COLOR",
        "NUTEST_DESCRIPTIONS",
        "NUTEST_FAILURE_DETAILS",
        "NUTEST_TIMINGS",
        "NO_COLOR",
    ] {
        env::remove_var(key);
    }
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
#[serial]
fn test_load_when_no_config_exists() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let mut loader = ConfigLoader::new();
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert_eq!(config, RunnerConfig::default());
    assert!(loader.loaded_from().is_none());
}

#[test]
#[serial]
fn test_load_full_output_table() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[output]
color = "disabled"
descriptions = true
failure_details = false
timings = false
"#,
    );

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(
        config,
        RunnerConfig {
            color: ColorMode::Disabled,
            descriptions: true,
            failure_details: false,
            timings: false,
        }
    );
}

#[test]
#[serial]
fn test_load_with_empty_config() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let mut loader = ConfigLoader::new();
    let config = loader.load_from_directory(temp_dir.path()).unwrap();

    assert_eq!(config, RunnerConfig::default());
    assert!(loader.loaded_from().is_some());
}

#[test]
#[serial]
fn test_invalid_toml_reports_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    let path = create_config_file(temp_dir.path(), "[output\ncolor = ");

    let err = ConfigLoader::new().load_from_file(&path).unwrap_err();

    match err {
        ConfigError::TomlParseError { file, .. } => assert_eq!(file, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[serial]
fn test_invalid_color_value_in_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[output]
color = "rainbow"
"#,
    );

    let result = ConfigLoader::new().load_from_directory(temp_dir.path());
    assert!(matches!(result, Err(ConfigError::TomlParseError { .. })));
}

// ============================================================================
// Precedence Tests
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_project_file() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[output]
descriptions = false
timings = true
"#,
    );

    env::set_var("NUTEST_DESCRIPTIONS", "true");
    env::set_var("NUTEST_TIMINGS", "off");

    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    clear_env();
    let config = config.unwrap();

    assert!(config.descriptions);
    assert!(!config.timings);
}

#[test]
#[serial]
fn test_no_color_wins_over_nutest_color() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    env::set_var("NUTEST_COLOR", "enabled");
    env::set_var("NO_COLOR", "");

    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    clear_env();

    assert_eq!(config.unwrap().color, ColorMode::Disabled);
}

#[test]
#[serial]
fn test_cli_flags_override_everything() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[output]
color = "enabled"
"#,
    );

    let config = ConfigLoader::new()
        .load_from_directory(temp_dir.path())
        .unwrap()
        .with_color(ColorMode::Disabled)
        .with_descriptions(true);

    assert_eq!(config.color, ColorMode::Disabled);
    assert!(config.descriptions);
}
