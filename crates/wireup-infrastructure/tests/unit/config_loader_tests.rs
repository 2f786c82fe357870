//! Configuration Loader Tests

use std::env;
use std::fs;

use tempfile::TempDir;
use wireup_domain::{Error, Scope};
use wireup_infrastructure::config::{AppConfig, ConfigLoader, InjectorConfig};
use wireup_infrastructure::constants::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_RESOLUTION_DEPTH};

/// Helper to set env var
fn set_env(key: &str, value: &str) {
    // SAFETY: every test uses its own prefix, so no two tests touch the same variable
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to remove env var
fn remove_env(key: &str) {
    // SAFETY: see `set_env`
    unsafe {
        env::remove_var(key);
    }
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("wireup.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_defaults_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .with_env_prefix("WIREUP_TEST_DEFAULTS")
        .load()
        .unwrap();

    assert_eq!(config.injector, InjectorConfig::default());
    assert_eq!(config.injector.max_resolution_depth, DEFAULT_MAX_RESOLUTION_DEPTH);
    assert_eq!(config.injector.implicit_scope, Scope::Singleton);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_file_values_are_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[injector]
implicit_scope = "unscoped"
max_resolution_depth = 32

[logging]
level = "debug"
json_format = true
"#,
    );

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("WIREUP_TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(loader.config_path(), Some(path.as_path()));
    assert_eq!(config.injector.implicit_scope, Scope::Unscoped);
    assert_eq!(config.injector.max_resolution_depth, 32);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[logging]\nlevel = \"warn\"\n");

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("WIREUP_TEST_PARTIAL")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.injector, InjectorConfig::default());
}

#[test]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[injector]\nmax_resolution_depth = 32\n");

    set_env("WIREUP_TEST_ENV__INJECTOR__MAX_RESOLUTION_DEPTH", "8");
    set_env("WIREUP_TEST_ENV__INJECTOR__IMPLICIT_SCOPE", "unscoped");
    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("WIREUP_TEST_ENV")
        .load();
    remove_env("WIREUP_TEST_ENV__INJECTOR__MAX_RESOLUTION_DEPTH");
    remove_env("WIREUP_TEST_ENV__INJECTOR__IMPLICIT_SCOPE");

    let config = result.unwrap();
    assert_eq!(config.injector.max_resolution_depth, 8);
    assert_eq!(config.injector.implicit_scope, Scope::Unscoped);
}

#[test]
fn test_zero_depth_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[injector]\nmax_resolution_depth = 0\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("WIREUP_TEST_ZERO")
        .load()
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_unknown_scope_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[injector]\nimplicit_scope = \"request\"\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("WIREUP_TEST_SCOPE")
        .load()
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[logging]\nlevel = \"verbose\"\n");

    assert!(
        ConfigLoader::new()
            .with_config_path(&path)
            .with_env_prefix("WIREUP_TEST_LEVEL")
            .load()
            .is_err()
    );
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let mut original = AppConfig::default();
    original.injector.implicit_scope = Scope::Unscoped;
    original.injector.max_resolution_depth = 64;
    original.logging.level = "trace".to_string();

    let loader = ConfigLoader::new();
    loader.save_to_file(&original, &config_path).unwrap();

    let loaded = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("WIREUP_TEST_SAVE")
        .load()
        .unwrap();

    assert_eq!(loaded.injector, original.injector);
    assert_eq!(loaded.logging, original.logging);
}

#[test]
fn test_save_to_missing_directory_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("wireup.toml");

    let err = ConfigLoader::new()
        .save_to_file(&AppConfig::default(), &path)
        .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}
