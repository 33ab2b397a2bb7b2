//! Tests for configuration loading and instance folder resolution
//!
//! Tests that manipulate MBOARD_INSTANCE_DIR are marked with #[serial]
//! so they never run in parallel with each other.

use mboard_common::config::{resolve_instance_dir, SyncConfig, INSTANCE_DIR_ENV};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn test_env_var_overrides_config_file() {
    env::set_var(INSTANCE_DIR_ENV, "/from/env");

    let path = resolve_instance_dir(None, INSTANCE_DIR_ENV, Some(PathBuf::from("/from/config")));
    assert_eq!(path, PathBuf::from("/from/env"));

    env::remove_var(INSTANCE_DIR_ENV);
}

#[test]
#[serial]
fn test_cli_arg_overrides_env_var() {
    env::set_var(INSTANCE_DIR_ENV, "/from/env");

    let path = resolve_instance_dir(Some("/from/cli"), INSTANCE_DIR_ENV, None);
    assert_eq!(path, PathBuf::from("/from/cli"));

    env::remove_var(INSTANCE_DIR_ENV);
}

#[test]
#[serial]
fn test_no_overrides_uses_default() {
    env::remove_var(INSTANCE_DIR_ENV);

    let path = resolve_instance_dir(None, INSTANCE_DIR_ENV, None);
    assert!(!path.as_os_str().is_empty());
    assert!(path.to_string_lossy().contains("mboard") || path.ends_with("instance"));
}

#[test]
#[serial]
fn test_missing_config_file_uses_defaults() {
    env::remove_var(INSTANCE_DIR_ENV);
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let config = SyncConfig::load(&missing).unwrap();
    assert_eq!(config.refresh_interval_secs, 120);
}

#[test]
#[serial]
fn test_resolve_reads_file_and_instance_dir() {
    env::remove_var(INSTANCE_DIR_ENV);
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("mboard.toml");
    std::fs::write(
        &config_path,
        r#"
        instance_dir = "/var/lib/mboard"
        refresh_interval_secs = 300

        [roster]
        parent_unit = 555
        bearer_token = "token"
        "#,
    )
    .unwrap();

    let config = SyncConfig::resolve(None, Some(&config_path)).unwrap();
    assert_eq!(config.instance_dir, PathBuf::from("/var/lib/mboard"));
    assert_eq!(config.refresh_interval_secs, 300);
    assert_eq!(config.roster.parent_unit, 555);
    assert_eq!(config.roster.bearer_token.as_deref(), Some("token"));

    let config = SyncConfig::resolve(Some("/from/cli"), Some(&config_path)).unwrap();
    assert_eq!(config.instance_dir, PathBuf::from("/from/cli"));
}

#[test]
#[serial]
fn test_resolve_rejects_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("mboard.toml");
    std::fs::write(&config_path, "page_size = 0").unwrap();

    assert!(SyncConfig::resolve(None, Some(&config_path)).is_err());
}
