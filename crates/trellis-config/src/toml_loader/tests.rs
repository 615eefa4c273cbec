//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{LogLevel, TrellisConfig};
use std::path::Path;
use trellis_common::ConfigError;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let err = load_from_path(Path::new("/tmp/nonexistent_trellis_config.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[layout]
inner_gap = 8
auto_columns = 3

[logging]
level = "DEBUG"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.layout.inner_gap, 8);
    assert_eq!(config.layout.auto_columns, 3);
    assert_eq!(config.logging.level, LogLevel::Debug);
    // Defaults preserved
    assert_eq!(config.layout.resize_step, 40);
    assert_eq!(config.decoration.titlebar_height, 18);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn out_of_range_values_are_returned_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[layout]\ninner_gap = 100\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.layout.inner_gap, 100);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trellis").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.layout.inner_gap, 5);
    assert_eq!(config.workspaces.count, 10);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;

    let config: TrellisConfig = toml::from_str(default_config_toml()).unwrap();
    assert_eq!(config.decoration.border_color, "#222222");
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn default_config_path_is_reasonable() {
    // Headless environments may have no config dir.
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("trellis"));
        assert!(path_str.ends_with("config.toml"));
    }
}
