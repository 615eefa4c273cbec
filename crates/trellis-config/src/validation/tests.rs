//! Tests for the full validation pipeline.

use super::*;

fn error_for(config: &TrellisConfig) -> String {
    validate(config).unwrap_err().to_string()
}

#[test]
fn default_config_validates() {
    assert!(validate(&TrellisConfig::default()).is_ok());
}

#[test]
fn catches_inner_gap_too_large() {
    let mut config = TrellisConfig::default();
    config.layout.inner_gap = 51;
    assert!(error_for(&config).contains("layout.inner_gap"));
}

#[test]
fn catches_outer_gap_too_large() {
    let mut config = TrellisConfig::default();
    config.layout.outer_gap = 101;
    assert!(error_for(&config).contains("layout.outer_gap"));
}

#[test]
fn catches_zero_auto_columns() {
    let mut config = TrellisConfig::default();
    config.layout.auto_columns = 0;
    assert!(error_for(&config).contains("layout.auto_columns"));
}

#[test]
fn catches_zero_resize_step() {
    let mut config = TrellisConfig::default();
    config.layout.resize_step = 0;
    assert!(error_for(&config).contains("layout.resize_step"));
}

#[test]
fn catches_titlebar_too_tall() {
    let mut config = TrellisConfig::default();
    config.decoration.titlebar_height = 65;
    assert!(error_for(&config).contains("decoration.titlebar_height"));
}

#[test]
fn catches_malformed_border_color() {
    let mut config = TrellisConfig::default();
    config.decoration.border_color = "red".into();
    assert!(error_for(&config).contains("decoration.border_color"));

    config.decoration.border_color = "#abc".into();
    assert!(error_for(&config).contains("decoration.border_color"));
}

#[test]
fn catches_workspace_count_out_of_range() {
    let mut config = TrellisConfig::default();
    config.workspaces.count = 0;
    assert!(error_for(&config).contains("workspaces.count"));
    config.workspaces.count = 11;
    assert!(error_for(&config).contains("workspaces.count"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = TrellisConfig::default();
    config.layout.inner_gap = 99;
    config.decoration.border_width = 99;
    let err = error_for(&config);
    assert!(err.contains("layout.inner_gap"));
    assert!(err.contains("decoration.border_width"));
    assert!(err.contains("; "));
}
