//! Trellis configuration.
//!
//! TOML configuration with full validation. Every section uses serde
//! defaults so partial configs work out of the box.
//!
//! ```rust,no_run
//! use trellis_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{} workspaces", config.workspaces.count);
//! ```

pub mod schema;
pub mod tiling;
pub mod toml_loader;
pub mod validation;

pub use schema::TrellisConfig;

use std::path::Path;

use trellis_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`,
/// and validate it.
///
/// A missing default file is created from the commented template.
pub fn load_config(path: Option<&Path>) -> Result<TrellisConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_accepts_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[workspaces]\ncount = 4\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.workspaces.count, 4);
        assert_eq!(config.layout.inner_gap, 5);
        assert_eq!(config.decoration.border_color, "#222222");
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[layout]\nauto_columns = 0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("layout.auto_columns"));
    }
}
