//! Core TOML config loading: read from path or platform default.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};
use trellis_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::TrellisConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. Validation problems are
/// logged; the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<TrellisConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("failed to read {}: {e}", path.display())),
    })?;

    let config: TrellisConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path
/// (`~/.config/trellis/config.toml` on Linux).
///
/// If the file does not exist, a default config file is written and the
/// defaults are returned.
pub fn load_default() -> Result<TrellisConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(TrellisConfig::default())
        }
        Err(e) => Err(e),
    }
}
