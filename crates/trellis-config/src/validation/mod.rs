//! Full configuration validation.
//!
//! Each section has its own submodule; [`validate`] runs them all and
//! collects every problem into a single `ConfigError`.

mod decoration;
mod helpers;
mod layout;

#[cfg(test)]
mod tests;

use trellis_common::ConfigError;

use crate::schema::TrellisConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TrellisConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    layout::validate_layout(&mut errors, config);
    decoration::validate_decoration(&mut errors, config);
    helpers::validate_range(
        &mut errors,
        "workspaces.count",
        u32::from(config.workspaces.count),
        1,
        10,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
