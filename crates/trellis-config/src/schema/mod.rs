//! Configuration schema types for Trellis.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod decoration;
mod layout;
mod system;
mod workspaces;

pub use decoration::*;
pub use layout::*;
pub use system::*;
pub use workspaces::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Trellis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    pub layout: LayoutConfig,
    pub decoration: DecorationConfig,
    pub workspaces: WorkspacesConfig,
    pub logging: LoggingConfig,
}
