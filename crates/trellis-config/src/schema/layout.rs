//! Column layout configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap around every tiled frame in pixels (valid range: 0-50).
    pub inner_gap: u32,
    /// Margin between the usable area and the columns (valid range: 0-100).
    pub outer_gap: u32,
    /// New windows open a new column until a workspace has this many
    /// (valid range: 1-8).
    pub auto_columns: u32,
    /// Pixels moved per resize step (valid range: 1-500).
    pub resize_step: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            inner_gap: 5,
            outer_gap: 0,
            auto_columns: 2,
            resize_step: 40,
        }
    }
}
