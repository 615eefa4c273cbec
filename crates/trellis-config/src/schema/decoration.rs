//! Container decoration configuration.

use serde::{Deserialize, Serialize};
use trellis_common::Color;

/// Borders and title bars drawn around reparented windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Container border width in pixels (valid range: 0-20).
    pub border_width: u32,
    /// Title bar height in pixels, 0 to disable (valid range: 0-64).
    pub titlebar_height: u32,
    /// Border color as `#RRGGBB`.
    pub border_color: String,
}

impl DecorationConfig {
    /// The parsed border color, if `border_color` is well formed.
    pub fn border_color(&self) -> Option<Color> {
        Color::from_hex(&self.border_color)
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            border_width: 0,
            titlebar_height: 18,
            border_color: "#222222".into(),
        }
    }
}
