//! Pure geometry: share distribution and the per-frame gap inset.
//!
//! Nothing here talks to the display server. The manager feeds these
//! helpers with tree state and hands the resulting rects to the render
//! pass.

use serde::{Deserialize, Serialize};
use trellis_common::types::{Insets, Rect};

/// Engine settings derived from the user configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilingConfig {
    /// Inset applied on every side of each tiled frame.
    pub inner_gap: u32,
    /// Margin between the usable area and the outermost columns.
    pub outer_gap: u32,
    /// A new window opens a new column until the workspace has this many.
    pub auto_columns: usize,
    /// Pixels moved per resize step.
    pub resize_step: u32,
    pub border_width: u32,
    /// Zero disables the titlebar.
    pub titlebar_height: u32,
    pub workspace_count: u8,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            inner_gap: 5,
            outer_gap: 0,
            auto_columns: 2,
            resize_step: 40,
            border_width: 0,
            titlebar_height: 18,
            workspace_count: 10,
        }
    }
}

impl TilingConfig {
    /// Smallest width or height a column or frame may be resized down to.
    pub fn min_share(&self) -> u32 {
        self.inner_gap * 2 + 1
    }

    /// Decoration insets for a frame. Frames without a container window
    /// have no decorations.
    pub fn decorations(&self, has_container: bool) -> Insets {
        if !has_container {
            return Insets::ZERO;
        }
        let bar = if self.titlebar_height > 0 {
            self.titlebar_height + 1
        } else {
            0
        };
        Insets {
            top: self.border_width + bar,
            right: self.border_width,
            bottom: self.border_width,
            left: self.border_width,
        }
    }
}

/// Split `total` into `count` equal shares. The last share absorbs the
/// rounding remainder so the shares always sum to `total`.
pub fn distribute(total: u32, count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as u32;
    let base = total / n;
    let mut shares = vec![base; count];
    if let Some(last) = shares.last_mut() {
        *last = total - base * (n - 1);
    }
    shares
}

/// The rect of a frame occupying `height` pixels of a column starting at
/// `y`, shrunk by `gap` on every side.
pub fn frame_slot(column: Rect, y: u32, height: u32, gap: u32) -> Rect {
    Rect {
        x: column.x,
        y,
        width: column.width,
        height,
    }
    .shrink(gap)
}

/// The slice of a workspace area given to a column starting at `x`.
pub fn column_slot(area: Rect, x: u32, width: u32) -> Rect {
    Rect {
        x,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Move up to `amount` pixels from `shrink` to `grow`, never letting
/// `shrink` drop below `min`. Returns the number of pixels moved.
pub fn transfer(grow: &mut u32, shrink: &mut u32, amount: u32, min: u32) -> u32 {
    let available = shrink.saturating_sub(min);
    let moved = amount.min(available);
    *grow += moved;
    *shrink -= moved;
    moved
}
