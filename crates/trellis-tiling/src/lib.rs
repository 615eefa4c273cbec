//! Column-based tiling engine: the frame/column/workspace/output tree,
//! geometry computation, and the placement operations that drive a
//! display server through the [`platform`] traits.

pub mod column;
pub mod commands;
pub mod frame;
pub mod layout;
pub mod manager;
pub mod output;
pub mod platform;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::{MoveDirection, ResizeDirection, TilingCommand};
pub use frame::{Frame, WindowKind};
pub use layout::TilingConfig;
pub use manager::TilingManager;
pub use output::{DockArea, Output};
pub use platform::{Context, DesktopHints, DesktopState, Decorations, DisplayServer, PropertyReader};
pub use workspace::Workspace;
