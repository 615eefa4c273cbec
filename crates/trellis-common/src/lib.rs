pub mod errors;
pub mod types;

pub use errors::{ConfigError, ServerError, TilingError, TrellisError};
pub use types::{Color, ColumnId, FrameId, Insets, OutputId, Rect, WindowId, WorkspaceId};
