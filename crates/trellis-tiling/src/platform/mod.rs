//! Collaborator contracts the engine drives.
//!
//! The engine never owns a display connection. Every operation that needs
//! the server receives a [`Context`] bundling the collaborators, built once
//! at startup by the binary (or by a test harness).

use serde::{Deserialize, Serialize};
use trellis_common::errors::ServerError;
use trellis_common::types::{Insets, Rect, WindowId, WorkspaceId};

use crate::frame::WindowKind;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Window creation, reparenting, mapping and configuration requests.
///
/// Every call is a synchronous request/reply: it either completes or
/// returns the server's error.
pub trait DisplayServer {
    /// Create an unmapped container window suitable for reparenting a client.
    fn create_container(&self) -> Result<WindowId>;
    /// Reparent `window` into `parent` at local origin `(0, 0)`.
    fn reparent(&self, window: WindowId, parent: WindowId) -> Result<()>;
    fn add_to_save_set(&self, window: WindowId) -> Result<()>;
    fn map_window(&self, window: WindowId) -> Result<()>;
    fn unmap_window(&self, window: WindowId) -> Result<()>;
    fn destroy_window(&self, window: WindowId) -> Result<()>;
    /// Move and resize `window` to `rect` (relative to its parent).
    fn configure_window(&self, window: WindowId, rect: Rect) -> Result<()>;
    /// Send a synthetic ConfigureNotify to `window` carrying its root-relative
    /// `rect` with `override_redirect` set.
    fn send_configure_notify(&self, window: WindowId, rect: Rect) -> Result<()>;
    /// Give keyboard focus to `window`, or to the root when `None`.
    fn set_input_focus(&self, window: Option<WindowId>) -> Result<()>;
}

/// Reads client properties. Absent or unreadable properties are `None`.
pub trait PropertyReader {
    fn window_title(&self, window: WindowId) -> Option<String>;
    fn window_kind(&self, window: WindowId) -> WindowKind;
    fn window_geometry(&self, window: WindowId) -> Option<Rect>;
}

/// Snapshot handed to the desktop-hint publisher after structural changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopState {
    pub workspace_count: u8,
    pub active_workspace: Option<WorkspaceId>,
    /// Workspaces holding at least one frame, in id order.
    pub occupied: Vec<WorkspaceId>,
}

pub trait DesktopHints {
    fn publish(&self, state: &DesktopState) -> Result<()>;
    fn set_active_window(&self, window: Option<WindowId>) -> Result<()>;
}

/// What the titlebar renderer needs to redraw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration<'a> {
    pub container: WindowId,
    pub title: Option<&'a str>,
    pub insets: Insets,
    pub geometry: Rect,
}

pub trait Decorations {
    fn redraw(&self, decoration: &Decoration<'_>) -> Result<()>;
}

/// The collaborators threaded through every server-facing operation.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub server: &'a dyn DisplayServer,
    pub properties: &'a dyn PropertyReader,
    pub hints: &'a dyn DesktopHints,
    pub decorations: &'a dyn Decorations,
}

impl<'a> Context<'a> {
    /// Build a context from one backend implementing every collaborator.
    pub fn new<B>(backend: &'a B) -> Self
    where
        B: DisplayServer + PropertyReader + DesktopHints + Decorations,
    {
        Self {
            server: backend,
            properties: backend,
            hints: backend,
            decorations: backend,
        }
    }
}
