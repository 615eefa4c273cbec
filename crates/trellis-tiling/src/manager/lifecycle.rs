//! Window lifecycle: manage, unmap, destroy, title changes.

use tracing::{debug, info, warn};
use trellis_common::errors::TilingError;
use trellis_common::types::{FrameId, WindowId};

use super::{Result, TilingManager, PRIMARY_OUTPUT};
use crate::frame::{Frame, WindowKind};
use crate::output::DockArea;
use crate::platform::Context;

const MIN_DOCK_HEIGHT: u32 = 1;

impl TilingManager {
    /// Handle a map request.
    ///
    /// An already-managed window is mapped again in place. A new window gets
    /// a frame: docks go to the dock area matching their position, anything
    /// else is tiled into the active workspace and focused.
    pub fn manage_window(&mut self, ctx: &Context<'_>, window: WindowId) -> Result<FrameId> {
        if let Some(id) = self.frame_by_window(window) {
            self.remap(ctx, id)?;
            return Ok(id);
        }

        let output = self
            .outputs
            .get(PRIMARY_OUTPUT.0)
            .ok_or(TilingError::NoOutput)?;
        let screen = output.rect;
        let workspace = output.active.ok_or(TilingError::NoOutput)?;

        let kind = ctx.properties.window_kind(window);
        let id = self.alloc_frame_id();
        let mut frame = Frame::create(ctx, id, window, kind)?;
        info!(window = %window, ?kind, "managing {id}");

        match kind {
            WindowKind::Dock => {
                let geometry = ctx.properties.window_geometry(window).unwrap_or_default();
                let area = DockArea::for_geometry(screen, geometry);
                // The server rejects zero-sized windows.
                frame.height = geometry.height.max(MIN_DOCK_HEIGHT);
                self.frames.insert(id, frame);
                if let Some(o) = self.outputs.get_mut(PRIMARY_OUTPUT.0) {
                    o.add_dock_frame(area, id);
                }
                self.map_frame(ctx, id)?;
                self.update_tiling(workspace);
                self.render_output(ctx, PRIMARY_OUTPUT)?;
            }
            WindowKind::Normal | WindowKind::Unknown => {
                self.frames.insert(id, frame);
                self.add_frame_to_workspace(workspace, id);
                self.map_frame(ctx, id)?;
                self.update_tiling(workspace);
                self.render_workspace(ctx, workspace)?;
                self.set_focus(ctx, window)?;
            }
        }
        self.publish_hints(ctx)?;
        Ok(id)
    }

    fn map_frame(&mut self, ctx: &Context<'_>, id: FrameId) -> Result<()> {
        let frame = self.frames.get_mut(&id).ok_or(TilingError::FrameNotFound(id))?;
        frame.map(ctx.server)?;
        Ok(())
    }

    /// Map a managed frame again, keeping its container and position. Frames
    /// on a hidden workspace stay unmapped until it is shown.
    fn remap(&mut self, ctx: &Context<'_>, id: FrameId) -> Result<()> {
        let kind = self.frames.get(&id).ok_or(TilingError::FrameNotFound(id))?.kind;
        match kind {
            WindowKind::Dock => {
                self.map_frame(ctx, id)?;
                if let Some(workspace) = self.active_workspace() {
                    self.update_tiling(workspace);
                }
                self.render_output(ctx, PRIMARY_OUTPUT)
            }
            WindowKind::Normal | WindowKind::Unknown => {
                let Some(workspace) = self.workspace_of(id) else {
                    return Ok(());
                };
                if !self.is_visible(workspace) {
                    debug!("{id} stays unmapped until workspace {workspace} is shown");
                    return Ok(());
                }
                self.map_frame(ctx, id)?;
                self.update_tiling(workspace);
                self.render_workspace(ctx, workspace)
            }
        }
    }

    /// Handle an unmap notification. Unknown windows and frames that are
    /// already unmapped are ignored.
    pub fn on_unmap(&mut self, ctx: &Context<'_>, window: WindowId) -> Result<()> {
        let Some(id) = self.frame_by_window(window) else {
            return Ok(());
        };
        let Some(frame) = self.frames.get_mut(&id) else {
            return Ok(());
        };
        if !frame.mapped {
            return Ok(());
        }
        frame.on_server_unmap(ctx.server)?;
        let kind = frame.kind;
        debug!("{id} unmapped");

        let mut result = match kind {
            WindowKind::Dock => {
                if let Some(workspace) = self.active_workspace() {
                    self.update_tiling(workspace);
                }
                self.render_output(ctx, PRIMARY_OUTPUT)
            }
            WindowKind::Normal | WindowKind::Unknown => match self.workspace_of(id) {
                Some(workspace) => {
                    self.update_tiling(workspace);
                    self.render_workspace(ctx, workspace)
                }
                None => Ok(()),
            },
        };
        if self.focused == Some(id) {
            if let Err(e) = self.refocus(ctx) {
                warn!("failed to move focus off {id}: {e}");
                result = Err(e);
            }
        }
        result
    }

    /// Handle a destroy notification: drop the container and remove the
    /// frame from the tree.
    pub fn on_destroy(&mut self, ctx: &Context<'_>, window: WindowId) -> Result<()> {
        let Some(id) = self.frame_by_window(window) else {
            return Ok(());
        };
        let destroyed = match self.frames.get_mut(&id) {
            Some(frame) => frame.on_server_destroy(ctx.server),
            None => return Ok(()),
        };
        if let Err(e) = &destroyed {
            warn!("failed to destroy container of {id}: {e}");
        }
        self.delete_frame(ctx, id)?;
        destroyed.map_err(Into::into)
    }

    /// Remove `id` from its column or dock and re-render what it occupied.
    pub(super) fn delete_frame(&mut self, ctx: &Context<'_>, id: FrameId) -> Result<()> {
        let workspace = self.workspace_of(id);
        match workspace {
            Some(ws) => {
                self.remove_frame_from_workspace(ws, id);
            }
            None => {
                for output in &mut self.outputs {
                    output.remove_dock_frame(id);
                }
            }
        }
        self.frames.remove(&id).ok_or(TilingError::FrameNotFound(id))?;
        info!("removed {id}");

        let active = self.active_workspace();
        if let Some(active) = active {
            self.update_tiling(active);
        }
        if let Some(ws) = workspace.filter(|&ws| Some(ws) != active) {
            self.update_tiling(ws);
        }
        let mut result = self.render_output(ctx, PRIMARY_OUTPUT);
        if self.focused == Some(id) {
            if let Err(e) = self.refocus(ctx) {
                warn!("failed to move focus off removed {id}: {e}");
                result = Err(e);
            }
        }
        if let Err(e) = self.publish_hints(ctx) {
            result = Err(e);
        }
        result
    }

    /// Re-read the title of `window` and redraw its decoration.
    pub fn on_title_changed(&mut self, ctx: &Context<'_>, window: WindowId) -> Result<()> {
        let Some(id) = self.frame_by_window(window) else {
            return Ok(());
        };
        if let Some(frame) = self.frames.get_mut(&id) {
            frame.refresh_title(ctx, &self.config)?;
        }
        Ok(())
    }
}
