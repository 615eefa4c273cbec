//! Render pass: push computed geometry to the display server.
//!
//! Every level is best effort. A failing frame is logged and its siblings
//! are still rendered; the last error seen is returned.

use tracing::{trace, warn};
use trellis_common::errors::TilingError;
use trellis_common::types::{ColumnId, FrameId, OutputId, Rect, WorkspaceId};

use super::{Result, TilingManager};
use crate::layout::{column_slot, frame_slot};
use crate::output::DockArea;
use crate::platform::Context;

impl TilingManager {
    /// Render both dock areas and the active workspace of `output`.
    pub fn render_output(&mut self, ctx: &Context<'_>, output: OutputId) -> Result<()> {
        let active = self
            .outputs
            .get(output.0)
            .ok_or(TilingError::NoOutput)?
            .active;

        let mut result = Ok(());
        for area in DockArea::ALL {
            if let Err(e) = self.render_dock(ctx, output, area) {
                result = Err(e);
            }
        }
        if let Some(workspace) = active {
            if let Err(e) = self.render_workspace(ctx, workspace) {
                result = Err(e);
            }
        }
        result
    }

    /// Stack the mapped dock frames of `area` along the output edge at full
    /// output width.
    pub fn render_dock(&mut self, ctx: &Context<'_>, output: OutputId, area: DockArea) -> Result<()> {
        let o = self.outputs.get(output.0).ok_or(TilingError::NoOutput)?;
        let screen = o.rect;
        let frames = o.dock(area).to_vec();
        let mut y = match area {
            DockArea::Top => screen.y,
            DockArea::Bottom => {
                (screen.y + screen.height).saturating_sub(self.dock_height(output, area))
            }
        };

        let mut result = Ok(());
        for id in frames {
            let Some(frame) = self.frames.get(&id) else {
                continue;
            };
            if !frame.mapped {
                continue;
            }
            let rect = Rect::new(screen.x, y, screen.width, frame.height);
            y += frame.height;
            if let Err(e) = self.render_frame(ctx, id, rect) {
                warn!("failed to render dock {id}: {e}");
                result = Err(e);
            }
        }
        result
    }

    /// Lay out the columns of `workspace` left to right. Hidden workspaces
    /// are skipped.
    pub fn render_workspace(&mut self, ctx: &Context<'_>, workspace: WorkspaceId) -> Result<()> {
        if !self.is_visible(workspace) {
            trace!("workspace {workspace} is hidden, not rendering");
            return Ok(());
        }

        // A lone frame fills the whole usable area, gaps included.
        if let Some(frame) = self.single_frame(workspace) {
            let Some(area) = self
                .workspace(workspace)
                .and_then(|ws| ws.output)
                .and_then(|o| self.usable_area(o))
            else {
                return Ok(());
            };
            return self.render_frame(ctx, frame, area);
        }

        let Some(area) = self.workspace_area(workspace) else {
            return Ok(());
        };
        let columns = self
            .workspace(workspace)
            .map(|ws| ws.columns.clone())
            .unwrap_or_default();

        let mut x = area.x;
        let mut result = Ok(());
        for column in columns {
            let Some(width) = self.columns.get(&column).map(|c| c.width) else {
                continue;
            };
            if let Err(e) = self.render_column(ctx, column, column_slot(area, x, width)) {
                result = Err(e);
            }
            x += width;
        }
        result
    }

    /// Stack the frames of `column` top to bottom inside `rect`.
    pub fn render_column(&mut self, ctx: &Context<'_>, column: ColumnId, rect: Rect) -> Result<()> {
        let Some(frames) = self.columns.get(&column).map(|c| c.frames.clone()) else {
            return Ok(());
        };
        let gap = self.config.inner_gap;

        let mut y = rect.y;
        let mut result = Ok(());
        for id in frames {
            let Some(height) = self.frames.get(&id).map(|f| f.height) else {
                continue;
            };
            if let Err(e) = self.render_frame(ctx, id, frame_slot(rect, y, height, gap)) {
                warn!("failed to render {id}: {e}");
                result = Err(e);
            }
            y += height;
        }
        result
    }

    /// Place a single mapped frame at `rect`.
    ///
    /// With a container, the container takes `rect` and the client fills it
    /// from the origin. Without one, the client takes `rect` directly.
    pub fn render_frame(&mut self, ctx: &Context<'_>, id: FrameId, rect: Rect) -> Result<()> {
        let frame = self.frames.get_mut(&id).ok_or(TilingError::FrameNotFound(id))?;
        if !frame.mapped {
            return Ok(());
        }
        frame.geometry = rect;

        match frame.container {
            Some(container) => {
                ctx.server.configure_window(container, rect)?;
                ctx.server
                    .configure_window(frame.window, Rect::new(0, 0, rect.width, rect.height))?;
            }
            None => ctx.server.configure_window(frame.window, rect)?,
        }
        // Some toolkits (Java/AWT) ignore moves of a reparented window and
        // misplace their popups unless told the root-relative position.
        ctx.server.send_configure_notify(frame.window, rect)?;
        trace!(
            "rendered {id} at {}x{}+{}+{}",
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );
        Ok(())
    }
}
