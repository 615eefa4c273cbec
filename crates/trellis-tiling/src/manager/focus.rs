//! Input focus and per-workspace focus history.

use tracing::debug;
use trellis_common::types::{FrameId, WindowId, WorkspaceId};

use super::{Result, TilingManager};
use crate::commands::MoveDirection;
use crate::platform::Context;

impl TilingManager {
    /// Give input focus to `window` and record it as the most recently
    /// focused frame of its workspace. Unmanaged windows are ignored.
    pub fn set_focus(&mut self, ctx: &Context<'_>, window: WindowId) -> Result<()> {
        let Some(id) = self.frame_by_window(window) else {
            return Ok(());
        };
        ctx.server.set_input_focus(Some(window))?;
        ctx.hints.set_active_window(Some(window))?;
        self.focused = Some(id);
        if let Some(workspace) = self.workspace_of(id) {
            if let Some(ws) = self.workspace_mut(workspace) {
                ws.remember_focus(id);
            }
        }
        debug!("focused {id}");
        Ok(())
    }

    /// Return focus to the root window.
    pub fn remove_focus(&mut self, ctx: &Context<'_>) -> Result<()> {
        self.focused = None;
        ctx.server.set_input_focus(None)?;
        ctx.hints.set_active_window(None)?;
        Ok(())
    }

    /// Focus the most recently focused mapped frame of `workspace`,
    /// falling back to the first mapped frame in column order. Frames whose
    /// client withdrew itself cannot take input focus.
    pub(super) fn restore_focus(&mut self, ctx: &Context<'_>, workspace: WorkspaceId) -> Result<()> {
        let mapped_in = |f: &FrameId| {
            self.frames.get(f).is_some_and(|frame| frame.mapped)
                && self.workspace_of(*f) == Some(workspace)
        };
        let remembered = self
            .workspace(workspace)
            .and_then(|ws| ws.recent_focus().find(|f| mapped_in(f)));
        let target = remembered.or_else(|| {
            self.workspace_frames(workspace)
                .into_iter()
                .find(|f| mapped_in(f))
        });
        match target.and_then(|f| self.frames.get(&f)).map(|f| f.window) {
            Some(window) => self.set_focus(ctx, window),
            None => Ok(()),
        }
    }

    /// Drop focus from a frame that is going away and hand it to the best
    /// remaining frame of the active workspace.
    pub(super) fn refocus(&mut self, ctx: &Context<'_>) -> Result<()> {
        self.remove_focus(ctx)?;
        match self.active_workspace() {
            Some(active) => self.restore_focus(ctx, active),
            None => Ok(()),
        }
    }

    /// Move focus to the neighbouring frame in `direction`. Returns whether
    /// focus moved.
    pub fn focus_direction(&mut self, ctx: &Context<'_>, direction: MoveDirection) -> Result<bool> {
        let Some(current) = self.focused else {
            return Ok(false);
        };
        let Some(window) = self
            .neighbour(current, direction)
            .and_then(|f| self.frames.get(&f))
            .map(|f| f.window)
        else {
            return Ok(false);
        };
        self.set_focus(ctx, window)?;
        Ok(true)
    }

    /// The mapped frame next to `frame`. Horizontal neighbours keep the row
    /// where possible and skip columns with nothing mapped.
    fn neighbour(&self, frame: FrameId, direction: MoveDirection) -> Option<FrameId> {
        let column = self.frames.get(&frame)?.column?;
        let visible = self.mapped_frames(column);
        let row = visible.iter().position(|&f| f == frame)?;

        match direction {
            MoveDirection::Up => row.checked_sub(1).and_then(|r| visible.get(r).copied()),
            MoveDirection::Down => visible.get(row + 1).copied(),
            MoveDirection::Left | MoveDirection::Right => {
                let ws = self.workspace(self.columns.get(&column)?.workspace)?;
                let i = ws.column_position(column)?;
                let order: Vec<_> = if direction == MoveDirection::Left {
                    ws.columns[..i].iter().rev().copied().collect()
                } else {
                    ws.columns[i + 1..].iter().copied().collect()
                };
                order.into_iter().find_map(|c| {
                    let frames = self.mapped_frames(c);
                    frames.get(row).or(frames.last()).copied()
                })
            }
        }
    }
}
