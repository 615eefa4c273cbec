//! Moving frames between columns and workspaces, resizing, and
//! switching the visible workspace.

use tracing::{debug, info, warn};
use trellis_common::errors::TilingError;
use trellis_common::types::{FrameId, WorkspaceId};

use super::{Result, TilingManager, PRIMARY_OUTPUT};
use crate::commands::{MoveDirection, ResizeDirection};
use crate::layout::transfer;
use crate::platform::Context;

impl TilingManager {
    /// Move `frame` one step in `direction`.
    ///
    /// Up and down swap it with its neighbour in the column. Left and right
    /// move it to the end of the adjacent column, opening a new column at
    /// the workspace edge when there is none; a column left empty is
    /// removed. Shares are recomputed; rendering is left to the caller.
    /// Returns whether the tree changed.
    pub fn move_frame(&mut self, frame: FrameId, direction: MoveDirection) -> Result<bool> {
        let column = match self.frames.get(&frame) {
            Some(f) => f.column,
            None => return Err(TilingError::FrameNotFound(frame)),
        };
        // Docks have no column and never move.
        let Some(column) = column else {
            return Ok(false);
        };
        let workspace = self
            .columns
            .get(&column)
            .map(|c| c.workspace)
            .ok_or(TilingError::FrameNotFound(frame))?;

        match direction {
            MoveDirection::Up | MoveDirection::Down => {
                let up = direction == MoveDirection::Up;
                Ok(self
                    .columns
                    .get_mut(&column)
                    .is_some_and(|c| c.shift(frame, up)))
            }
            MoveDirection::Left | MoveDirection::Right => {
                let ws = self
                    .workspace(workspace)
                    .ok_or(TilingError::WorkspaceNotFound(workspace))?;
                let i = ws
                    .column_position(column)
                    .ok_or(TilingError::FrameNotFound(frame))?;
                let left = direction == MoveDirection::Left;
                let adjacent = if left {
                    i.checked_sub(1).and_then(|j| ws.columns.get(j).copied())
                } else {
                    ws.columns.get(i + 1).copied()
                };

                self.detach(frame);
                let target = match adjacent {
                    Some(c) => c,
                    None => self.create_column(workspace, left),
                };
                self.attach(frame, target, None);
                self.drop_column_if_empty(column);
                self.update_tiling(workspace);
                debug!("moved {frame} from {column} to {target}");
                Ok(true)
            }
        }
    }

    /// Show workspace `id` on the primary output.
    ///
    /// Frames of the previous workspace are unmapped and those of the new
    /// one mapped, then focus returns to the most recently focused frame of
    /// the new workspace. Fails without side effects when the workspace does
    /// not exist or belongs to another output.
    pub fn switch_workspace(&mut self, ctx: &Context<'_>, id: WorkspaceId) -> Result<()> {
        let target = self.ensure_workspace(id)?;
        let previous = self
            .outputs
            .get(PRIMARY_OUTPUT.0)
            .ok_or(TilingError::NoOutput)?
            .active;
        if previous == Some(target) {
            return Ok(());
        }
        info!("switching to workspace {target}");

        let mut result = Ok(());
        if let Some(previous) = previous {
            for frame in self.workspace_frames(previous) {
                let Some(f) = self.frames.get(&frame) else {
                    continue;
                };
                if !f.mapped {
                    continue;
                }
                if let Err(e) = f.unmap(ctx.server) {
                    warn!("failed to unmap {frame}: {e}");
                    result = Err(e.into());
                }
            }
        }

        if let Some(output) = self.outputs.get_mut(PRIMARY_OUTPUT.0) {
            output.active = Some(target);
        }

        for frame in self.workspace_frames(target) {
            let Some(f) = self.frames.get_mut(&frame) else {
                continue;
            };
            if let Err(e) = f.map(ctx.server) {
                warn!("failed to map {frame}: {e}");
                result = Err(e.into());
            }
        }

        self.update_tiling(target);
        self.render_workspace(ctx, target)?;
        self.publish_hints(ctx)?;
        self.remove_focus(ctx)?;
        self.restore_focus(ctx, target)?;
        result
    }

    /// Move `frame` from the active workspace to workspace `id`, where it
    /// stays hidden until that workspace is shown.
    pub fn move_frame_to_workspace(
        &mut self,
        ctx: &Context<'_>,
        frame: FrameId,
        id: WorkspaceId,
    ) -> Result<()> {
        let current = self.active_workspace().ok_or(TilingError::NoOutput)?;
        if !self.frames.contains_key(&frame) {
            return Err(TilingError::FrameNotFound(frame));
        }
        if self.workspace_of(frame) != Some(current) {
            return Err(TilingError::NotInWorkspace {
                frame,
                workspace: current,
            });
        }
        let next = self.ensure_workspace(id)?;
        if next == current {
            return Ok(());
        }
        self.remove_frame_from_workspace(current, frame);
        self.add_frame_to_workspace(next, frame);
        info!("moved {frame} to workspace {next}");

        if let Some(f) = self.frames.get(&frame) {
            f.unmap(ctx.server)?;
        }
        self.update_tiling(current);
        self.update_tiling(next);
        self.render_workspace(ctx, next)?;
        self.render_workspace(ctx, current)?;

        if self.focused == Some(frame) {
            self.refocus(ctx)?;
        }
        self.publish_hints(ctx)
    }

    /// Grow `frame` by `delta` pixels (shrink when negative) at the expense
    /// of a neighbour: the next column or frame, or the previous one for
    /// the last. Neither side drops below the minimum share. Returns whether
    /// anything changed.
    pub fn resize(&mut self, frame: FrameId, direction: ResizeDirection, delta: i32) -> Result<bool> {
        let column = match self.frames.get(&frame) {
            Some(f) => f.column,
            None => return Err(TilingError::FrameNotFound(frame)),
        };
        let Some(column) = column else {
            return Ok(false);
        };
        let min = self.config.min_share();
        let amount = delta.unsigned_abs();
        let grow = delta >= 0;

        match direction {
            ResizeDirection::Horizontal => {
                let Some(ws) = self
                    .columns
                    .get(&column)
                    .and_then(|c| self.workspace(c.workspace))
                else {
                    return Ok(false);
                };
                let Some(i) = ws.column_position(column) else {
                    return Ok(false);
                };
                let neighbour = ws
                    .columns
                    .get(i + 1)
                    .or_else(|| i.checked_sub(1).and_then(|j| ws.columns.get(j)))
                    .copied();
                let Some(neighbour) = neighbour else {
                    return Ok(false);
                };
                let (Some(mut own), Some(mut other)) = (
                    self.columns.get(&column).map(|c| c.width),
                    self.columns.get(&neighbour).map(|c| c.width),
                ) else {
                    return Ok(false);
                };
                if own == 0 || other == 0 {
                    return Ok(false);
                }
                let moved = if grow {
                    transfer(&mut own, &mut other, amount, min)
                } else {
                    transfer(&mut other, &mut own, amount, min)
                };
                if let Some(c) = self.columns.get_mut(&column) {
                    c.width = own;
                }
                if let Some(c) = self.columns.get_mut(&neighbour) {
                    c.width = other;
                }
                Ok(moved > 0)
            }
            ResizeDirection::Vertical => {
                let visible = self.mapped_frames(column);
                let Some(row) = visible.iter().position(|&f| f == frame) else {
                    return Ok(false);
                };
                let neighbour = visible
                    .get(row + 1)
                    .or_else(|| row.checked_sub(1).and_then(|r| visible.get(r)))
                    .copied();
                let Some(neighbour) = neighbour else {
                    return Ok(false);
                };
                let (Some(mut own), Some(mut other)) = (
                    self.frames.get(&frame).map(|f| f.height),
                    self.frames.get(&neighbour).map(|f| f.height),
                ) else {
                    return Ok(false);
                };
                let moved = if grow {
                    transfer(&mut own, &mut other, amount, min)
                } else {
                    transfer(&mut other, &mut own, amount, min)
                };
                if let Some(f) = self.frames.get_mut(&frame) {
                    f.height = own;
                }
                if let Some(f) = self.frames.get_mut(&neighbour) {
                    f.height = other;
                }
                Ok(moved > 0)
            }
        }
    }
}
