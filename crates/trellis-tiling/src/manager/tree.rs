//! Structural edits of the arena and share computation.

use tracing::{debug, trace};
use trellis_common::errors::TilingError;
use trellis_common::types::{ColumnId, FrameId, OutputId, Rect, WorkspaceId};

use super::{Result, TilingManager, PRIMARY_OUTPUT};
use crate::column::Column;
use crate::layout::distribute;
use crate::output::DockArea;
use crate::platform::{Context, DesktopState};
use crate::workspace::Workspace;

impl TilingManager {
    pub(super) fn alloc_frame_id(&mut self) -> FrameId {
        let id = FrameId(self.next_frame);
        self.next_frame += 1;
        id
    }

    pub(super) fn workspace_mut(&mut self, id: WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces.get_mut(usize::from(id.0))
    }

    /// Add an empty column at the left or right edge of `workspace`.
    pub(super) fn create_column(&mut self, workspace: WorkspaceId, at_start: bool) -> ColumnId {
        let id = ColumnId(self.next_column);
        self.next_column += 1;
        self.columns.insert(id, Column::new(id, workspace));
        if let Some(ws) = self.workspace_mut(workspace) {
            if at_start {
                ws.columns.insert(0, id);
            } else {
                ws.columns.push(id);
            }
        }
        trace!("created {id} in workspace {workspace}");
        id
    }

    pub(super) fn attach(&mut self, frame: FrameId, column: ColumnId, index: Option<usize>) {
        if let Some(col) = self.columns.get_mut(&column) {
            col.insert(frame, index);
        }
        if let Some(f) = self.frames.get_mut(&frame) {
            f.column = Some(column);
        }
    }

    /// Unlink `frame` from its column and return that column. Empty columns
    /// are left in place for the caller to drop.
    pub(super) fn detach(&mut self, frame: FrameId) -> Option<ColumnId> {
        let column = self.frames.get_mut(&frame)?.column.take()?;
        if let Some(col) = self.columns.get_mut(&column) {
            col.remove(frame);
        }
        Some(column)
    }

    /// Delete `column` if it holds no frames. Returns whether it was deleted.
    pub(super) fn drop_column_if_empty(&mut self, column: ColumnId) -> bool {
        let Some(col) = self.columns.get(&column) else {
            return false;
        };
        if !col.is_empty() {
            return false;
        }
        let workspace = col.workspace;
        self.columns.remove(&column);
        if let Some(ws) = self.workspace_mut(workspace) {
            ws.remove_column(column);
        }
        trace!("removed empty {column} from workspace {workspace}");
        true
    }

    /// Place a frame in `workspace`: a new rightmost column while the
    /// workspace has fewer than `auto_columns`, otherwise the last column.
    pub(super) fn add_frame_to_workspace(&mut self, workspace: WorkspaceId, frame: FrameId) {
        let columns = self.workspace(workspace).map(|ws| ws.columns.clone()).unwrap_or_default();
        let column = match columns.last() {
            Some(&last) if columns.len() >= self.config.auto_columns.max(1) => last,
            _ => self.create_column(workspace, false),
        };
        self.attach(frame, column, None);
        debug!("placed {frame} in {column} of workspace {workspace}");
    }

    /// Remove `frame` from `workspace`, dropping its column if it empties.
    /// Returns `false` when the frame is not in that workspace.
    pub(super) fn remove_frame_from_workspace(&mut self, workspace: WorkspaceId, frame: FrameId) -> bool {
        if self.workspace_of(frame) != Some(workspace) {
            return false;
        }
        if let Some(column) = self.detach(frame) {
            self.drop_column_if_empty(column);
        }
        if let Some(ws) = self.workspace_mut(workspace) {
            ws.forget_focus(frame);
        }
        true
    }

    /// Resolve `id` to a workspace on the primary output, attaching it if
    /// it is not yet on any output. Nothing is mutated on error.
    pub(super) fn ensure_workspace(&mut self, id: WorkspaceId) -> Result<WorkspaceId> {
        let current = self
            .workspace(id)
            .ok_or(TilingError::WorkspaceNotFound(id))?
            .output;
        match current {
            Some(output) if output == PRIMARY_OUTPUT => Ok(id),
            Some(_) => Err(TilingError::MultipleOutputs),
            None => {
                let output = self
                    .outputs
                    .get_mut(PRIMARY_OUTPUT.0)
                    .ok_or(TilingError::NoOutput)?;
                output.add_workspace(id);
                if let Some(ws) = self.workspace_mut(id) {
                    ws.output = Some(PRIMARY_OUTPUT);
                }
                debug!("attached workspace {id} to {PRIMARY_OUTPUT}");
                Ok(id)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Total height of the mapped dock frames in `area` of `output`.
    pub(super) fn dock_height(&self, output: OutputId, area: DockArea) -> u32 {
        let Some(o) = self.outputs.get(output.0) else {
            return 0;
        };
        o.dock(area)
            .iter()
            .filter_map(|id| self.frames.get(id))
            .filter(|f| f.mapped)
            .map(|f| f.height)
            .sum()
    }

    /// The output rect minus the space taken by docks.
    pub fn usable_area(&self, output: OutputId) -> Option<Rect> {
        let o = self.outputs.get(output.0)?;
        Some(o.usable_area(
            self.dock_height(output, DockArea::Top),
            self.dock_height(output, DockArea::Bottom),
        ))
    }

    /// The area columns of `workspace` are laid out in: the usable area of
    /// its output shrunk by the outer gap.
    pub fn workspace_area(&self, workspace: WorkspaceId) -> Option<Rect> {
        let output = self.workspace(workspace)?.output?;
        Some(self.usable_area(output)?.shrink(self.config.outer_gap))
    }

    /// The only frame of a workspace with exactly one column holding
    /// exactly one frame.
    pub fn single_frame(&self, workspace: WorkspaceId) -> Option<FrameId> {
        match self.workspace(workspace)?.columns.as_slice() {
            [column] => match self.columns.get(column)?.frames.as_slice() {
                [frame] => Some(*frame),
                _ => None,
            },
            _ => None,
        }
    }

    pub(super) fn mapped_frames(&self, column: ColumnId) -> Vec<FrameId> {
        self.columns
            .get(&column)
            .map(|c| {
                c.frames
                    .iter()
                    .copied()
                    .filter(|id| self.frames.get(id).is_some_and(|f| f.mapped))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Recompute column widths and frame heights of `workspace`.
    ///
    /// Columns with at least one mapped frame split the width evenly and
    /// mapped frames split their column's height evenly; the last share
    /// takes the remainder. Everything else gets zero.
    pub fn update_tiling(&mut self, workspace: WorkspaceId) {
        let Some(area) = self.workspace_area(workspace) else {
            return;
        };
        let columns = self.workspace(workspace).map(|ws| ws.columns.clone()).unwrap_or_default();

        let mut visible = Vec::new();
        for &column in &columns {
            let mapped = self.mapped_frames(column);
            if let Some(col) = self.columns.get(&column) {
                for id in col.frames.clone() {
                    if let Some(f) = self.frames.get_mut(&id) {
                        f.height = 0;
                    }
                }
            }
            for (id, height) in mapped.iter().zip(distribute(area.height, mapped.len())) {
                if let Some(f) = self.frames.get_mut(id) {
                    f.height = height;
                }
            }
            if let Some(col) = self.columns.get_mut(&column) {
                col.width = 0;
            }
            if !mapped.is_empty() {
                visible.push(column);
            }
        }

        for (column, width) in visible.iter().zip(distribute(area.width, visible.len())) {
            if let Some(col) = self.columns.get_mut(column) {
                col.width = width;
            }
        }
        trace!(
            "workspace {workspace}: {} of {} columns visible",
            visible.len(),
            columns.len()
        );
    }

    /// Publish workspace count, the active workspace and which workspaces
    /// hold frames.
    pub(super) fn publish_hints(&self, ctx: &Context<'_>) -> Result<()> {
        let occupied = self
            .workspaces
            .iter()
            .filter(|ws| !ws.columns.is_empty())
            .map(|ws| ws.id)
            .collect();
        let state = DesktopState {
            workspace_count: u8::try_from(self.workspaces.len()).unwrap_or(u8::MAX),
            active_workspace: self.active_workspace(),
            occupied,
        };
        ctx.hints.publish(&state)?;
        Ok(())
    }
}
