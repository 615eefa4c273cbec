//! The TilingManager owns the frame/column/workspace/output tree and every
//! operation that mutates or renders it.

mod dispatch;
mod focus;
mod lifecycle;
mod moves;
mod render;
mod tree;


use std::collections::HashMap;

use trellis_common::errors::TilingError;
use trellis_common::types::{ColumnId, FrameId, OutputId, Rect, WindowId, WorkspaceId};

use crate::column::Column;
use crate::frame::Frame;
use crate::layout::TilingConfig;
use crate::output::Output;
use crate::workspace::Workspace;

pub type Result<T> = std::result::Result<T, TilingError>;

/// The output every operation acts on. Further outputs can be registered
/// and own workspaces, but only this one is driven.
pub const PRIMARY_OUTPUT: OutputId = OutputId(0);

/// Arena of frames, columns, workspaces and outputs.
///
/// Parent/child links are id lists on the parent and plain ids on the
/// child; nothing holds a reference into the arena.
pub struct TilingManager {
    pub(super) frames: HashMap<FrameId, Frame>,
    pub(super) columns: HashMap<ColumnId, Column>,
    /// Indexed by `WorkspaceId`.
    pub(super) workspaces: Vec<Workspace>,
    /// Indexed by `OutputId`.
    pub(super) outputs: Vec<Output>,
    pub(super) focused: Option<FrameId>,
    pub(super) config: TilingConfig,
    next_frame: u32,
    next_column: u32,
}

impl TilingManager {
    /// Create a manager with `config.workspace_count` empty, unassigned
    /// workspaces and no outputs.
    pub fn new(config: TilingConfig) -> Self {
        let workspaces = (0..config.workspace_count)
            .map(|i| Workspace::new(WorkspaceId(i)))
            .collect();
        Self {
            frames: HashMap::new(),
            columns: HashMap::new(),
            workspaces,
            outputs: Vec::new(),
            focused: None,
            config,
            next_frame: 1,
            next_column: 1,
        }
    }

    /// Register a display. The first unassigned workspace is attached to
    /// it and becomes its active workspace.
    pub fn add_output(&mut self, rect: Rect) -> OutputId {
        let id = OutputId(self.outputs.len());
        let mut output = Output::new(id, rect);
        if let Some(ws) = self.workspaces.iter_mut().find(|ws| ws.output.is_none()) {
            ws.output = Some(id);
            output.add_workspace(ws.id);
            output.active = Some(ws.id);
        }
        tracing::info!(
            "added {id} {}x{}+{}+{}",
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );
        self.outputs.push(output);
        id
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &TilingConfig {
        &self.config
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(&id)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_by_window(&self, window: WindowId) -> Option<FrameId> {
        self.frames
            .values()
            .find(|f| f.window == window)
            .map(|f| f.id)
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(&id)
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.get(usize::from(id.0))
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }

    pub fn output(&self, id: OutputId) -> Option<&Output> {
        self.outputs.get(id.0)
    }

    pub fn focused(&self) -> Option<FrameId> {
        self.focused
    }

    /// The visible workspace of the primary output.
    pub fn active_workspace(&self) -> Option<WorkspaceId> {
        self.outputs.get(PRIMARY_OUTPUT.0).and_then(|o| o.active)
    }

    /// The workspace whose columns hold `frame`. Dock frames have none.
    pub fn workspace_of(&self, frame: FrameId) -> Option<WorkspaceId> {
        let column = self.frames.get(&frame)?.column?;
        self.columns.get(&column).map(|c| c.workspace)
    }

    /// All frames of a workspace, columns left to right, frames top to bottom.
    pub fn workspace_frames(&self, workspace: WorkspaceId) -> Vec<FrameId> {
        let Some(ws) = self.workspace(workspace) else {
            return Vec::new();
        };
        ws.columns
            .iter()
            .filter_map(|c| self.columns.get(c))
            .flat_map(|c| c.frames.iter().copied())
            .collect()
    }

    /// Whether `workspace` is the active workspace of the output it is on.
    pub fn is_visible(&self, workspace: WorkspaceId) -> bool {
        self.workspace(workspace)
            .and_then(|ws| ws.output)
            .and_then(|o| self.outputs.get(o.0))
            .is_some_and(|o| o.active == Some(workspace))
    }
}
