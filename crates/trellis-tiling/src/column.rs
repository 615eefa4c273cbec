use trellis_common::types::{ColumnId, FrameId, WorkspaceId};

/// An ordered top-to-bottom run of frames sharing one horizontal slice of
/// a workspace.
#[derive(Debug, Clone)]
pub struct Column {
    pub id: ColumnId,
    pub(crate) workspace: WorkspaceId,
    pub(crate) frames: Vec<FrameId>,
    /// Horizontal share of the workspace area in pixels.
    pub width: u32,
}

impl Column {
    pub(crate) fn new(id: ColumnId, workspace: WorkspaceId) -> Self {
        Self {
            id,
            workspace,
            frames: Vec::new(),
            width: 0,
        }
    }

    pub fn workspace(&self) -> WorkspaceId {
        self.workspace
    }

    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn position(&self, frame: FrameId) -> Option<usize> {
        self.frames.iter().position(|&f| f == frame)
    }

    /// Insert at `index`, or append when `None` or past the end.
    pub(crate) fn insert(&mut self, frame: FrameId, index: Option<usize>) {
        match index {
            Some(i) if i <= self.frames.len() => self.frames.insert(i, frame),
            _ => self.frames.push(frame),
        }
    }

    pub(crate) fn remove(&mut self, frame: FrameId) -> bool {
        match self.position(frame) {
            Some(i) => {
                self.frames.remove(i);
                true
            }
            None => false,
        }
    }

    /// Swap `frame` with its neighbour above or below. Returns `false` at
    /// the boundary.
    pub(crate) fn shift(&mut self, frame: FrameId, up: bool) -> bool {
        let Some(i) = self.position(frame) else {
            return false;
        };
        let j = if up {
            match i.checked_sub(1) {
                Some(j) => j,
                None => return false,
            }
        } else {
            i + 1
        };
        if j >= self.frames.len() {
            return false;
        }
        self.frames.swap(i, j);
        true
    }
}
