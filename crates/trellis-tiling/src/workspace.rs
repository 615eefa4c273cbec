use trellis_common::types::{ColumnId, FrameId, OutputId, WorkspaceId};

/// An ordered left-to-right run of columns, shown on at most one output.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub(crate) columns: Vec<ColumnId>,
    pub(crate) output: Option<OutputId>,
    /// Frames in focus order, most recent last.
    focus_history: Vec<FrameId>,
}

impl Workspace {
    pub(crate) fn new(id: WorkspaceId) -> Self {
        Self {
            id,
            columns: Vec::new(),
            output: None,
            focus_history: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn output(&self) -> Option<OutputId> {
        self.output
    }

    pub fn column_position(&self, column: ColumnId) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    pub(crate) fn remove_column(&mut self, column: ColumnId) -> bool {
        match self.column_position(column) {
            Some(i) => {
                self.columns.remove(i);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remember_focus(&mut self, frame: FrameId) {
        self.forget_focus(frame);
        self.focus_history.push(frame);
    }

    pub(crate) fn forget_focus(&mut self, frame: FrameId) {
        self.focus_history.retain(|&f| f != frame);
    }

    /// Focus history, most recent first.
    pub fn recent_focus(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.focus_history.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_workspace_is_unassigned_and_empty() {
        let ws = Workspace::new(WorkspaceId(3));
        assert_eq!(ws.output(), None);
        assert!(ws.columns().is_empty());
        assert_eq!(ws.recent_focus().next(), None);
    }

    #[test]
    fn remove_column_by_id() {
        let mut ws = Workspace::new(WorkspaceId(0));
        ws.columns = vec![ColumnId(1), ColumnId(2)];
        assert!(ws.remove_column(ColumnId(1)));
        assert!(!ws.remove_column(ColumnId(1)));
        assert_eq!(ws.columns(), &[ColumnId(2)]);
        assert_eq!(ws.column_position(ColumnId(2)), Some(0));
    }

    #[test]
    fn focus_history_is_most_recent_last() {
        let mut ws = Workspace::new(WorkspaceId(0));
        ws.remember_focus(FrameId(1));
        ws.remember_focus(FrameId(2));
        ws.remember_focus(FrameId(1));
        assert_eq!(
            ws.recent_focus().collect::<Vec<_>>(),
            vec![FrameId(1), FrameId(2)]
        );
        ws.forget_focus(FrameId(1));
        assert_eq!(ws.recent_focus().collect::<Vec<_>>(), vec![FrameId(2)]);
    }
}
