use trellis_common::types::WorkspaceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    /// Trade width with a neighbouring column.
    Horizontal,
    /// Trade height with a neighbouring frame in the same column.
    Vertical,
}

/// A resolved logical action delivered by the key/action dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingCommand {
    MoveFocused(MoveDirection),
    FocusDirection(MoveDirection),
    Resize(ResizeDirection, i32),
    SwitchWorkspace(WorkspaceId),
    MoveFocusedToWorkspace(WorkspaceId),
}
