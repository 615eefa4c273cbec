use trellis_common::types::{FrameId, OutputId, Rect, WorkspaceId};

/// Edge of an output where dock frames are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockArea {
    Top,
    Bottom,
}

impl DockArea {
    pub const ALL: [DockArea; 2] = [DockArea::Top, DockArea::Bottom];

    fn index(self) -> usize {
        match self {
            DockArea::Top => 0,
            DockArea::Bottom => 1,
        }
    }

    /// Top unless the window sits in the lower half of `screen`.
    pub fn for_geometry(screen: Rect, window: Rect) -> Self {
        let (_, center_y) = window.center();
        if center_y > screen.y + screen.height / 2 {
            DockArea::Bottom
        } else {
            DockArea::Top
        }
    }
}

/// A physical display area.
#[derive(Debug, Clone)]
pub struct Output {
    pub id: OutputId,
    pub rect: Rect,
    docks: [Vec<FrameId>; 2],
    pub(crate) workspaces: Vec<WorkspaceId>,
    pub(crate) active: Option<WorkspaceId>,
}

impl Output {
    pub(crate) fn new(id: OutputId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            docks: [Vec::new(), Vec::new()],
            workspaces: Vec::new(),
            active: None,
        }
    }

    pub fn dock(&self, area: DockArea) -> &[FrameId] {
        &self.docks[area.index()]
    }

    pub(crate) fn add_dock_frame(&mut self, area: DockArea, frame: FrameId) {
        self.docks[area.index()].push(frame);
    }

    /// Remove `frame` from whichever dock area holds it.
    pub(crate) fn remove_dock_frame(&mut self, frame: FrameId) -> Option<DockArea> {
        for area in DockArea::ALL {
            let dock = &mut self.docks[area.index()];
            if let Some(i) = dock.iter().position(|&f| f == frame) {
                dock.remove(i);
                return Some(area);
            }
        }
        None
    }

    pub fn workspaces(&self) -> &[WorkspaceId] {
        &self.workspaces
    }

    pub fn active_workspace(&self) -> Option<WorkspaceId> {
        self.active
    }

    pub(crate) fn add_workspace(&mut self, workspace: WorkspaceId) {
        if !self.workspaces.contains(&workspace) {
            self.workspaces.push(workspace);
        }
    }

    /// The output rect minus the given top and bottom dock heights.
    pub fn usable_area(&self, top: u32, bottom: u32) -> Rect {
        Rect {
            x: self.rect.x,
            y: self.rect.y + top,
            width: self.rect.width,
            height: self.rect.height.saturating_sub(top + bottom),
        }
    }
}
