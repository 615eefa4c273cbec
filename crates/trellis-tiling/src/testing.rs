//! Recording fake backend for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use trellis_common::errors::ServerError;
use trellis_common::types::{Insets, Rect, WindowId};

use crate::frame::WindowKind;
use crate::platform::{
    Decoration, Decorations, DesktopHints, DesktopState, DisplayServer, PropertyReader, Result,
};

pub(crate) const FIRST_CONTAINER: u32 = 0x0010_0000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    CreateContainer(WindowId),
    Reparent { window: WindowId, parent: WindowId },
    SaveSet(WindowId),
    Map(WindowId),
    Unmap(WindowId),
    Destroy(WindowId),
    Configure(WindowId, Rect),
    ConfigureNotify(WindowId, Rect),
    Focus(Option<WindowId>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Redraw {
    pub container: WindowId,
    pub title: Option<String>,
    pub insets: Insets,
}

#[derive(Default)]
pub(crate) struct FakeServer {
    next_container: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<HashSet<(&'static str, Option<WindowId>)>>,
    titles: RefCell<HashMap<WindowId, String>>,
    kinds: RefCell<HashMap<WindowId, WindowKind>>,
    geometries: RefCell<HashMap<WindowId, Rect>>,
    pub published: RefCell<Vec<DesktopState>>,
    pub active_windows: RefCell<Vec<Option<WindowId>>>,
    pub redraws: RefCell<Vec<Redraw>>,
}

impl FakeServer {
    pub fn new() -> Self {
        let server = Self::default();
        server.next_container.set(FIRST_CONTAINER);
        server
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make `request` fail for `window`, or for every window when `None`.
    pub fn fail(&self, request: &'static str, window: Option<WindowId>) {
        self.failures.borrow_mut().insert((request, window));
    }

    pub fn set_title(&self, window: WindowId, title: &str) {
        self.titles.borrow_mut().insert(window, title.to_string());
    }

    pub fn set_dock(&self, window: WindowId, geometry: Rect) {
        self.kinds.borrow_mut().insert(window, WindowKind::Dock);
        self.geometries.borrow_mut().insert(window, geometry);
    }

    pub fn set_kind(&self, window: WindowId, kind: WindowKind) {
        self.kinds.borrow_mut().insert(window, kind);
    }

    fn check(&self, request: &'static str, window: WindowId) -> Result<()> {
        let failures = self.failures.borrow();
        if failures.contains(&(request, Some(window))) || failures.contains(&(request, None)) {
            return Err(ServerError::request(request, window, "injected failure"));
        }
        Ok(())
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl DisplayServer for FakeServer {
    fn create_container(&self) -> Result<WindowId> {
        let id = WindowId(self.next_container.get());
        self.check("CreateWindow", id)?;
        self.next_container.set(id.0 + 1);
        self.record(Call::CreateContainer(id));
        Ok(id)
    }

    fn reparent(&self, window: WindowId, parent: WindowId) -> Result<()> {
        self.check("ReparentWindow", window)?;
        self.record(Call::Reparent { window, parent });
        Ok(())
    }

    fn add_to_save_set(&self, window: WindowId) -> Result<()> {
        self.check("ChangeSaveSet", window)?;
        self.record(Call::SaveSet(window));
        Ok(())
    }

    fn map_window(&self, window: WindowId) -> Result<()> {
        self.check("MapWindow", window)?;
        self.record(Call::Map(window));
        Ok(())
    }

    fn unmap_window(&self, window: WindowId) -> Result<()> {
        self.check("UnmapWindow", window)?;
        self.record(Call::Unmap(window));
        Ok(())
    }

    fn destroy_window(&self, window: WindowId) -> Result<()> {
        self.check("DestroyWindow", window)?;
        self.record(Call::Destroy(window));
        Ok(())
    }

    fn configure_window(&self, window: WindowId, rect: Rect) -> Result<()> {
        self.check("ConfigureWindow", window)?;
        self.record(Call::Configure(window, rect));
        Ok(())
    }

    fn send_configure_notify(&self, window: WindowId, rect: Rect) -> Result<()> {
        self.check("SendEvent", window)?;
        self.record(Call::ConfigureNotify(window, rect));
        Ok(())
    }

    fn set_input_focus(&self, window: Option<WindowId>) -> Result<()> {
        if let Some(window) = window {
            self.check("SetInputFocus", window)?;
        }
        self.record(Call::Focus(window));
        Ok(())
    }
}

impl PropertyReader for FakeServer {
    fn window_title(&self, window: WindowId) -> Option<String> {
        self.titles.borrow().get(&window).cloned()
    }

    fn window_kind(&self, window: WindowId) -> WindowKind {
        self.kinds
            .borrow()
            .get(&window)
            .copied()
            .unwrap_or(WindowKind::Normal)
    }

    fn window_geometry(&self, window: WindowId) -> Option<Rect> {
        self.geometries.borrow().get(&window).copied()
    }
}

impl DesktopHints for FakeServer {
    fn publish(&self, state: &DesktopState) -> Result<()> {
        self.published.borrow_mut().push(state.clone());
        Ok(())
    }

    fn set_active_window(&self, window: Option<WindowId>) -> Result<()> {
        self.active_windows.borrow_mut().push(window);
        Ok(())
    }
}

impl Decorations for FakeServer {
    fn redraw(&self, decoration: &Decoration<'_>) -> Result<()> {
        self.redraws.borrow_mut().push(Redraw {
            container: decoration.container,
            title: decoration.title.map(str::to_string),
            insets: decoration.insets,
        });
        Ok(())
    }
}
