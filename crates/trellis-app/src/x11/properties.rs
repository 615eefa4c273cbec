use tracing::debug;
use trellis_common::types::{Rect, WindowId};
use trellis_tiling::platform::{self, Decoration, Decorations, DesktopHints, DesktopState, PropertyReader};
use trellis_tiling::WindowKind;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt as _, PropMode};
use x11rb::wrapper::ConnectionExt as _;
use x11rb::NONE;

use super::{checked, X11Backend};

/// Map `_NET_WM_WINDOW_TYPE` values to a placement. Windows without a type
/// are normal.
pub(crate) fn classify(types: &[Atom], dock: Atom, tiled: &[Atom]) -> WindowKind {
    if types.contains(&dock) {
        WindowKind::Dock
    } else if types.is_empty() || types.iter().any(|t| tiled.contains(t)) {
        WindowKind::Normal
    } else {
        WindowKind::Unknown
    }
}

/// Root-relative geometry with off-screen origins clamped to zero.
pub(crate) fn clamp_geometry(x: i16, y: i16, width: u16, height: u16) -> Rect {
    Rect::new(
        u32::try_from(x).unwrap_or(0),
        u32::try_from(y).unwrap_or(0),
        u32::from(width),
        u32::from(height),
    )
}

impl X11Backend {
    fn text_property(&self, window: WindowId, property: Atom, type_: Atom) -> Option<String> {
        let reply = self
            .conn
            .get_property(false, window.0, property, type_, 0, 1024)
            .ok()?
            .reply()
            .ok()?;
        if reply.value.is_empty() {
            return None;
        }
        String::from_utf8(reply.value).ok()
    }
}

impl PropertyReader for X11Backend {
    fn window_title(&self, window: WindowId) -> Option<String> {
        self.text_property(window, self.atoms._NET_WM_NAME, self.atoms.UTF8_STRING)
            .or_else(|| {
                self.text_property(window, AtomEnum::WM_NAME.into(), AtomEnum::STRING.into())
            })
    }

    fn window_kind(&self, window: WindowId) -> WindowKind {
        let types: Vec<Atom> = self
            .conn
            .get_property(
                false,
                window.0,
                self.atoms._NET_WM_WINDOW_TYPE,
                AtomEnum::ATOM,
                0,
                32,
            )
            .ok()
            .and_then(|c| c.reply().ok())
            .and_then(|reply| reply.value32().map(Iterator::collect))
            .unwrap_or_default();
        classify(
            &types,
            self.atoms._NET_WM_WINDOW_TYPE_DOCK,
            &[
                self.atoms._NET_WM_WINDOW_TYPE_NORMAL,
                self.atoms._NET_WM_WINDOW_TYPE_DIALOG,
                self.atoms._NET_WM_WINDOW_TYPE_UTILITY,
            ],
        )
    }

    fn window_geometry(&self, window: WindowId) -> Option<Rect> {
        let geometry = self.conn.get_geometry(window.0).ok()?.reply().ok()?;
        Some(clamp_geometry(
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
        ))
    }
}

impl DesktopHints for X11Backend {
    fn publish(&self, state: &DesktopState) -> platform::Result<()> {
        let root = WindowId(self.root);
        let current = state.active_workspace.map_or(0, |ws| u32::from(ws.0));
        checked(
            "ChangeProperty",
            root,
            self.conn.change_property32(
                PropMode::REPLACE,
                self.root,
                self.atoms._NET_NUMBER_OF_DESKTOPS,
                AtomEnum::CARDINAL,
                &[u32::from(state.workspace_count)],
            ),
        )?;
        checked(
            "ChangeProperty",
            root,
            self.conn.change_property32(
                PropMode::REPLACE,
                self.root,
                self.atoms._NET_CURRENT_DESKTOP,
                AtomEnum::CARDINAL,
                &[current],
            ),
        )?;
        debug!(occupied = ?state.occupied, "published desktop {current}");
        Ok(())
    }

    fn set_active_window(&self, window: Option<WindowId>) -> platform::Result<()> {
        checked(
            "ChangeProperty",
            WindowId(self.root),
            self.conn.change_property32(
                PropMode::REPLACE,
                self.root,
                self.atoms._NET_ACTIVE_WINDOW,
                AtomEnum::WINDOW,
                &[window.map_or(NONE, |w| w.0)],
            ),
        )
    }
}

impl Decorations for X11Backend {
    fn redraw(&self, decoration: &Decoration<'_>) -> platform::Result<()> {
        debug!(
            title = decoration.title.unwrap_or_default(),
            top = decoration.insets.top,
            "decoration of {} needs redraw",
            decoration.container
        );
        Ok(())
    }
}
