//! X11 backend over `x11rb`: the display server, property, hint and
//! decoration collaborators of the tiling engine.

mod atoms;
mod properties;
mod server;

pub use atoms::Atoms;

use tracing::{debug, info};
use trellis_common::errors::ServerError;
use trellis_common::types::{Color, Rect, WindowId};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::cookie::VoidCookie;
use x11rb::errors::ConnectionError;
use x11rb::protocol::xproto::{
    ChangeWindowAttributesAux, ConfigureRequestEvent, ConfigureWindowAux, ConnectionExt as _,
    CreateWindowAux, EventMask, MapState, PropMode, AtomEnum, Visualid, Window, WindowClass,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Issue a request and wait for the server to acknowledge it.
fn checked<C>(
    request: &'static str,
    window: WindowId,
    cookie: std::result::Result<VoidCookie<'_, C>, ConnectionError>,
) -> Result<()>
where
    C: RequestConnection + ?Sized,
{
    cookie
        .map_err(|e| ServerError::request(request, window, e))?
        .check()
        .map_err(|e| ServerError::request(request, window, e))
}

/// Only an explicit override-redirect flag keeps a window unmanaged.
fn bypasses_wm(override_redirect: Option<bool>) -> bool {
    override_redirect.unwrap_or(false)
}

fn connection_error(e: impl std::fmt::Display) -> ServerError {
    ServerError::Connection(e.to_string())
}

pub struct X11Backend {
    conn: RustConnection,
    root: Window,
    root_depth: u8,
    root_visual: Visualid,
    screen: Rect,
    border_pixel: u32,
    pub(crate) atoms: Atoms,
}

impl X11Backend {
    /// Connect to `display` (or `$DISPLAY`). Containers are filled with
    /// `border_color`, black when unset.
    pub fn connect(display: Option<&str>, border_color: Option<Color>) -> Result<Self> {
        let (conn, screen_num) = RustConnection::connect(display).map_err(connection_error)?;
        let screen = conn
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| ServerError::Connection(format!("no screen {screen_num}")))?;
        let root = screen.root;
        let root_depth = screen.root_depth;
        let root_visual = screen.root_visual;
        let rect = Rect::new(
            0,
            0,
            u32::from(screen.width_in_pixels),
            u32::from(screen.height_in_pixels),
        );
        let atoms = Atoms::new(&conn)
            .map_err(connection_error)?
            .reply()
            .map_err(connection_error)?;

        info!(
            "connected to X11 screen {screen_num}, root {}, {}x{}",
            WindowId(root),
            rect.width,
            rect.height
        );
        Ok(Self {
            conn,
            root,
            root_depth,
            root_visual,
            screen: rect,
            border_pixel: border_color.map_or(0, |c| c.to_pixel()),
            atoms,
        })
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen
    }

    /// Take the window manager role by redirecting substructure requests on
    /// the root window. Fails if another window manager holds it.
    pub fn become_wm(&self) -> Result<()> {
        let mask = EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::SUBSTRUCTURE_NOTIFY
            | EventMask::STRUCTURE_NOTIFY;
        checked(
            "ChangeWindowAttributes",
            WindowId(self.root),
            self.conn.change_window_attributes(
                self.root,
                &ChangeWindowAttributesAux::new().event_mask(mask),
            ),
        )
        .map_err(|e| {
            ServerError::Connection(format!("another window manager is already running ({e})"))
        })?;
        info!("became the window manager");
        Ok(())
    }

    /// Advertise EWMH support through a check window.
    pub fn setup_ewmh(&self) -> Result<()> {
        let root = WindowId(self.root);
        let check = self
            .conn
            .generate_id()
            .map_err(|e| ServerError::request("CreateWindow", root, e))?;
        checked(
            "CreateWindow",
            WindowId(check),
            self.conn.create_window(
                0,
                check,
                self.root,
                -1,
                -1,
                1,
                1,
                0,
                WindowClass::INPUT_ONLY,
                0,
                &CreateWindowAux::new(),
            ),
        )?;

        let supported = [
            self.atoms._NET_SUPPORTED,
            self.atoms._NET_SUPPORTING_WM_CHECK,
            self.atoms._NET_WM_NAME,
            self.atoms._NET_NUMBER_OF_DESKTOPS,
            self.atoms._NET_CURRENT_DESKTOP,
            self.atoms._NET_ACTIVE_WINDOW,
            self.atoms._NET_WM_WINDOW_TYPE,
            self.atoms._NET_WM_WINDOW_TYPE_DOCK,
        ];
        let props = [
            self.conn.change_property32(
                PropMode::REPLACE,
                self.root,
                self.atoms._NET_SUPPORTED,
                AtomEnum::ATOM,
                &supported,
            ),
            self.conn.change_property32(
                PropMode::REPLACE,
                self.root,
                self.atoms._NET_SUPPORTING_WM_CHECK,
                AtomEnum::WINDOW,
                &[check],
            ),
            self.conn.change_property32(
                PropMode::REPLACE,
                check,
                self.atoms._NET_SUPPORTING_WM_CHECK,
                AtomEnum::WINDOW,
                &[check],
            ),
            self.conn.change_property8(
                PropMode::REPLACE,
                check,
                self.atoms._NET_WM_NAME,
                self.atoms.UTF8_STRING,
                b"trellis",
            ),
        ];
        for cookie in props {
            checked("ChangeProperty", root, cookie)?;
        }
        debug!("EWMH check window {}", WindowId(check));
        Ok(())
    }

    /// Top-level windows that are already visible and not override-redirect.
    pub fn existing_windows(&self) -> Result<Vec<WindowId>> {
        let root = WindowId(self.root);
        let tree = self
            .conn
            .query_tree(self.root)
            .map_err(|e| ServerError::request("QueryTree", root, e))?
            .reply()
            .map_err(|e| ServerError::request("QueryTree", root, e))?;

        let mut windows = Vec::new();
        for window in tree.children {
            let Ok(attrs) = self
                .conn
                .get_window_attributes(window)
                .map_err(connection_error)
                .and_then(|c| c.reply().map_err(connection_error))
            else {
                continue;
            };
            if !attrs.override_redirect && attrs.map_state == MapState::VIEWABLE {
                windows.push(WindowId(window));
            }
        }
        Ok(windows)
    }

    /// Whether the window asked to bypass the window manager.
    pub fn is_override_redirect(&self, window: WindowId) -> bool {
        let attrs = self
            .conn
            .get_window_attributes(window.0)
            .ok()
            .and_then(|c| c.reply().ok());
        if attrs.is_none() {
            debug!("attributes of {window} unreadable, managing it");
        }
        bypasses_wm(attrs.map(|a| a.override_redirect))
    }

    /// Subscribe to the client events the event loop routes into the engine.
    pub fn select_client_events(&self, window: WindowId) -> Result<()> {
        let mask =
            EventMask::STRUCTURE_NOTIFY | EventMask::PROPERTY_CHANGE | EventMask::ENTER_WINDOW;
        checked(
            "ChangeWindowAttributes",
            window,
            self.conn
                .change_window_attributes(window.0, &ChangeWindowAttributesAux::new().event_mask(mask)),
        )
    }

    /// Apply a configure request from a window we do not manage as asked.
    pub fn configure_unmanaged(&self, request: &ConfigureRequestEvent) -> Result<()> {
        let aux = ConfigureWindowAux::from_configure_request(request);
        checked(
            "ConfigureWindow",
            WindowId(request.window),
            self.conn.configure_window(request.window, &aux),
        )
    }

    pub fn wait_for_event(&self) -> Result<Event> {
        self.conn.flush().map_err(connection_error)?;
        self.conn.wait_for_event().map_err(connection_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_redirect_windows_bypass() {
        assert!(bypasses_wm(Some(true)));
        assert!(!bypasses_wm(Some(false)));
    }

    #[test]
    fn unreadable_attributes_are_managed() {
        assert!(!bypasses_wm(None));
    }
}
