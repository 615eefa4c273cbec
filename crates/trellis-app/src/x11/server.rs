use tracing::trace;
use trellis_common::errors::ServerError;
use trellis_common::types::{Rect, WindowId};
use trellis_tiling::platform::{self, DisplayServer};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ClientMessageData, ClientMessageEvent, ConfigureNotifyEvent, ConfigureWindowAux,
    ConnectionExt as _, CreateWindowAux, EventMask, InputFocus, SetMode, WindowClass,
    CLIENT_MESSAGE_EVENT, CONFIGURE_NOTIFY_EVENT,
};
use x11rb::{CURRENT_TIME, NONE};

use super::{checked, X11Backend};

fn configure_aux(rect: Rect) -> ConfigureWindowAux {
    ConfigureWindowAux::new()
        .x(i32::try_from(rect.x).unwrap_or(i32::MAX))
        .y(i32::try_from(rect.y).unwrap_or(i32::MAX))
        .width(rect.width)
        .height(rect.height)
}

/// `rect` in the 16-bit fields of a ConfigureNotify, saturating at the
/// largest representable value.
fn notify_geometry(rect: Rect) -> (i16, i16, u16, u16) {
    (
        i16::try_from(rect.x).unwrap_or(i16::MAX),
        i16::try_from(rect.y).unwrap_or(i16::MAX),
        u16::try_from(rect.width).unwrap_or(u16::MAX),
        u16::try_from(rect.height).unwrap_or(u16::MAX),
    )
}

impl X11Backend {
    /// Whether the client asked to be told about focus through
    /// `WM_TAKE_FOCUS` instead of receiving it directly.
    fn takes_focus(&self, window: WindowId) -> bool {
        self.conn
            .get_property(false, window.0, self.atoms.WM_PROTOCOLS, AtomEnum::ATOM, 0, 32)
            .ok()
            .and_then(|c| c.reply().ok())
            .and_then(|reply| {
                reply
                    .value32()
                    .map(|mut atoms| atoms.any(|a| a == self.atoms.WM_TAKE_FOCUS))
            })
            .unwrap_or(false)
    }

    fn send_take_focus(&self, window: WindowId) -> platform::Result<()> {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: window.0,
            type_: self.atoms.WM_PROTOCOLS,
            data: ClientMessageData::from([self.atoms.WM_TAKE_FOCUS, CURRENT_TIME, 0, 0, 0]),
        };
        checked(
            "SendEvent",
            window,
            self.conn
                .send_event(false, window.0, EventMask::NO_EVENT, event),
        )
    }
}

impl DisplayServer for X11Backend {
    fn create_container(&self) -> platform::Result<WindowId> {
        let id = self
            .conn
            .generate_id()
            .map_err(|e| ServerError::request("CreateWindow", WindowId(self.root), e))?;
        let mask = EventMask::SUBSTRUCTURE_REDIRECT
            | EventMask::EXPOSURE
            | EventMask::BUTTON_PRESS
            | EventMask::BUTTON_RELEASE
            | EventMask::FOCUS_CHANGE;
        checked(
            "CreateWindow",
            WindowId(id),
            self.conn.create_window(
                self.root_depth,
                id,
                self.root,
                0,
                0,
                1,
                1,
                0,
                WindowClass::INPUT_OUTPUT,
                self.root_visual,
                &CreateWindowAux::new()
                    .background_pixel(self.border_pixel)
                    .override_redirect(1)
                    .event_mask(mask),
            ),
        )?;
        trace!("created container {}", WindowId(id));
        Ok(WindowId(id))
    }

    fn reparent(&self, window: WindowId, parent: WindowId) -> platform::Result<()> {
        checked(
            "ReparentWindow",
            window,
            self.conn.reparent_window(window.0, parent.0, 0, 0),
        )
    }

    fn add_to_save_set(&self, window: WindowId) -> platform::Result<()> {
        checked(
            "ChangeSaveSet",
            window,
            self.conn.change_save_set(SetMode::INSERT, window.0),
        )
    }

    fn map_window(&self, window: WindowId) -> platform::Result<()> {
        checked("MapWindow", window, self.conn.map_window(window.0))
    }

    fn unmap_window(&self, window: WindowId) -> platform::Result<()> {
        checked("UnmapWindow", window, self.conn.unmap_window(window.0))
    }

    fn destroy_window(&self, window: WindowId) -> platform::Result<()> {
        checked("DestroyWindow", window, self.conn.destroy_window(window.0))
    }

    fn configure_window(&self, window: WindowId, rect: Rect) -> platform::Result<()> {
        checked(
            "ConfigureWindow",
            window,
            self.conn.configure_window(window.0, &configure_aux(rect)),
        )
    }

    fn send_configure_notify(&self, window: WindowId, rect: Rect) -> platform::Result<()> {
        let (x, y, width, height) = notify_geometry(rect);
        let event = ConfigureNotifyEvent {
            response_type: CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: window.0,
            window: window.0,
            above_sibling: NONE,
            x,
            y,
            width,
            height,
            border_width: 0,
            override_redirect: true,
        };
        checked(
            "SendEvent",
            window,
            self.conn
                .send_event(false, window.0, EventMask::STRUCTURE_NOTIFY, event),
        )
    }

    fn set_input_focus(&self, window: Option<WindowId>) -> platform::Result<()> {
        match window {
            Some(window) if self.takes_focus(window) => self.send_take_focus(window),
            Some(window) => checked(
                "SetInputFocus",
                window,
                self.conn
                    .set_input_focus(InputFocus::POINTER_ROOT, window.0, CURRENT_TIME),
            ),
            None => checked(
                "SetInputFocus",
                WindowId(self.root),
                self.conn
                    .set_input_focus(InputFocus::POINTER_ROOT, self.root, CURRENT_TIME),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_aux_carries_rect() {
        let aux = configure_aux(Rect::new(965, 35, 950, 1040));
        assert_eq!((aux.x, aux.y), (Some(965), Some(35)));
        assert_eq!((aux.width, aux.height), (Some(950), Some(1040)));
    }

    #[test]
    fn configure_aux_saturates_origin() {
        let aux = configure_aux(Rect::new(u32::MAX, 0, 10, 10));
        assert_eq!(aux.x, Some(i32::MAX));
    }

    #[test]
    fn notify_geometry_fits_rect() {
        assert_eq!(
            notify_geometry(Rect::new(5, 35, 950, 1040)),
            (5, 35, 950, 1040)
        );
    }

    #[test]
    fn notify_geometry_saturates() {
        assert_eq!(
            notify_geometry(Rect::new(40_000, 10, 70_000, 1)),
            (i16::MAX, 10, u16::MAX, 1)
        );
    }
}
