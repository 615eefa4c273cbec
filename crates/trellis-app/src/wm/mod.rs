//! Event loop: routes X events into the tiling engine.

mod pending;

use tracing::{debug, info, trace, warn};
use trellis_common::types::{WindowId, WorkspaceId};
use trellis_common::TrellisError;
use trellis_tiling::{Context, DisplayServer, TilingConfig, TilingManager};
use x11rb::protocol::xproto::{AtomEnum, ConfigureRequestEvent};
use x11rb::protocol::Event;

use crate::x11::X11Backend;
use pending::PendingUnmaps;

pub struct WindowManager {
    backend: X11Backend,
    tiling: TilingManager,
    pending_unmaps: PendingUnmaps,
}

impl WindowManager {
    pub fn new(backend: X11Backend, config: TilingConfig) -> Self {
        Self {
            backend,
            tiling: TilingManager::new(config),
            pending_unmaps: PendingUnmaps::default(),
        }
    }

    /// Become the window manager, register the screen as the only output
    /// and adopt the windows that are already visible.
    pub fn start(&mut self) -> Result<(), TrellisError> {
        self.backend.become_wm()?;
        self.backend.setup_ewmh()?;
        let output = self.tiling.add_output(self.backend.screen_rect());
        debug!("managing {output}");

        for window in self.backend.existing_windows()? {
            info!("adopting existing window {window}");
            self.manage(window, true);
        }
        Ok(())
    }

    /// Process events until the connection fails.
    pub fn run(&mut self) -> Result<(), TrellisError> {
        info!("entering event loop");
        loop {
            let event = self.backend.wait_for_event()?;
            if let Err(e) = self.handle_event(event) {
                warn!("event handling failed: {e}");
            }
        }
    }

    fn manage(&mut self, window: WindowId, viewable: bool) {
        if let Err(e) = self.backend.select_client_events(window) {
            warn!("not managing {window}: {e}");
            return;
        }
        let known = self.tiling.frame_by_window(window).is_some();
        let ctx = Context::new(&self.backend);
        match self.tiling.manage_window(&ctx, window) {
            Ok(frame) => {
                let reparented = self
                    .tiling
                    .frame(frame)
                    .is_some_and(|f| f.container.is_some());
                // Reparenting a visible window makes the server unmap it once.
                if viewable && !known && reparented {
                    self.pending_unmaps.expect(window);
                }
            }
            Err(e) => warn!("failed to manage {window}: {e}"),
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<(), TrellisError> {
        let ctx = Context::new(&self.backend);
        match event {
            Event::MapRequest(e) => {
                let window = WindowId(e.window);
                if self.backend.is_override_redirect(window) {
                    trace!("ignoring override-redirect {window}");
                    return Ok(());
                }
                self.manage(window, false);
            }
            // Only the client's own StructureNotify copy is handled; the root
            // and container see the same event through SubstructureNotify.
            Event::UnmapNotify(e) if e.event == e.window => {
                let window = WindowId(e.window);
                if self.pending_unmaps.take(window) {
                    trace!("skipping reparent unmap of {window}");
                    return Ok(());
                }
                self.tiling.on_unmap(&ctx, window)?;
            }
            Event::DestroyNotify(e) if e.event == e.window => {
                let window = WindowId(e.window);
                self.pending_unmaps.forget(window);
                self.tiling.on_destroy(&ctx, window)?;
            }
            Event::PropertyNotify(e) => {
                let atoms = &self.backend.atoms;
                if e.atom == atoms._NET_WM_NAME || e.atom == u32::from(AtomEnum::WM_NAME) {
                    self.tiling.on_title_changed(&ctx, WindowId(e.window))?;
                }
            }
            Event::EnterNotify(e) => {
                self.tiling.set_focus(&ctx, WindowId(e.event))?;
            }
            Event::ConfigureRequest(e) => self.on_configure_request(&e)?,
            Event::ClientMessage(e) if e.type_ == self.backend.atoms._NET_CURRENT_DESKTOP => {
                let desktop = e.data.as_data32()[0];
                match u8::try_from(desktop) {
                    Ok(id) => self.tiling.switch_workspace(&ctx, WorkspaceId(id))?,
                    Err(_) => warn!("ignoring request for desktop {desktop}"),
                }
            }
            other => trace!(?other, "unhandled event"),
        }
        Ok(())
    }

    /// Managed windows are told their current geometry and otherwise left
    /// alone; anything else is configured as requested.
    fn on_configure_request(&self, e: &ConfigureRequestEvent) -> Result<(), TrellisError> {
        let window = WindowId(e.window);
        match self.tiling.frame_by_window(window).and_then(|id| self.tiling.frame(id)) {
            Some(frame) if frame.is_mapped() => {
                self.backend.send_configure_notify(window, frame.geometry)?;
            }
            Some(_) => debug!("ignoring configure request of hidden {window}"),
            None => self.backend.configure_unmanaged(e)?,
        }
        Ok(())
    }
}
