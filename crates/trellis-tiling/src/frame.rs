//! Frames: one managed window plus its container and lifecycle state.
//!
//! ```text
//! unmanaged --create--> managed(unmapped) --map--> managed(mapped)
//!                              ^                        |
//!                              +----on_server_unmap-----+
//! managed(*) --on_server_destroy--> destroyed
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trellis_common::errors::{ServerError, TilingError};
use trellis_common::types::{ColumnId, FrameId, Rect, WindowId};

use crate::layout::TilingConfig;
use crate::platform::{Context, Decoration, DisplayServer};

/// How a managed window is placed and decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Reparented into a decorated container and tiled in a column.
    Normal,
    /// Stacked along an output edge at its own height, never reparented.
    Dock,
    /// Tiled in a column but left undecorated and unparented.
    Unknown,
}

#[derive(Debug)]
pub struct Frame {
    pub id: FrameId,
    /// The client window.
    pub window: WindowId,
    /// The reparenting container, present for normal windows only.
    pub container: Option<WindowId>,
    pub kind: WindowKind,
    pub(crate) column: Option<ColumnId>,
    pub(crate) mapped: bool,
    /// The last rect assigned by the render pass.
    pub geometry: Rect,
    /// Vertical share within the column, or the fixed height of a dock.
    pub height: u32,
    pub title: Option<String>,
}

impl Frame {
    /// Start managing `window`.
    ///
    /// Normal windows get a container window and are reparented into it.
    /// If either request fails the window is left unmanaged and the error
    /// is returned.
    pub fn create(
        ctx: &Context<'_>,
        id: FrameId,
        window: WindowId,
        kind: WindowKind,
    ) -> Result<Self, TilingError> {
        let mut frame = Frame {
            id,
            window,
            container: None,
            kind,
            column: None,
            mapped: false,
            geometry: Rect::default(),
            height: 0,
            title: ctx.properties.window_title(window),
        };

        match kind {
            WindowKind::Normal => {
                let container = ctx.server.create_container()?;
                if let Err(e) = frame.reparent(ctx.server, container) {
                    if let Err(cleanup) = ctx.server.destroy_window(container) {
                        warn!("failed to destroy orphaned container {container}: {cleanup}");
                    }
                    return Err(e.into());
                }
            }
            WindowKind::Dock | WindowKind::Unknown => {}
        }

        debug!(window = %window, ?kind, "created {id}");
        Ok(frame)
    }

    fn reparent(&mut self, server: &dyn DisplayServer, parent: WindowId) -> Result<(), ServerError> {
        server.reparent(self.window, parent)?;
        self.container = Some(parent);
        if let Err(e) = server.add_to_save_set(self.window) {
            warn!("could not add {} to the save-set: {e}", self.window);
        }
        Ok(())
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    pub fn column(&self) -> Option<ColumnId> {
        self.column
    }

    /// Map the container and the client.
    pub fn map(&mut self, server: &dyn DisplayServer) -> Result<(), ServerError> {
        if let Some(container) = self.container {
            server.map_window(container)?;
        }
        server.map_window(self.window)?;
        self.mapped = true;
        Ok(())
    }

    /// Ask the server to unmap the client. The frame stays mapped until the
    /// resulting notification reaches [`Frame::on_server_unmap`].
    pub fn unmap(&self, server: &dyn DisplayServer) -> Result<(), ServerError> {
        server.unmap_window(self.window)
    }

    /// Handle the server's unmap notification for the client, whether we
    /// requested it or the client withdrew itself.
    pub fn on_server_unmap(&mut self, server: &dyn DisplayServer) -> Result<(), ServerError> {
        if !self.mapped {
            return Ok(());
        }
        if let Some(container) = self.container {
            server.unmap_window(container)?;
        }
        self.mapped = false;
        Ok(())
    }

    /// Handle the server's destroy notification for the client. The caller
    /// removes the frame from its container afterwards.
    pub fn on_server_destroy(&mut self, server: &dyn DisplayServer) -> Result<(), ServerError> {
        if let Some(container) = self.container.take() {
            server.destroy_window(container)?;
        }
        self.mapped = false;
        Ok(())
    }

    /// Re-read the title and ask the decoration renderer to redraw.
    pub fn refresh_title(
        &mut self,
        ctx: &Context<'_>,
        config: &TilingConfig,
    ) -> Result<(), ServerError> {
        let Some(title) = ctx.properties.window_title(self.window) else {
            return Ok(());
        };
        self.title = Some(title);
        if let Some(container) = self.container {
            ctx.decorations.redraw(&Decoration {
                container,
                title: self.title.as_deref(),
                insets: config.decorations(true),
                geometry: self.geometry,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeServer, FIRST_CONTAINER};

    const CLIENT: WindowId = WindowId(0x400001);
    const CONTAINER: WindowId = WindowId(FIRST_CONTAINER);

    fn normal_frame(server: &FakeServer) -> Frame {
        let ctx = Context::new(server);
        Frame::create(&ctx, FrameId(1), CLIENT, WindowKind::Normal).unwrap()
    }

    #[test]
    fn create_normal_reparents_into_container() {
        let server = FakeServer::new();
        server.set_title(CLIENT, "xterm");
        let frame = normal_frame(&server);
        assert_eq!(frame.container, Some(CONTAINER));
        assert_eq!(frame.title.as_deref(), Some("xterm"));
        assert!(!frame.is_mapped());
        assert_eq!(
            server.calls(),
            vec![
                Call::CreateContainer(CONTAINER),
                Call::Reparent {
                    window: CLIENT,
                    parent: CONTAINER
                },
                Call::SaveSet(CLIENT),
            ]
        );
    }

    #[test]
    fn create_dock_has_no_container() {
        let server = FakeServer::new();
        let ctx = Context::new(&server);
        let frame = Frame::create(&ctx, FrameId(1), CLIENT, WindowKind::Dock).unwrap();
        assert_eq!(frame.container, None);
        assert!(server.calls().is_empty());
    }

    #[test]
    fn create_fails_when_container_cannot_be_created() {
        let server = FakeServer::new();
        server.fail("CreateWindow", None);
        let ctx = Context::new(&server);
        let err = Frame::create(&ctx, FrameId(1), CLIENT, WindowKind::Normal).unwrap_err();
        assert!(matches!(err, TilingError::Server(_)));
    }

    #[test]
    fn create_fails_when_reparent_fails_and_cleans_up() {
        let server = FakeServer::new();
        server.fail("ReparentWindow", Some(CLIENT));
        let ctx = Context::new(&server);
        let result = Frame::create(&ctx, FrameId(1), CLIENT, WindowKind::Normal);
        assert!(result.is_err());
        assert!(server.calls().contains(&Call::Destroy(CONTAINER)));
    }

    #[test]
    fn save_set_failure_is_not_fatal() {
        let server = FakeServer::new();
        server.fail("ChangeSaveSet", Some(CLIENT));
        let frame = normal_frame(&server);
        assert_eq!(frame.container, Some(CONTAINER));
    }

    #[test]
    fn map_maps_container_then_client() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        server.clear_calls();
        frame.map(&server).unwrap();
        assert!(frame.is_mapped());
        assert_eq!(server.calls(), vec![Call::Map(CONTAINER), Call::Map(CLIENT)]);
    }

    #[test]
    fn failed_map_leaves_frame_unmapped() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        server.fail("MapWindow", Some(CLIENT));
        assert!(frame.map(&server).is_err());
        assert!(!frame.is_mapped());
    }

    #[test]
    fn unmap_only_requests_client_unmap() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        frame.map(&server).unwrap();
        server.clear_calls();
        frame.unmap(&server).unwrap();
        assert!(frame.is_mapped());
        assert_eq!(server.calls(), vec![Call::Unmap(CLIENT)]);
    }

    #[test]
    fn server_unmap_hides_container_once() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        frame.map(&server).unwrap();
        server.clear_calls();

        frame.on_server_unmap(&server).unwrap();
        assert!(!frame.is_mapped());
        assert_eq!(server.calls(), vec![Call::Unmap(CONTAINER)]);

        frame.on_server_unmap(&server).unwrap();
        assert_eq!(server.calls().len(), 1);
    }

    #[test]
    fn remap_after_unmap_reuses_container() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        frame.map(&server).unwrap();
        frame.on_server_unmap(&server).unwrap();
        server.clear_calls();
        frame.map(&server).unwrap();
        assert!(frame.is_mapped());
        assert_eq!(server.calls(), vec![Call::Map(CONTAINER), Call::Map(CLIENT)]);
    }

    #[test]
    fn server_destroy_destroys_container() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        server.clear_calls();
        frame.on_server_destroy(&server).unwrap();
        assert_eq!(frame.container, None);
        assert_eq!(server.calls(), vec![Call::Destroy(CONTAINER)]);
    }

    #[test]
    fn refresh_title_redraws_decoration() {
        let server = FakeServer::new();
        let mut frame = normal_frame(&server);
        server.set_title(CLIENT, "vim");
        let ctx = Context::new(&server);
        let config = TilingConfig {
            border_width: 1,
            titlebar_height: 20,
            ..TilingConfig::default()
        };
        frame.refresh_title(&ctx, &config).unwrap();
        assert_eq!(frame.title.as_deref(), Some("vim"));
        let redraws = server.redraws.borrow();
        assert_eq!(redraws.len(), 1);
        assert_eq!(redraws[0].container, CONTAINER);
        assert_eq!(redraws[0].title.as_deref(), Some("vim"));
        assert_eq!(redraws[0].insets.top, 22);
    }

    #[test]
    fn refresh_title_keeps_old_title_when_unreadable() {
        let server = FakeServer::new();
        server.set_title(CLIENT, "first");
        let mut frame = normal_frame(&server);
        let other = FakeServer::new();
        let ctx = Context::new(&other);
        frame.refresh_title(&ctx, &TilingConfig::default()).unwrap();
        assert_eq!(frame.title.as_deref(), Some("first"));
        assert!(other.redraws.borrow().is_empty());
    }

    #[test]
    fn window_kind_serialization() {
        let json = serde_json::to_string(&WindowKind::Dock).unwrap();
        assert_eq!(json, "\"dock\"");
        let kind: WindowKind = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(kind, WindowKind::Unknown);
    }
}
