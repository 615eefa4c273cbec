use std::path::PathBuf;

use crate::types::{FrameId, WindowId, WorkspaceId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A request rejected by (or never delivered to) the display server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{request} failed for window {window}: {reason}")]
    Request {
        request: &'static str,
        window: WindowId,
        reason: String,
    },

    #[error("display connection error: {0}")]
    Connection(String),
}

impl ServerError {
    pub fn request(request: &'static str, window: WindowId, reason: impl ToString) -> Self {
        ServerError::Request {
            request,
            window,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TilingError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("frame {0} not found")]
    FrameNotFound(FrameId),

    #[error("no workspace with id {0}")]
    WorkspaceNotFound(WorkspaceId),

    #[error("multiple outputs not supported")]
    MultipleOutputs,

    #[error("frame {frame} not contained within workspace {workspace}")]
    NotInWorkspace {
        frame: FrameId,
        workspace: WorkspaceId,
    },

    #[error("no output available")]
    NoOutput,
}

#[derive(Debug, thiserror::Error)]
pub enum TrellisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Tiling(#[from] TilingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("layout.inner_gap".into());
        assert_eq!(err.to_string(), "config validation error: layout.inner_gap");
    }

    #[test]
    fn server_error_display() {
        let err = ServerError::request("ConfigureWindow", WindowId(0x400001), "BadWindow");
        assert_eq!(
            err.to_string(),
            "ConfigureWindow failed for window 0x400001: BadWindow"
        );

        let err = ServerError::Connection("broken pipe".into());
        assert_eq!(err.to_string(), "display connection error: broken pipe");
    }

    #[test]
    fn tiling_error_display() {
        assert_eq!(
            TilingError::MultipleOutputs.to_string(),
            "multiple outputs not supported"
        );
        assert_eq!(
            TilingError::WorkspaceNotFound(WorkspaceId(12)).to_string(),
            "no workspace with id 12"
        );
        let err = TilingError::NotInWorkspace {
            frame: FrameId(4),
            workspace: WorkspaceId(1),
        };
        assert_eq!(
            err.to_string(),
            "frame frame-4 not contained within workspace 1"
        );
    }

    #[test]
    fn tiling_error_from_server() {
        let server_err = ServerError::request("MapWindow", WindowId(1), "BadAccess");
        let err: TilingError = server_err.into();
        assert!(matches!(err, TilingError::Server(_)));
        assert!(err.to_string().contains("BadAccess"));
    }

    #[test]
    fn trellis_error_from_variants() {
        let err: TrellisError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, TrellisError::Config(_)));
        assert!(err.to_string().contains("bad toml"));

        let err: TrellisError = TilingError::NoOutput.into();
        assert!(matches!(err, TrellisError::Tiling(_)));

        let err: TrellisError = ServerError::Connection("refused".into()).into();
        assert!(matches!(err, TrellisError::Server(_)));
        assert_eq!(err.to_string(), "display connection error: refused");
    }
}
