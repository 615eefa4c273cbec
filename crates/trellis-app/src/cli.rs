use std::path::PathBuf;

use clap::Parser;

/// Trellis, a column-based tiling window manager for X11.
#[derive(Parser, Debug)]
#[command(name = "trellis", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `debug`, `trellis_tiling=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// X display to manage instead of `$DISPLAY`.
    #[arg(long)]
    pub display: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_uses_defaults() {
        let args = Args::try_parse_from(["trellis"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.log_level.is_none());
        assert!(args.display.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "trellis",
            "--config",
            "/tmp/trellis.toml",
            "--log-level",
            "debug",
            "--display",
            ":1",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/trellis.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.display.as_deref(), Some(":1"));
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Args::try_parse_from(["trellis", "--bogus"]).is_err());
    }
}
