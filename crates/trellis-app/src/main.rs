mod cli;
mod wm;
mod x11;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use trellis_common::TrellisError;
use trellis_config::TrellisConfig;
use trellis_tiling::TilingConfig;

use crate::wm::WindowManager;
use crate::x11::X11Backend;

fn run(args: &cli::Args, config: &TrellisConfig) -> Result<(), TrellisError> {
    let backend = X11Backend::connect(args.display.as_deref(), config.decoration.border_color())?;
    let mut wm = WindowManager::new(backend, TilingConfig::from(config));
    wm.start()?;
    wm.run()
}

fn main() {
    let args = cli::parse();

    // Config comes first so its log level can seed the filter.
    let (config, config_error) = match trellis_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (TrellisConfig::default(), Some(e)),
    };

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.as_directive().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("Trellis v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(&args, &config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
