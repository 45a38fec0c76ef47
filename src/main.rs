// photofall - an endless-scroll photo gallery for the terminal
//
// Browses the picsum.photos catalog page by page: whenever the last
// loaded image scrolls into view, the next page is fetched in the
// background and appended to the list.
//
// Architecture:
// - Gallery core: page loader, fetch phase state machine, scroll sentinel
// - Sources: the picsum.photos listing API, or a built-in demo catalog
// - TUI (ratatui): scrolling image list, activity strip, log panel
// - An mpsc channel connects background fetch tasks to the UI loop

mod cli;
mod config;
mod gallery;
mod logging;
mod source;
mod tui;
mod util;

use anyhow::Result;
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use source::{DemoSource, ListingSource, PicsumSource};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Logs render inside the TUI, so tracing output goes to a ring buffer
    // instead of stdout, which would garble the display. File logging is
    // optional on top.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("photofall={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let log_buffer = LogBuffer::new();

    // The guard must be kept alive for the duration of the program to
    // ensure buffered log writes flush on exit
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let file_appender =
                        tracing_appender::rolling::daily(&config.logging.file_dir, "photofall.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();

                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    // Fall back to buffer-only logging
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    // Pick the listing source: the real picsum.photos API, or the
    // built-in demo catalog for offline runs
    let source: Arc<dyn ListingSource> = if config.demo_mode {
        tracing::info!("Running in DEMO MODE - serving a canned catalog");
        Arc::new(DemoSource::new())
    } else {
        Arc::new(PicsumSource::new(&config.api_url)?)
    };

    tui::run_tui(config, source, log_buffer).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
