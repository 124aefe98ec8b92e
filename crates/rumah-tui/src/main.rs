//! `rumah-tui` — Real-time terminal dashboard for a smart-home panel.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `rumah-core`'s [`SnapshotStream`](rumah_core::SnapshotStream). Two
//! screens, navigable via number keys: Dashboard (rooms, devices, energy)
//! and Activity (notifications + log).
//!
//! Logs are written to a file (default `/tmp/rumah-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task continuously
//! streams snapshot updates and fresh-notification alerts from the panel
//! into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rumah_core::{Panel, PanelConfig};

use crate::app::App;

/// Terminal dashboard for monitoring and controlling a smart-home panel.
#[derive(Parser, Debug)]
#[command(name = "rumah-tui", version, about)]
struct Cli {
    /// Panel backend URL (e.g., http://192.168.1.10:5000)
    #[arg(short = 'u', long, env = "RUMAH_URL")]
    url: Option<String>,

    /// Poll interval in seconds (overrides config file)
    #[arg(short = 'p', long, env = "RUMAH_POLL_INTERVAL_SECS")]
    poll_interval: Option<u64>,

    /// Log file path (defaults to /tmp/rumah-tui.log)
    #[arg(long, default_value = "/tmp/rumah-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rumah_tui={log_level},rumah_core={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("rumah-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Build the panel config. Priority: CLI flags > config file > defaults.
fn resolve_panel_config(cli: &Cli) -> Result<PanelConfig> {
    let file_cfg = rumah_config::load_config_or_default();
    let mut config = file_cfg
        .to_panel_config()
        .map_err(|e| eyre!("invalid configuration: {e}"))?;

    if let Some(ref url) = cli.url {
        config.url = url.parse().map_err(|e| eyre!("invalid --url: {e}"))?;
    }
    if let Some(secs) = cli.poll_interval {
        if secs == 0 {
            return Err(eyre!("--poll-interval must be at least 1 second"));
        }
        config.poll_interval = Duration::from_secs(secs);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = resolve_panel_config(&cli)?;
    info!(
        url = %config.url,
        poll_interval_secs = config.poll_interval.as_secs(),
        "starting rumah-tui"
    );

    let panel = Panel::new(config).map_err(|e| eyre!("cannot build panel client: {e}"))?;
    let mut app = App::new(panel);
    app.run().await?;

    Ok(())
}
