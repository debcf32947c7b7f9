//! quakewatch: live table of recent earthquakes from the USGS feed.
//!
//! Configuration is read from `QUAKEWATCH_*` environment variables; log
//! output goes to a file because the terminal belongs to the table.

use quakewatch::actor::{FeedWorker, Surface};
use quakewatch::app::App;
use quakewatch::config::AppConfig;
use quakewatch::error::AppError;
use quakewatch::feed::HttpFeedClient;
use quakewatch::quake::{local_zone, Reconciler};

use chrono::Local;
use crossbeam_channel::bounded;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Terminal is restored by now; the surface was dropped inside run()
            tracing::error!(error = %e, "quakewatch exiting");
            eprintln!("quakewatch: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_file)?;

    info!(
        feed_url = %config.feed_url,
        fetch_interval_secs = config.fetch_interval.as_secs(),
        redraw_interval_ms = config.redraw_interval.as_millis(),
        http_timeout_secs = config.http_timeout.map(|t| t.as_secs()),
        "quakewatch starting"
    );

    let client = HttpFeedClient::new(config.feed_url.clone(), config.http_timeout)?;
    let surface = Surface::new()?;

    let (updates_tx, updates_rx) = bounded(256);
    let worker = match local_zone() {
        Some(zone) => {
            info!(zone = %zone.name(), "event times use named zone");
            FeedWorker::spawn(client, Reconciler::new(zone), config.schedule(), updates_tx)?
        }
        None => {
            info!("event times use numeric local offset");
            FeedWorker::spawn(client, Reconciler::new(Local), config.schedule(), updates_tx)?
        }
    };

    let result = App::new(surface, updates_rx).run();
    worker.shutdown();
    result
}

/// Structured logs to `path`, filtered by `RUST_LOG` (default `info`).
fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logging(format!("cannot open {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
