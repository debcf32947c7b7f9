//! Runtime configuration.
//!
//! Everything comes from environment variables and every variable is
//! optional; with none set the dashboard polls the USGS past-hour feed
//! once a minute and repaints once a second.

use crate::actor::FeedSchedule;
use crate::error::AppError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// USGS summary feed of every earthquake in the past hour.
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_hour.geojson";

const DEFAULT_FETCH_INTERVAL_SECS: u64 = 60;
const DEFAULT_REDRAW_INTERVAL_MS: u64 = 1000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Complete configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Feed endpoint.
    pub feed_url: String,
    /// Time between fetch cycles.
    pub fetch_interval: Duration,
    /// Time between repaints.
    pub redraw_interval: Duration,
    /// Per-request timeout; `None` waits indefinitely.
    pub http_timeout: Option<Duration>,
    /// Where log output goes.
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_owned(),
            fetch_interval: Duration::from_secs(DEFAULT_FETCH_INTERVAL_SECS),
            redraw_interval: Duration::from_millis(DEFAULT_REDRAW_INTERVAL_MS),
            http_timeout: Some(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `QUAKEWATCH_FEED_URL` -- feed endpoint (default: USGS all-hour summary)
    /// - `QUAKEWATCH_FETCH_INTERVAL_SECS` -- seconds between fetches (default 60)
    /// - `QUAKEWATCH_REDRAW_INTERVAL_MS` -- milliseconds between repaints (default 1000)
    /// - `QUAKEWATCH_HTTP_TIMEOUT_SECS` -- request timeout, `0` for none (default 30)
    /// - `QUAKEWATCH_LOG_FILE` -- log path (default `quakewatch.log` in the temp dir)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a number does not parse or an
    /// interval is zero.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let feed_url = lookup("QUAKEWATCH_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_owned());

        let fetch_secs =
            positive_or(&lookup, "QUAKEWATCH_FETCH_INTERVAL_SECS", DEFAULT_FETCH_INTERVAL_SECS)?;
        let redraw_ms =
            positive_or(&lookup, "QUAKEWATCH_REDRAW_INTERVAL_MS", DEFAULT_REDRAW_INTERVAL_MS)?;
        let timeout_secs: u64 =
            parse_or(&lookup, "QUAKEWATCH_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        let log_file = lookup("QUAKEWATCH_LOG_FILE").map_or_else(default_log_file, PathBuf::from);

        Ok(Self {
            feed_url,
            fetch_interval: Duration::from_secs(fetch_secs),
            redraw_interval: Duration::from_millis(redraw_ms),
            http_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            log_file,
        })
    }

    /// The worker's fetch and repaint schedule.
    pub const fn schedule(&self) -> FeedSchedule {
        FeedSchedule {
            fetch_interval: self.fetch_interval,
            redraw_interval: self.redraw_interval,
        }
    }
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("quakewatch.log")
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {name}: {e}")))
    })
}

fn positive_or<F>(lookup: &F, name: &str, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or(lookup, name, default)? {
        0 => Err(AppError::Config(format!("{name} must be greater than zero"))),
        value => Ok(value),
    }
}
