//! Top-level error type for the dashboard.

use crate::feed::FeedError;

/// Everything that can end the program with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An environment variable held an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The terminal could not be set up or a thread could not be spawned.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The log file could not be opened or the subscriber installed.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// A fetch cycle failed.
    #[error(transparent)]
    Feed(#[from] FeedError),
}
