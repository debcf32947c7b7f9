//! Feed client: one blocking GET of the summary feed per call.
//!
//! Every failure here is fatal to the caller. There is no retry and no
//! backoff; the next scheduled cycle never runs because the process exits.

use super::model::FeedSnapshot;
use std::time::Duration;

/// Errors raised while fetching or decoding a feed snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The request could not be sent or the body could not be read.
    #[error("feed transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("feed returned HTTP {0}")]
    Status(u16),

    /// The body was not a valid feature collection.
    #[error("feed decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can produce a feed snapshot on demand.
///
/// The background worker only sees this trait, so tests can drive it with
/// canned snapshots instead of the network.
pub trait FeedSource {
    /// Fetch and decode one snapshot, blocking the calling thread.
    fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError>;
}

/// Decode a raw response body.
pub fn decode_snapshot(body: &[u8]) -> Result<FeedSnapshot, FeedError> {
    Ok(serde_json::from_slice(body)?)
}

/// HTTP implementation of [`FeedSource`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpFeedClient {
    /// Build a client for `url`. A `timeout` of `None` waits indefinitely.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FeedError> {
        // The blocking client defaults to a 30s timeout; `None` must really mean none
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl FeedSource for HttpFeedClient {
    fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        tracing::debug!(url = %self.url, bytes = body.len(), "feed body received");
        decode_snapshot(&body)
    }
}
