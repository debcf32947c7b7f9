//! Upstream feed: GeoJSON model and the blocking client that fetches it.

mod client;
mod model;

pub use client::{decode_snapshot, FeedError, FeedSource, HttpFeedClient};
pub use model::{Feature, FeedSnapshot, Geometry, Metadata, Properties};
