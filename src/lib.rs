//! # Quakewatch
//!
//! A live terminal table of recent earthquakes, polled from the USGS
//! GeoJSON summary feed.
//!
//! ## Core Concepts
//!
//! - **Snapshot reconciliation**: each fetch is merged into an in-memory
//!   store keyed by event id; the latest fetch always wins
//! - **Ordered table**: rows are kept newest-first with exactly one row per
//!   event, updated in place when an event is revised
//! - **Actor model**: input, rendering and the fetch schedule each run on
//!   their own thread; only the main loop touches the table
//! - **Double-buffered rendering**: every frame is diffed against the last
//!   and flushed in a single write
//!
//! ## Example
//!
//! ```rust
//! use quakewatch::feed::decode_snapshot;
//! use quakewatch::quake::{EventStore, Reconciler};
//! use quakewatch::sync::upsert_row;
//! use quakewatch::{QuakeTable, Rect};
//!
//! let body = br#"{"type":"FeatureCollection","features":[
//!     {"type":"Feature","id":"ak1","properties":{"mag":4.2,"time":1700000000000}}
//! ]}"#;
//! let snapshot = decode_snapshot(body).unwrap();
//!
//! let mut store = EventStore::new();
//! let mut table = QuakeTable::new(Rect::from_size(140, 40));
//! for row in Reconciler::new(chrono::Utc).reconcile(snapshot, &mut store) {
//!     upsert_row(&mut table, &row);
//! }
//! assert_eq!(table.cell_text(1, 1), Some("4.20"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod config;
pub mod error;
pub mod feed;
pub mod layout;
pub mod quake;
pub mod sync;
pub mod widget;

#[cfg(test)]
mod test_utils;

// Re-exports for convenience
pub use actor::{FeedSchedule, FeedWorker, InputEvent, KeyCode, KeyModifiers, Surface, SurfaceUpdate};
pub use app::{App, Dashboard};
pub use buffer::{Buffer, Cell, CellFlags, Modifiers, Rgb, Style};
pub use config::AppConfig;
pub use error::AppError;
pub use feed::{FeedError, FeedSnapshot, FeedSource, HttpFeedClient};
pub use layout::Rect;
pub use quake::{DisplayRow, EventRecord, EventStore, Reconciler, Severity};
pub use sync::{upsert_row, Placement};
pub use widget::{QuakeTable, StatusBar, TableRow, Widget};
