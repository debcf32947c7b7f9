//! Actor Model: Message-passing concurrency for the dashboard.
//!
//! Every thread talks to the main loop over crossbeam channels:
//! - **Input Actor**: polls terminal events, forwards them to the main loop
//! - **Render Actor**: receives frames, diffs and flushes them
//! - **Feed Worker**: fetches on a schedule, sends table updates
//! - **Main Loop**: sole owner of the table; applies updates and input
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │  Main Loop   │
//!                                      │              │
//! ┌──────────────┐    RenderCommand    │              │
//! │Render Thread │ ◀─────────────────  │              │
//! └──────────────┘                     └──────────────┘
//!                                            ▲
//!                                            │ SurfaceUpdate
//!                                      ┌──────────────┐
//!                                      │ Feed Worker  │──▶ USGS feed
//!                                      └──────────────┘
//! ```

mod input;
mod messages;
mod renderer;
mod surface;
mod ticker;
mod worker;

pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand, SurfaceUpdate};
pub use renderer::{RenderStats, RendererActor};
pub use surface::{Surface, SurfaceConfig};
pub use ticker::{Tick, TickerActor};
pub use worker::{FeedSchedule, FeedWorker};
