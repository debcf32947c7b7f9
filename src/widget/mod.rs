//! Widgets: the event table and the status line.
//!
//! Both render into the surface's [`Buffer`](crate::buffer::Buffer) from
//! their own state, so a frame can be rebuilt from scratch at any time.

mod status_bar;
mod table;
mod traits;

pub use status_bar::{StatusBar, StatusBarConfig};
pub use table::{QuakeTable, TableConfig, TableRow};
pub use traits::Widget;
