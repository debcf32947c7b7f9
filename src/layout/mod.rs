//! Layout module: screen geometry.
//!
//! The screen is split once per frame into the table area and the status
//! line; there is no layout tree.

mod rect;

pub use rect::Rect;
