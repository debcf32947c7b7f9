//! Message types for actor communication.
//!
//! These enums define the protocol between the input, render and feed
//! threads and the main loop.

use crate::buffer::Buffer;
use crate::feed::FeedError;
use crate::quake::DisplayRow;
use chrono::{DateTime, Local};

/// Key codes for keyboard input.
///
/// A subset of crossterm's `KeyCode`: only what the dashboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// `q`, `Esc` or `Ctrl-C`.
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Self::Key {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            } | Self::Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers { control: true, .. },
            }
        )
    }
}

/// Commands sent to the render thread.
#[derive(Debug)]
pub enum RenderCommand {
    /// Repaint every cell of this frame.
    FullRedraw(Box<Buffer>),

    /// Emit only the cells that differ from the last frame.
    Update(Box<Buffer>),

    /// Shutdown the render thread.
    Shutdown,
}

/// Messages from the feed worker to the main loop.
///
/// The main loop is the only consumer, so every table mutation is applied
/// on one thread in send order.
#[derive(Debug)]
pub enum SurfaceUpdate {
    /// Insert or update one row.
    Upsert(DisplayRow),

    /// Periodic repaint.
    Redraw,

    /// A fetch cycle finished and all its upserts were sent.
    CycleComplete {
        /// Feed title from the snapshot metadata.
        title: Option<String>,
        /// Features in the snapshot.
        fetched: usize,
        /// When the cycle finished.
        at: DateTime<Local>,
    },

    /// The feed could not be fetched or decoded; the app must exit.
    FeedFailed(FeedError),
}
