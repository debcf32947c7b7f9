//! Status Bar Widget: Three-section status line under the table.
//!
//! Left holds the feed title, center the event count, right the time of
//! the last completed fetch.

use super::traits::Widget;
use crate::buffer::{Buffer, Cell, Rgb, Style};
use crate::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Configuration for the status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBarConfig {
    /// Background color.
    pub bg: Rgb,
    /// Left section text color.
    pub left_fg: Rgb,
    /// Center section text color.
    pub center_fg: Rgb,
    /// Right section text color.
    pub right_fg: Rgb,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            bg: Rgb::new(40, 40, 40),
            left_fg: Rgb::WHITE,
            center_fg: Rgb::new(150, 150, 150),
            right_fg: Rgb::new(100, 200, 100),
        }
    }
}

/// A three-section status bar (left, center, right).
#[derive(Debug)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    bounds: Rect,
    config: StatusBarConfig,
}

impl StatusBar {
    /// Create a new status bar with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            bounds,
            config: StatusBarConfig::default(),
        }
    }

    /// Set the left section content.
    pub fn set_left(&mut self, text: impl Into<String>) {
        self.left = text.into();
    }

    /// Set the center section content.
    pub fn set_center(&mut self, text: impl Into<String>) {
        self.center = text.into();
    }

    /// Set the right section content.
    pub fn set_right(&mut self, text: impl Into<String>) {
        self.right = text.into();
    }

    /// Get the left section content.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Get the center section content.
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Get the right section content.
    pub fn right(&self) -> &str {
        &self.right
    }
}

impl Widget for StatusBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn render(&self, buffer: &mut Buffer) {
        let Rect { x, y, width, height } = self.bounds;
        if height == 0 || width == 0 {
            return;
        }
        buffer.fill_rect(x, y, width, 1, Cell::EMPTY.with_bg(self.config.bg));

        let third = width / 3;
        let style = |fg| Style::fg(fg).on(self.config.bg);
        let span = |text: &str| u16::try_from(text.width()).unwrap_or(u16::MAX).min(third);

        buffer.draw_text(x + 1, y, third.saturating_sub(1), &self.left, style(self.config.left_fg));

        let center_len = span(&self.center);
        let center_x = x + (width - center_len) / 2;
        buffer.draw_text(center_x, y, center_len, &self.center, style(self.config.center_fg));

        let right_len = span(&self.right);
        let right_x = (x + width).saturating_sub(right_len + 1);
        buffer.draw_text(right_x, y, right_len, &self.right, style(self.config.right_fg));
    }
}
