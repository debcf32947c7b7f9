//! Widget trait shared by the table and the status bar.

use crate::actor::InputEvent;
use crate::buffer::Buffer;
use crate::layout::Rect;

/// A UI component that can be rendered to a buffer and handle input.
pub trait Widget {
    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect;

    /// Set the bounds of this widget.
    ///
    /// Called when the layout changes (e.g., terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Render this widget to the given buffer.
    ///
    /// The widget should only write to cells within its bounds.
    fn render(&self, buffer: &mut Buffer);

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed by this widget.
    fn handle_input(&mut self, _event: &InputEvent) -> bool {
        false
    }
}
