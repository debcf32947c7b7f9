//! Diffing Engine: Generate minimal ANSI sequences from buffer changes.
//!
//! 1. Compare the currently displayed buffer with the next one
//! 2. Emit sequences only for cells that changed
//! 3. Skip cursor moves for adjacent writes
//! 4. Track color and modifier state to avoid redundant SGR sequences
//!
//! All output is accumulated in a single buffer and flushed with one syscall.

use super::{Buffer, Cell, Modifiers, Rgb};
use std::io::Write;

/// State tracker for the diffing algorithm.
///
/// Mirrors what the terminal currently has selected (cursor position,
/// colors, modifiers) so repeated values are not re-emitted.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (e.g. after a full screen clear or a failed write).
    pub const fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of color change sequences emitted.
    pub color_changes: usize,
}

/// Render the difference between two equally sized buffers.
///
/// `state` must describe the terminal as left by the previous render.
pub fn render_diff(
    current: &Buffer,
    next: &Buffer,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();

    for (y, (old_row, new_row)) in (0u16..).zip(current.rows().zip(next.rows())) {
        for (x, (old, new)) in (0u16..).zip(old_row.iter().zip(new_row)) {
            if old == new || new.is_wide_continuation() {
                continue;
            }
            result.cells_changed += 1;

            if state.cursor != Some((x, y)) {
                emit_cursor_move(output, x, y);
                result.cursor_moves += 1;
            }
            result.color_changes += emit_style(output, new, state);
            emit_symbol(output, new);

            state.cursor = Some((x + u16::from(new.display_width().max(1)), y));
        }
    }

    result
}

/// Generate a full redraw sequence (no diffing).
///
/// Used for the first frame, after a resize, or whenever the terminal
/// state is unknown.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>, state: &mut DiffState) {
    state.reset();

    // Hide cursor, reset attributes, clear, home
    output.extend_from_slice(b"\x1b[?25l\x1b[0m\x1b[2J\x1b[H");

    for (y, row) in (0u16..).zip(buffer.rows()) {
        if y > 0 {
            emit_cursor_move(output, 0, y);
        }
        for cell in row.iter().filter(|cell| !cell.is_wide_continuation()) {
            emit_style(output, cell, state);
            emit_symbol(output, cell);
        }
    }

    // Drawing into the last column leaves the cursor position terminal-defined
    state.cursor = None;
}

/// Bring the terminal's pen in line with `cell`. Returns color sequences emitted.
fn emit_style(output: &mut Vec<u8>, cell: &Cell, state: &mut DiffState) -> usize {
    let mut color_changes = 0;
    let wanted = cell.modifiers();
    let active = state.modifiers.unwrap_or(Modifiers::empty());

    // SGR has no portable "turn this one off", so any removal is a full reset
    if !active.difference(wanted).is_empty() || state.modifiers.is_none() {
        output.extend_from_slice(b"\x1b[0m");
        state.fg = None;
        state.bg = None;
        state.modifiers = Some(Modifiers::empty());
    }

    if state.fg != Some(cell.fg()) {
        let c = cell.fg();
        let _ = write!(output, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
        state.fg = Some(c);
        color_changes += 1;
    }
    if state.bg != Some(cell.bg()) {
        let c = cell.bg();
        let _ = write!(output, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
        state.bg = Some(c);
        color_changes += 1;
    }

    let active = state.modifiers.unwrap_or(Modifiers::empty());
    emit_modifier_set(output, wanted.difference(active));
    state.modifiers = Some(wanted);

    color_changes
}

/// Emit a cursor move sequence (ANSI positions are 1-indexed).
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

/// Emit SGR sequences for a set of modifiers.
fn emit_modifier_set(output: &mut Vec<u8>, modifiers: Modifiers) {
    for (flag, sgr) in [
        (Modifiers::BOLD, b"\x1b[1m"),
        (Modifiers::DIM, b"\x1b[2m"),
        (Modifiers::ITALIC, b"\x1b[3m"),
        (Modifiers::UNDERLINE, b"\x1b[4m"),
        (Modifiers::REVERSED, b"\x1b[7m"),
    ] {
        if modifiers.contains(flag) {
            output.extend_from_slice(sgr);
        }
    }
}

#[inline]
fn emit_symbol(output: &mut Vec<u8>, cell: &Cell) {
    let mut utf8 = [0u8; 4];
    output.extend_from_slice(cell.symbol().encode_utf8(&mut utf8).as_bytes());
}
