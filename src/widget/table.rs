//! Quake Table Widget: the live, newest-first event table.
//!
//! Row 0 is the fixed header. Rows `1..row_count()` hold one event each.
//! The widget only stores and draws rows; placing them is the job of
//! [`crate::sync::upsert_row`].

use super::traits::Widget;
use crate::actor::{InputEvent, KeyCode};
use crate::buffer::{Buffer, Cell, Modifiers, Rgb, Style};
use crate::layout::Rect;
use crate::quake::{DisplayRow, Severity, COLUMN_COUNT, COLUMN_TITLES};

/// Column widths in display order, padding included. Location (index 2)
/// takes whatever is left over, never less than its minimum.
const FIXED_WIDTHS: [u16; COLUMN_COUNT] = [24, 11, 0, 35, 30];
const LOCATION_COLUMN: usize = 2;
const MIN_LOCATION_WIDTH: u16 = 16;

/// Rows used by the header and the rule beneath it.
const HEADER_ROWS: u16 = 2;

/// Colors for the table widget.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Header text.
    pub header_fg: Rgb,
    /// Time column text.
    pub time_fg: Rgb,
    /// Column separators and header rule.
    pub border_fg: Rgb,
    /// Magnitude below 4.0.
    pub default_fg: Rgb,
    /// Magnitude 4.0 to 5.99.
    pub elevated_fg: Rgb,
    /// Magnitude 6.0 to 6.99.
    pub high_fg: Rgb,
    /// Magnitude 7.0 and above.
    pub critical_fg: Rgb,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_fg: Rgb::from_u32(0xFFFF00),
            time_fg: Rgb::from_u32(0x008B8B),
            border_fg: Rgb::from_u32(0x585858),
            default_fg: Rgb::from_u32(0x5FD75F),
            elevated_fg: Rgb::from_u32(0xFFD700),
            high_fg: Rgb::from_u32(0xFF8700),
            critical_fg: Rgb::from_u32(0xFF005F),
        }
    }
}

impl TableConfig {
    /// Text color for a severity band.
    pub const fn severity_color(&self, severity: Severity) -> Rgb {
        match severity {
            Severity::Default => self.default_fg,
            Severity::Elevated => self.elevated_fg,
            Severity::High => self.high_fg,
            Severity::Critical => self.critical_fg,
        }
    }
}

/// One data row as stored by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Event identifier.
    pub id: String,
    /// Ordering key, epoch milliseconds.
    pub time_ms: Option<i64>,
    /// Cell text in [`COLUMN_TITLES`] order.
    pub cells: [String; COLUMN_COUNT],
    /// Color band for the selectable cells.
    pub severity: Severity,
}

impl From<&DisplayRow> for TableRow {
    fn from(row: &DisplayRow) -> Self {
        Self {
            id: row.id.clone(),
            time_ms: row.time_ms,
            cells: [
                row.time.clone(),
                row.magnitude.clone(),
                row.place.clone(),
                row.coordinates.clone(),
                row.ids.clone(),
            ],
            severity: row.severity,
        }
    }
}

/// Ordered event table with a fixed header and a row selection.
#[derive(Debug)]
pub struct QuakeTable {
    /// Data rows; table row `n` is `rows[n - 1]`.
    rows: Vec<TableRow>,
    bounds: Rect,
    config: TableConfig,
    /// Selected table row (never 0).
    selected: Option<usize>,
    /// Index into `rows` of the first visible data row.
    offset: usize,
}

impl QuakeTable {
    /// Create an empty table with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, TableConfig::default())
    }

    /// Create an empty table with custom colors.
    pub const fn with_config(bounds: Rect, config: TableConfig) -> Self {
        Self {
            rows: Vec::new(),
            bounds,
            config,
            selected: None,
            offset: 0,
        }
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of the cell at (`row`, `column`); row 0 is the header.
    pub fn cell_text(&self, row: usize, column: usize) -> Option<&str> {
        if row == 0 {
            return COLUMN_TITLES.get(column).copied();
        }
        self.data_row(row)?.cells.get(column).map(String::as_str)
    }

    /// Event id of a data row.
    pub fn row_id(&self, row: usize) -> Option<&str> {
        self.data_row(row).map(|r| r.id.as_str())
    }

    /// Ordering key of a data row; `None` for the header or an unknown time.
    pub fn row_time(&self, row: usize) -> Option<i64> {
        self.data_row(row).and_then(|r| r.time_ms)
    }

    /// The data row at table row `row`.
    pub fn data_row(&self, row: usize) -> Option<&TableRow> {
        row.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    /// Table row holding `id`, if any.
    pub fn find_row(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id).map(|i| i + 1)
    }

    /// Iterate data rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter()
    }

    /// Insert `row` at table row `position`, shifting later rows down.
    ///
    /// `position` is clamped to `1..=row_count()`. The selection stays on
    /// the event it was on.
    pub fn insert_row(&mut self, position: usize, row: TableRow) -> usize {
        let position = position.clamp(1, self.row_count());
        self.rows.insert(position - 1, row);
        if let Some(selected) = self.selected.as_mut() {
            if *selected >= position {
                *selected += 1;
            }
        }
        self.scroll_to_selection();
        position
    }

    /// Overwrite the data row at `position`. Returns `false` for the header
    /// or a position past the end.
    pub fn set_row(&mut self, position: usize, row: TableRow) -> bool {
        match position.checked_sub(1).and_then(|i| self.rows.get_mut(i)) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Remove and return the data row at `position`.
    pub fn remove_row(&mut self, position: usize) -> Option<TableRow> {
        let index = position.checked_sub(1).filter(|&i| i < self.rows.len())?;
        let row = self.rows.remove(index);
        self.selected = match self.selected {
            Some(s) if s > position => Some(s - 1),
            Some(s) if s == position => (!self.rows.is_empty()).then(|| s.min(self.rows.len())),
            other => other,
        };
        self.offset = self.offset.min(self.rows.len().saturating_sub(1));
        Some(row)
    }

    /// The selected table row, if any.
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a table row; clamped into the data rows, ignored when empty.
    pub fn select(&mut self, row: usize) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(row.clamp(1, self.rows.len()));
        self.scroll_to_selection();
    }

    /// Move the selection by `delta` rows (negative is up).
    pub fn move_selection(&mut self, delta: isize) {
        let current = self.selected.unwrap_or(0);
        self.select(current.saturating_add_signed(delta));
    }

    /// Index into `rows` of the first visible data row.
    pub const fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Data rows that fit under the header.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.bounds.height.saturating_sub(HEADER_ROWS))
    }

    fn scroll_to_selection(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let index = selected - 1;
        let visible = self.visible_rows().max(1);
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + visible {
            self.offset = index + 1 - visible;
        }
    }

    /// Left edge and width of each column for the current bounds.
    fn column_layout(&self) -> [(u16, u16); COLUMN_COUNT] {
        let fixed: u16 = FIXED_WIDTHS.iter().sum();
        let separators = u16::try_from(COLUMN_COUNT - 1).unwrap_or(0);
        let location = self
            .bounds
            .width
            .saturating_sub(fixed + separators)
            .max(MIN_LOCATION_WIDTH);

        let mut layout = [(0, 0); COLUMN_COUNT];
        let mut x = self.bounds.x;
        for (i, slot) in layout.iter_mut().enumerate() {
            let width = if i == LOCATION_COLUMN { location } else { FIXED_WIDTHS[i] };
            *slot = (x, width);
            x = x.saturating_add(width).saturating_add(1);
        }
        layout
    }

    fn cell_style(&self, row: &TableRow, column: usize, selected: bool) -> Style {
        if column == 0 {
            // Time column is never part of the selection
            return Style::fg(self.config.time_fg);
        }
        let style = Style::fg(self.config.severity_color(row.severity));
        if selected {
            style.add(Modifiers::REVERSED)
        } else {
            style
        }
    }

    fn draw_separators(&self, buffer: &mut Buffer, y: u16, layout: &[(u16, u16)], glyph: char) {
        let right = self.bounds.right();
        for &(x, width) in layout.iter().take(COLUMN_COUNT - 1) {
            let bar = x.saturating_add(width);
            if bar < right {
                buffer.set(bar, y, Cell::new(glyph).with_fg(self.config.border_fg));
            }
        }
    }
}

impl Widget for QuakeTable {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.scroll_to_selection();
    }

    fn render(&self, buffer: &mut Buffer) {
        let area = self.bounds;
        if area.is_empty() {
            return;
        }
        buffer.fill_rect(area.x, area.y, area.width, area.height, Cell::EMPTY);

        let layout = self.column_layout();
        let right = area.right();
        let clip = |x: u16, width: u16| width.min(right.saturating_sub(x));

        // Header, centered
        let header = Style::fg(self.config.header_fg).add(Modifiers::BOLD);
        for (&(x, width), title) in layout.iter().zip(COLUMN_TITLES) {
            let title_width = u16::try_from(title.len()).unwrap_or(width);
            let pad = width.saturating_sub(title_width) / 2;
            let start = x.saturating_add(pad);
            buffer.draw_text(start, area.y, clip(start, width - pad), title, header);
        }
        self.draw_separators(buffer, area.y, &layout, '│');

        if area.height < HEADER_ROWS {
            return;
        }
        let rule_y = area.y + 1;
        for x in area.x..right {
            buffer.set(x, rule_y, Cell::new('─').with_fg(self.config.border_fg));
        }
        self.draw_separators(buffer, rule_y, &layout, '┼');

        for (y, (index, row)) in
            (area.y + HEADER_ROWS..area.bottom()).zip(self.rows.iter().enumerate().skip(self.offset))
        {
            let selected = self.selected == Some(index + 1);
            for (column, (&(x, width), text)) in layout.iter().zip(&row.cells).enumerate() {
                let style = self.cell_style(row, column, selected);
                if selected && column > 0 {
                    buffer.fill_rect(x, y, clip(x, width), 1, Cell::EMPTY.with_style(style));
                }
                // One column of left padding inside each cell
                let text_x = x.saturating_add(1);
                buffer.draw_text(text_x, y, clip(text_x, width.saturating_sub(1)), text, style);
            }
            self.draw_separators(buffer, y, &layout, '│');
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let InputEvent::Key { code, .. } = event else {
            return false;
        };
        let page = isize::try_from(self.visible_rows().max(1)).unwrap_or(isize::MAX);
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Home | KeyCode::Char('g') => self.select(1),
            KeyCode::End | KeyCode::Char('G') => self.select(self.rows.len()),
            _ => return false,
        }
        true
    }
}
