//! Screen buffer implementation
//!
//! The buffer owns the visible lines, the scrollback, the cursor, the scroll
//! area, tab stops, mode flags and the current graphic attributes. Lines and
//! cells are created lazily on first write, so the visible grid may hold
//! fewer lines than `height` and lines may be shorter than `width`.
//!
//! The current attributes follow a copy-on-write rule: once a write has
//! attached the current snapshot to a cell, the next attribute change clones
//! it first, so previously written cells never change.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::attributes::{AttributeFlag, Color, GraphicAttributes};
use super::cell::Cell;
use super::charset::translate_graphics;
use super::cursor::{clamp_axis, Cursor};
use super::line::Line;
use super::modes::{Mode, Modes};
use super::scrollback::Scrollback;
use super::tabs::{TabClear, TabStops};
use crate::config::Config;

/// Scope of an erase operation (ED/EL parameter)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraseMode {
    /// From the cursor to the end (0, default)
    #[default]
    ToEnd,
    /// From the beginning up to and including the cursor (1)
    ToBegin,
    /// Everything in scope (2)
    Entire,
}

impl EraseMode {
    /// Decode a CSI parameter; unset means `ToEnd`, unknown values yield `None`
    pub fn from_param(param: Option<u16>) -> Option<Self> {
        match param {
            None | Some(0) => Some(EraseMode::ToEnd),
            Some(1) => Some(EraseMode::ToBegin),
            Some(2) => Some(EraseMode::Entire),
            Some(_) => None,
        }
    }
}

/// The screen buffer state machine
#[derive(Debug, Clone)]
pub struct ScreenBuffer {
    /// Number of columns
    width: usize,
    /// Number of rows
    height: usize,
    /// Visible lines, index 0 = top, at most `height`
    lines: Vec<Line>,
    /// Lines evicted off the top, oldest first
    scrollback: Scrollback,
    cursor: Cursor,
    /// Scroll area top (0-indexed, inclusive)
    scroll_top: usize,
    /// Scroll area bottom (0-indexed, inclusive)
    scroll_bottom: usize,
    tab_stops: TabStops,
    /// Attributes applied to the next written cell
    attributes: Arc<GraphicAttributes>,
    /// Immutable defaults restored by SGR 0
    default_attributes: Arc<GraphicAttributes>,
    /// Whether `attributes` is referenced by a written cell
    attributes_committed: bool,
    modes: Modes,
}

impl ScreenBuffer {
    /// Create a buffer with default attributes and modes
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_defaults(width, height, GraphicAttributes::default())
    }

    /// Create a buffer with explicit default attributes
    pub fn with_defaults(width: usize, height: usize, defaults: GraphicAttributes) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let default_attributes = Arc::new(defaults);

        Self {
            width,
            height,
            lines: Vec::new(),
            scrollback: Scrollback::new(),
            cursor: Cursor::default(),
            scroll_top: 0,
            scroll_bottom: height - 1,
            tab_stops: TabStops::new(),
            attributes: Arc::clone(&default_attributes),
            default_attributes,
            attributes_committed: true,
            modes: Modes::default(),
        }
    }

    /// Create a buffer from a configuration
    pub fn with_config(config: &Config) -> Self {
        let defaults = GraphicAttributes::with_colors(
            Color::from(config.default_foreground),
            Color::from(config.default_background),
        );
        let mut buffer = Self::with_defaults(config.cols, config.rows, defaults);
        buffer.scrollback.set_capacity(config.scrollback_limit);
        buffer.modes.wraparound = config.wraparound;
        buffer.modes.crlf_on_newline = config.crlf_on_newline;
        buffer
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Scroll area as inclusive `(top, bottom)` rows
    pub fn scroll_area(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_bottom)
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    /// Set or reset a mode flag
    pub fn set_mode(&mut self, mode: Mode, value: bool) {
        self.modes.set(mode, value);
    }

    pub fn tab_stops(&self) -> &TabStops {
        &self.tab_stops
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// Visible lines, index 0 = top
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Get a visible line, if it has been created
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Get a visible cell, if it has been written
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.lines.get(row).and_then(|line| line.cell(col))
    }

    /// Attributes applied to the next written cell
    pub fn attributes(&self) -> &GraphicAttributes {
        &self.attributes
    }

    pub fn default_attributes(&self) -> &GraphicAttributes {
        &self.default_attributes
    }

    /// Whether the current attributes are referenced by a written cell
    pub fn attributes_committed(&self) -> bool {
        self.attributes_committed
    }

    /// Mutable access to the current attributes, cloning them first if a
    /// written cell already references them
    pub fn attributes_mut(&mut self) -> &mut GraphicAttributes {
        if self.attributes_committed {
            self.attributes = Arc::new(*self.attributes);
            self.attributes_committed = false;
        }
        Arc::make_mut(&mut self.attributes)
    }

    /// Change a single attribute flag
    pub fn set_attribute(&mut self, flag: AttributeFlag, value: bool) {
        self.attributes_mut().set_flag(flag, value);
    }

    /// Point the current attributes back at the shared defaults
    pub fn reset_attributes(&mut self) {
        self.attributes = Arc::clone(&self.default_attributes);
        self.attributes_committed = true;
    }

    /// Get a visible line, creating it (and any lines above it) if needed
    fn line_mut(&mut self, row: usize) -> &mut Line {
        if row >= self.lines.len() {
            self.lines.resize_with(row + 1, fresh_line);
        }
        &mut self.lines[row]
    }

    fn cursor_cell_is_set(&self) -> bool {
        self.lines
            .get(self.cursor.y)
            .is_some_and(|line| line.is_set(self.cursor.x))
    }

    /// Write text at the cursor. `\n` starts a new line; every other
    /// character is placed in the cursor cell and advances the cursor.
    pub fn write(&mut self, data: &str) {
        for c in data.chars() {
            if c == '\n' {
                self.new_line(false);
                continue;
            }
            let ch = if self.attributes.graphics {
                translate_graphics(c)
            } else {
                c
            };
            let cell = Cell::new(ch, Arc::clone(&self.attributes));
            self.attributes_committed = true;
            self.place(Some(cell));
        }
    }

    /// Put a cell (or a hole) at the cursor and advance
    fn place(&mut self, cell: Option<Cell>) {
        if self.modes.insert && self.cursor_cell_is_set() {
            self.insert_space(1);
        }
        *self.edit_slot() = cell;
        self.move_cursor(1, 0);
    }

    /// Resolve a pending wrap, mark the cursor line changed and return the
    /// cell under the cursor, creating a blank one if the position is unset
    pub fn edit_char(&mut self) -> &mut Cell {
        let attrs = Arc::clone(&self.attributes);
        self.edit_slot().get_or_insert_with(|| Cell::blank(attrs))
    }

    fn edit_slot(&mut self) -> &mut Option<Cell> {
        if self.cursor.x >= self.width {
            if self.modes.wraparound {
                self.new_line(true);
            } else {
                self.cursor.x = self.width - 1;
            }
        }

        let Cursor { x, y } = self.cursor;
        let line = self.line_mut(y);
        line.set_changed(true);
        line.slot_mut(x)
    }

    /// Insert `count` blanks at the cursor, shifting the rest of the line
    /// right and dropping whatever passes the right margin
    pub fn insert_space(&mut self, count: usize) {
        let blank = Cell::blank(Arc::clone(&self.attributes));
        self.attributes_committed = true;
        let Cursor { x, y } = self.cursor;
        let width = self.width;
        self.line_mut(y).insert(x, count, &blank, width);
    }

    /// Move to the next line. `soft` records that the current line wraps
    /// onto the next one. At the bottom of the scroll area a fresh line is
    /// inserted instead of moving.
    pub fn new_line(&mut self, soft: bool) {
        let y = self.cursor.y;
        self.line_mut(y).set_soft(soft);

        if y == self.scroll_bottom {
            self.insert_line(true, None);
        } else if y + 1 < self.height {
            self.cursor.y += 1;
        }

        if soft || self.modes.crlf_on_newline {
            self.cursor.x = 0;
        }

        let y = self.cursor.y;
        self.line_mut(y);
    }

    /// Insert an empty line at `row` (default: cursor row), or after it.
    ///
    /// When the insertion overfills a scroll sub-region, the region's top
    /// line is evicted so rows outside the region stay in place. Otherwise,
    /// once the buffer exceeds `height`, the excess is evicted from the scroll
    /// area top. Evicted lines reach the scrollback only when the scroll area
    /// starts at row 0.
    pub fn insert_line(&mut self, insert_after: bool, row: Option<usize>) {
        let row = row.unwrap_or(self.cursor.y);
        let at = if insert_after { row + 1 } else { row };

        if at > self.lines.len() {
            self.lines.resize_with(at, fresh_line);
        }
        self.lines.insert(at, fresh_line());

        let top = self.scroll_top;
        let bottom = self.scroll_bottom;
        let region_overflow = (top..=bottom + 1).contains(&at)
            && bottom + 1 < self.height
            && self.lines.len() > bottom + 1;

        if region_overflow {
            self.evict(top, 1);
        } else if self.lines.len() > self.height {
            let oversize = self.lines.len() - self.height;
            self.evict(top, oversize);
        }

        self.mark_changed_from(at.min(top));
    }

    /// Remove `count` lines starting at `start`
    fn evict(&mut self, start: usize, count: usize) {
        let end = (start + count).min(self.lines.len());
        let evicted: Vec<Line> = self.lines.drain(start..end).collect();
        tracing::trace!(start, count = evicted.len(), "evicting lines");

        if self.scroll_top == 0 {
            for line in evicted {
                self.scrollback.push(line);
            }
        }
    }

    fn mark_changed_from(&mut self, row: usize) {
        for line in self.lines.iter_mut().skip(row) {
            line.set_changed(true);
        }
    }

    fn scroll_area_height(&self) -> usize {
        self.scroll_bottom - self.scroll_top + 1
    }

    /// Scroll the scroll area content up by `n` lines (blank lines appear at
    /// the bottom of the area). `n` is capped at the area height.
    pub fn scroll_up(&mut self, n: usize) {
        let bottom = self.scroll_bottom;
        for _ in 0..n.min(self.scroll_area_height()) {
            if self.lines.len() <= bottom {
                self.lines.resize_with(bottom + 1, fresh_line);
            }
            self.insert_line(true, Some(bottom));
        }
    }

    /// Scroll the scroll area content down by `n` lines (blank lines appear
    /// at the top of the area, lines pushed past the bottom are dropped).
    /// `n` is capped at the area height.
    pub fn scroll_down(&mut self, n: usize) {
        let top = self.scroll_top;
        let bottom = self.scroll_bottom;
        for _ in 0..n.min(self.scroll_area_height()) {
            if self.lines.len() > bottom {
                self.lines.remove(bottom);
            }
            if top > self.lines.len() {
                self.lines.resize_with(top, fresh_line);
            }
            self.lines.insert(top, fresh_line());
        }
        self.lines.truncate(self.height);
        self.mark_changed_from(top);
    }

    /// Set the scroll area; `None` selects the full height
    pub fn set_scroll_area(&mut self, area: Option<(isize, isize)>) {
        let full = (0, self.height - 1);
        let (top, bottom) = match area {
            None => full,
            Some((top, bottom)) => {
                let top = top.max(0).unsigned_abs();
                let bottom = bottom.min(self.height as isize - 1);
                if bottom < 0 || top > bottom.unsigned_abs() {
                    tracing::debug!(top, bottom, "empty scroll area, using full height");
                    full
                } else {
                    (top, bottom.unsigned_abs())
                }
            }
        };
        self.scroll_top = top;
        self.scroll_bottom = bottom;
    }

    /// Erase in display. Rows are handled here; the cursor row is then
    /// erased in line with the same mode.
    pub fn erase_in_display(&mut self, mode: EraseMode) {
        let y = self.cursor.y;
        match mode {
            EraseMode::ToEnd => self.lines.truncate(y + 1),
            EraseMode::ToBegin => {
                for line in self.lines.iter_mut().take(y) {
                    line.clear();
                }
            }
            EraseMode::Entire => self.lines.clear(),
        }
        self.erase_in_line(mode);
    }

    /// Erase in line at the cursor row
    pub fn erase_in_line(&mut self, mode: EraseMode) {
        let Cursor { x, y } = self.cursor;
        let line = self.line_mut(y);
        match mode {
            EraseMode::ToEnd => line.truncate(x),
            EraseMode::ToBegin => line.clear_to(x),
            EraseMode::Entire => line.clear(),
        }
    }

    /// Move every visible line into the scrollback
    pub fn clear(&mut self) {
        for line in self.lines.drain(..) {
            self.scrollback.push(line);
        }
    }

    /// Delete `n` cells at the cursor, shifting the rest of the line left
    pub fn delete_char(&mut self, n: usize) {
        let Cursor { x, y } = self.cursor;
        self.line_mut(y).delete(x, n);
        self.revalidate_cursor();
    }

    /// Blank `n` cells at the cursor without shifting
    pub fn erase_char(&mut self, n: usize) {
        let Cursor { x, y } = self.cursor;
        self.line_mut(y).clear_range(x, n);
        self.revalidate_cursor();
    }

    fn revalidate_cursor(&mut self) {
        let Cursor { x, y } = self.cursor;
        self.set_cursor(Some(x as isize), Some(y as isize));
    }

    /// Set the cursor, clamping `x` into `[0, width]` and `y` into
    /// `[0, height - 1]`. Omitted axes are left untouched and count as in
    /// bounds. Returns whether both axes were in bounds before clamping.
    pub fn set_cursor(&mut self, x: Option<isize>, y: Option<isize>) -> bool {
        let mut in_bounds = true;
        if let Some(x) = x {
            let (x, ok) = clamp_axis(x, self.width);
            self.cursor.x = x;
            in_bounds &= ok;
        }
        if let Some(y) = y {
            let (y, ok) = clamp_axis(y, self.height - 1);
            self.cursor.y = y;
            in_bounds &= ok;
        }
        in_bounds
    }

    /// Move the cursor relative to its position, with `set_cursor` clamping
    pub fn move_cursor(&mut self, dx: isize, dy: isize) -> bool {
        let x = self.cursor.x as isize + dx;
        let y = self.cursor.y as isize + dy;
        self.set_cursor(Some(x), Some(y))
    }

    /// Add a tab stop at the cursor column
    pub fn set_tab_stop(&mut self) {
        self.tab_stops.set(self.cursor.x);
    }

    /// Clear the nearest stop left of the cursor, or all stops
    pub fn clear_tab_stop(&mut self, scope: TabClear) {
        self.tab_stops.clear(scope, self.cursor.x);
    }

    /// Cross `n` tab stops (backwards when negative)
    pub fn move_to_tab_stop(&mut self, n: isize) {
        let x = self.tab_stops.step(self.cursor.x, n, self.width);
        self.set_cursor(Some(x as isize), None);
    }

    /// Resize the grid, reflowing scrollback and visible lines oldest-first
    /// through the write path. The cursor keeps its old coordinates, clamped
    /// into the new bounds.
    pub fn resize(&mut self, width: usize, height: usize) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "resizing screen buffer"
        );

        let mut old = self.scrollback.take();
        old.append(&mut self.lines);
        let old_cursor = self.cursor;

        self.width = width;
        self.height = height;
        self.cursor = Cursor::default();
        self.scroll_top = 0;
        self.scroll_bottom = height - 1;

        let insert = self.modes.insert;
        self.modes.insert = false;
        let total = old.len();
        for (i, line) in old.into_iter().enumerate() {
            let soft = line.is_soft();
            if i > 0 && self.cursor.x >= self.width && self.modes.wraparound {
                // continuation of a soft line, even when it holds no cells
                self.new_line(true);
            }
            for slot in line.cells() {
                self.place(slot.clone());
            }
            if !soft && i + 1 < total {
                self.new_line(false);
                self.cursor.x = 0;
            }
        }
        self.modes.insert = insert;

        self.mark_changed_from(0);
        self.set_cursor(Some(old_cursor.x as isize), Some(old_cursor.y as isize));
    }

    /// Visible lines, optionally preceded by the scrollback
    pub fn dump(&self, include_scrollback: bool) -> Vec<&Line> {
        let history = self.scrollback.iter().filter(|_| include_scrollback);
        history.chain(self.lines.iter()).collect()
    }

    /// Clear the dirty flag of every visible line after a render pass
    pub fn clear_changed_flags(&mut self) {
        for line in &mut self.lines {
            line.set_changed(false);
        }
    }

    /// Diagnostic text rendering. With `locate_cursor`, marker rows point at
    /// the cursor column and each line is prefixed with its dirty flag (`*`)
    /// and a cursor-row marker (`>`).
    pub fn render_text(&self, locate_cursor: bool) -> String {
        let marker = " ".repeat(self.cursor.x + 1);
        let mut rows = Vec::with_capacity(self.lines.len() + 2);

        if locate_cursor {
            rows.push(format!("{marker}v"));
        }
        for (i, line) in self.lines.iter().enumerate() {
            let mut row = String::new();
            if locate_cursor {
                row.push(if line.is_changed() { '*' } else { ' ' });
                row.push(if i == self.cursor.y { '>' } else { ' ' });
            }
            row.push_str(&line.text());
            rows.push(row.trim_end().to_string());
        }
        if locate_cursor {
            rows.push(format!("{marker}^"));
        }

        rows.join("\n")
    }
}

/// A blank line already flagged for the next render pass
fn fresh_line() -> Line {
    let mut line = Line::new();
    line.set_changed(true);
    line
}

impl fmt::Display for ScreenBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(false))
    }
}
