//! Terminal line representation
//!
//! A line is a sparse row of cells: positions that were never written (or
//! were erased) are holes and render as blanks. Lines also carry the dirty
//! flag consumed by renderers and the soft-wrap flag used when reflowing.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// A row of optional cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// The cells in this line; `None` is an unset position
    cells: Vec<Option<Cell>>,
    /// Set on any mutation, cleared after a render pass
    changed: bool,
    /// True if this line continues on the next one because of a wrap
    soft: bool,
}

impl Line {
    /// Create an empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored positions (last set cell + 1, or less after truncation)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the line stores no cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Get the cell at the given column, if set
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col).and_then(Option::as_ref)
    }

    /// All positions, holes included
    pub fn cells(&self) -> &[Option<Cell>] {
        &self.cells
    }

    /// Check whether a position holds a cell
    pub fn is_set(&self, col: usize) -> bool {
        self.cell(col).is_some()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    /// Check if this line continues on the next one
    pub fn is_soft(&self) -> bool {
        self.soft
    }

    pub fn set_soft(&mut self, soft: bool) {
        self.soft = soft;
    }

    /// Mutable slot at a column, growing the line with holes as needed
    pub fn slot_mut(&mut self, col: usize) -> &mut Option<Cell> {
        if col >= self.cells.len() {
            self.cells.resize(col + 1, None);
        }
        &mut self.cells[col]
    }

    /// Drop every position from `col` onwards
    pub fn truncate(&mut self, col: usize) {
        self.cells.truncate(col);
        self.changed = true;
    }

    /// Clear positions `0..=col` in place, without shifting
    pub fn clear_to(&mut self, col: usize) {
        let end = (col + 1).min(self.cells.len());
        for slot in &mut self.cells[..end] {
            *slot = None;
        }
        self.trim();
        self.changed = true;
    }

    /// Clear positions `col..col + count` in place, without shifting
    pub fn clear_range(&mut self, col: usize, count: usize) {
        let start = col.min(self.cells.len());
        let end = col.saturating_add(count).min(self.cells.len());
        for slot in &mut self.cells[start..end] {
            *slot = None;
        }
        self.trim();
        self.changed = true;
    }

    /// Remove every position
    pub fn clear(&mut self) {
        self.cells.clear();
        self.changed = true;
    }

    /// Remove `count` positions at `col`, shifting the rest left
    pub fn delete(&mut self, col: usize, count: usize) {
        if col < self.cells.len() {
            let end = col.saturating_add(count).min(self.cells.len());
            self.cells.drain(col..end);
        }
        self.changed = true;
    }

    /// Insert `cell` `count` times at `col`, shifting the rest right.
    /// Positions pushed past `width` are lost.
    pub fn insert(&mut self, col: usize, count: usize, cell: &Cell, width: usize) {
        if col > self.cells.len() {
            self.cells.resize(col, None);
        }
        let fill = std::iter::repeat(Some(cell.clone())).take(count);
        self.cells.splice(col..col, fill);
        self.cells.truncate(width);
        self.changed = true;
    }

    /// Drop trailing holes
    fn trim(&mut self) {
        while matches!(self.cells.last(), Some(None)) {
            self.cells.pop();
        }
    }

    /// Text content with holes rendered as spaces and trailing blanks trimmed
    pub fn text(&self) -> String {
        let text: String = self
            .cells
            .iter()
            .map(|slot| slot.as_ref().map_or(' ', |cell| cell.ch))
            .collect();
        text.trim_end().to_string()
    }
}
