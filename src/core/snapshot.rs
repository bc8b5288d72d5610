//! Deterministic snapshot generation
//!
//! Snapshots capture the buffer state in a serializable format for testing
//! and debugging. Given the same byte stream, the buffer must produce
//! identical snapshots.

use serde::{Deserialize, Serialize};

use super::attributes::{Color, GraphicAttributes};
use super::buffer::ScreenBuffer;
use super::cell::Cell;
use super::line::Line;
use super::modes::Modes;

/// A snapshot of the buffer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Screen dimensions
    pub cols: usize,
    pub rows: usize,
    /// Visible lines, top first
    pub lines: Vec<LineSnapshot>,
    /// Cursor state
    pub cursor: CursorSnapshot,
    /// Scroll area (inclusive)
    pub scroll_top: usize,
    pub scroll_bottom: usize,
    /// Mode flags
    pub modes: ModesSnapshot,
    /// Scrollback line count
    pub scrollback_lines: usize,
    /// Scrollback content, oldest first, when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scrollback: Vec<LineSnapshot>,
}

/// Snapshot of a single line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Rendered text, right-trimmed
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub changed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub soft: bool,
    /// Positions in order; `None` is a hole
    pub cells: Vec<Option<CellSnapshot>>,
}

/// Snapshot of a single cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub content: char,
    pub fg: ColorSnapshot,
    pub bg: ColorSnapshot,
    #[serde(default)]
    pub style: StyleSnapshot,
}

/// Snapshot of a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ColorSnapshot {
    Default,
    Indexed { index: u8 },
}

/// Snapshot of the boolean attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleSnapshot {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub blink: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inverse: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub graphics: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub double_top: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub double_bottom: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub double_width: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Snapshot of cursor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub col: usize,
    pub row: usize,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub pending_wrap: bool,
}

/// Snapshot of mode flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModesSnapshot {
    pub wraparound: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert: bool,
    pub crlf_on_newline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub application_cursor_keys: bool,
}

impl From<&Color> for ColorSnapshot {
    fn from(color: &Color) -> Self {
        match color {
            Color::Default => ColorSnapshot::Default,
            Color::Indexed(i) => ColorSnapshot::Indexed { index: *i },
        }
    }
}

impl From<&GraphicAttributes> for StyleSnapshot {
    fn from(attrs: &GraphicAttributes) -> Self {
        StyleSnapshot {
            bold: attrs.bold,
            italic: attrs.italic,
            underline: attrs.underline,
            blink: attrs.blink,
            inverse: attrs.inverse,
            graphics: attrs.graphics,
            double_top: attrs.double_top,
            double_bottom: attrs.double_bottom,
            double_width: attrs.double_width,
        }
    }
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        let attrs = cell.attributes();
        CellSnapshot {
            content: cell.ch,
            fg: ColorSnapshot::from(&attrs.fg),
            bg: ColorSnapshot::from(&attrs.bg),
            style: StyleSnapshot::from(attrs),
        }
    }
}

impl From<&Line> for LineSnapshot {
    fn from(line: &Line) -> Self {
        LineSnapshot {
            text: line.text(),
            changed: line.is_changed(),
            soft: line.is_soft(),
            cells: line
                .cells()
                .iter()
                .map(|slot| slot.as_ref().map(CellSnapshot::from))
                .collect(),
        }
    }
}

impl From<&Modes> for ModesSnapshot {
    fn from(modes: &Modes) -> Self {
        ModesSnapshot {
            wraparound: modes.wraparound,
            insert: modes.insert,
            crlf_on_newline: modes.crlf_on_newline,
            application_cursor_keys: modes.application_cursor_keys,
        }
    }
}

impl Snapshot {
    /// Create a snapshot of the buffer, optionally including the scrollback
    pub fn from_buffer(buffer: &ScreenBuffer, include_scrollback: bool) -> Self {
        let cursor = buffer.cursor();
        let scrollback = if include_scrollback {
            buffer.scrollback().iter().map(LineSnapshot::from).collect()
        } else {
            Vec::new()
        };
        let (scroll_top, scroll_bottom) = buffer.scroll_area();

        Snapshot {
            cols: buffer.width(),
            rows: buffer.height(),
            lines: buffer.lines().iter().map(LineSnapshot::from).collect(),
            cursor: CursorSnapshot {
                col: cursor.x,
                row: cursor.y,
                visible: buffer.modes().show_cursor,
                pending_wrap: cursor.is_pending_wrap(buffer.width()),
            },
            scroll_top,
            scroll_bottom,
            modes: ModesSnapshot::from(buffer.modes()),
            scrollback_lines: buffer.scrollback().len(),
            scrollback,
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain text of the captured lines (scrollback first), one per row
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for line in self.scrollback.iter().chain(&self.lines) {
            result.push_str(&line.text);
            result.push('\n');
        }

        // Remove trailing empty lines
        while result.ends_with("\n\n") {
            result.pop();
        }

        result
    }

    /// Compare the captured content, ignoring dirty flags
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        if self.cols != other.cols || self.rows != other.rows {
            return false;
        }
        if self.lines.len() != other.lines.len() {
            return false;
        }

        self.lines
            .iter()
            .zip(&other.lines)
            .all(|(a, b)| a.cells == b.cells && a.soft == b.soft)
    }
}
