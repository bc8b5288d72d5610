//! Screen model
//!
//! Platform-independent terminal state. This module contains:
//! - Graphic attributes and the cells that share them
//! - Sparse lines with dirty and soft-wrap flags
//! - Cursor, mode flags and tab stops
//! - The screen buffer state machine and its scrollback
//! - Deterministic snapshot generation
//!
//! Given the same sequence of operations, the buffer always produces the same
//! state.

mod attributes;
mod buffer;
mod cell;
mod charset;
mod cursor;
mod line;
mod modes;
mod scrollback;
mod snapshot;
mod tabs;

pub use attributes::{AttributeFlag, Color, GraphicAttributes};
pub use buffer::{EraseMode, ScreenBuffer};
pub use cell::Cell;
pub use charset::translate_graphics;
pub use cursor::Cursor;
pub use line::Line;
pub use modes::{Mode, Modes};
pub use scrollback::Scrollback;
pub use snapshot::{CellSnapshot, ColorSnapshot, CursorSnapshot, LineSnapshot, Snapshot};
pub use tabs::{TabClear, TabStops};
