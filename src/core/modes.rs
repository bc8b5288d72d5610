//! Terminal mode flags
//!
//! Manages the modes that change how the buffer reacts to writes and
//! newlines.

use serde::{Deserialize, Serialize};

/// Addressable mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Wraparound,
    ShowCursor,
    Insert,
    CrlfOnNewline,
    ApplicationCursorKeys,
}

/// Terminal mode flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// DECAWM - Auto wrap mode
    /// When enabled, characters written past the right margin wrap to the next line
    pub wraparound: bool,

    /// DECTCEM - Cursor visible
    pub show_cursor: bool,

    /// IRM - Insert/Replace mode
    /// When enabled, writing over an occupied cell shifts the line right
    pub insert: bool,

    /// LNM - Line feed/new line mode
    /// When enabled, LF also performs CR
    pub crlf_on_newline: bool,

    /// DECCKM - Cursor key mode
    /// Tracked for the input side; the buffer itself does not consult it
    pub application_cursor_keys: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            wraparound: true,
            show_cursor: true,
            insert: false,
            crlf_on_newline: true,
            application_cursor_keys: false,
        }
    }
}

impl Modes {
    /// Set a mode flag
    pub fn set(&mut self, mode: Mode, value: bool) {
        match mode {
            Mode::Wraparound => self.wraparound = value,
            Mode::ShowCursor => self.show_cursor = value,
            Mode::Insert => self.insert = value,
            Mode::CrlfOnNewline => self.crlf_on_newline = value,
            Mode::ApplicationCursorKeys => self.application_cursor_keys = value,
        }
    }
}
