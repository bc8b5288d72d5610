//! Terminal facade
//!
//! Splits the raw output stream into literal runs, C0 controls and escape
//! sequences. Literal text goes to the screen buffer, `ESC [` sequences go to
//! the CSI dispatcher, which calls back through [`TerminalHost`]. The facade
//! owns the saved-cursor stack and the keyboard LED state.
//!
//! Input may arrive in arbitrary chunks: an escape sequence or a UTF-8
//! character split across two `feed` calls is held back until it completes.

use crate::config::Config;
use crate::core::{AttributeFlag, Cursor, ScreenBuffer};
use crate::parser::csi::{self, CsiError, TerminalHost};

/// Number of keyboard LEDs addressable with `CSI n q`
pub const LED_COUNT: usize = 4;

/// Longest unterminated escape tail held back between chunks
const MAX_PENDING_ESCAPE: usize = 64;

const ESC: char = '\x1b';

/// Stream-driven terminal around a [`ScreenBuffer`]
#[derive(Debug, Clone)]
pub struct Terminal {
    buffer: ScreenBuffer,
    /// Cursor positions pushed by `CSI s`
    saved_cursors: Vec<Cursor>,
    leds: [bool; LED_COUNT],
    /// Incomplete escape sequence from the previous chunk
    pending: String,
    /// Incomplete UTF-8 character from the previous chunk
    utf8_tail: Vec<u8>,
}

impl Terminal {
    /// Create a new terminal with the given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_buffer(ScreenBuffer::new(cols, rows))
    }

    /// Create a terminal from a configuration
    pub fn with_config(config: &Config) -> Self {
        Self::with_buffer(ScreenBuffer::with_config(config))
    }

    fn with_buffer(buffer: ScreenBuffer) -> Self {
        Self {
            buffer,
            saved_cursors: Vec::new(),
            leds: [false; LED_COUNT],
            pending: String::new(),
            utf8_tail: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &ScreenBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ScreenBuffer {
        &mut self.buffer
    }

    /// LED states, LED 1 first
    pub fn leds(&self) -> [bool; LED_COUNT] {
        self.leds
    }

    /// Resize the buffer, reflowing its content
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.buffer.resize(cols, rows);
    }

    /// Process raw output bytes. Invalid UTF-8 is replaced with U+FFFD.
    pub fn feed(&mut self, data: &[u8]) {
        let mut bytes = std::mem::take(&mut self.utf8_tail);
        bytes.extend_from_slice(data);

        let mut text = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.utf8_tail = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        self.process(&text);
    }

    /// Process decoded output text
    pub fn process(&mut self, text: &str) {
        let mut input = std::mem::take(&mut self.pending);
        input.push_str(text);
        let mut rest = input.as_str();

        while !rest.is_empty() {
            let run = rest.find(is_control).unwrap_or(rest.len());
            if run > 0 {
                self.buffer.write(&rest[..run]);
                rest = &rest[run..];
                continue;
            }

            // Controls are single-byte ASCII
            let control = rest.as_bytes()[0];
            rest = &rest[1..];
            match control {
                0x1b => rest = self.escape(rest),
                b'\r' => {
                    self.buffer.set_cursor(Some(0), None);
                }
                0x08 => {
                    self.buffer.move_cursor(-1, 0);
                }
                b'\t' => self.buffer.move_to_tab_stop(1),
                0x07 => {}
                0x0e => self.buffer.set_attribute(AttributeFlag::Graphics, true),
                0x0f => self.buffer.set_attribute(AttributeFlag::Graphics, false),
                other => tracing::trace!("dropping control 0x{:02x}", other),
            }
        }
    }

    /// Handle the text following an ESC; returns what is left to scan
    fn escape<'a>(&mut self, rest: &'a str) -> &'a str {
        match csi::dispatch(rest, self) {
            Ok(len) => &rest[len..],
            Err(CsiError::Unsupported { sequence }) => &rest[sequence.len()..],
            Err(CsiError::NotCsi) => {
                if csi::is_incomplete(rest) && rest.len() < MAX_PENDING_ESCAPE {
                    self.pending.push(ESC);
                    self.pending.push_str(rest);
                    return "";
                }
                match rest.chars().next() {
                    Some(next) if next != '[' => {
                        tracing::debug!("dropping escape sequence ESC {:?}", next);
                        &rest[next.len_utf8()..]
                    }
                    _ => {
                        tracing::debug!("dropping malformed control sequence introducer");
                        rest
                    }
                }
            }
        }
    }
}

/// C0 controls other than LF, and DEL
fn is_control(c: char) -> bool {
    (c < ' ' && c != '\n') || c == '\x7f'
}

impl TerminalHost for Terminal {
    fn buffer_mut(&mut self) -> &mut ScreenBuffer {
        &mut self.buffer
    }

    fn scroll(&mut self, n: isize) {
        if n < 0 {
            self.buffer.scroll_up(n.unsigned_abs());
        } else {
            self.buffer.scroll_down(n.unsigned_abs());
        }
    }

    fn set_indicator(&mut self, n: u16) {
        match usize::from(n) {
            0 => self.leds = [false; LED_COUNT],
            led @ 1..=LED_COUNT => self.leds[led - 1] = true,
            _ => tracing::debug!("ignoring unknown LED {}", n),
        }
    }

    fn save_cursor(&mut self) {
        self.saved_cursors.push(self.buffer.cursor());
    }

    fn restore_cursor(&mut self) {
        if let Some(cursor) = self.saved_cursors.pop() {
            self.buffer
                .set_cursor(Some(cursor.x as isize), Some(cursor.y as isize));
        }
    }
}
