//! CSI (Control Sequence Introducer) recognition and dispatch
//!
//! A sequence is recognized at the start of the text following an ESC:
//! `[`, an optional `?` private marker, `;`-separated decimal arguments and a
//! final byte in `@`..`Z`, `` ` `` or `a`..`z`. Recognized sequences decode
//! into a closed [`Command`] set, which is applied to a [`TerminalHost`].

use super::sgr;
use crate::core::{EraseMode, Mode, ScreenBuffer};

/// Operations the dispatcher needs from the terminal that owns the buffer
pub trait TerminalHost {
    /// The screen buffer commands are applied to
    fn buffer_mut(&mut self) -> &mut ScreenBuffer;

    /// Relative cursor motion
    fn move_cursor(&mut self, dx: isize, dy: isize) {
        self.buffer_mut().move_cursor(dx, dy);
    }

    /// Scroll the content by `n` lines (negative = up)
    fn scroll(&mut self, n: isize);

    /// Set indicator `n` (0 clears all)
    fn set_indicator(&mut self, n: u16);

    fn save_cursor(&mut self);

    fn restore_cursor(&mut self);
}

/// Dispatch failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsiError {
    /// The fragment does not start with a CSI sequence; nothing was consumed
    #[error("not a CSI sequence")]
    NotCsi,
    /// Well-formed sequence with an unknown final byte; nothing was applied
    #[error("unsupported CSI sequence '{sequence}'")]
    Unsupported { sequence: String },
}

/// A recognized CSI sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsiSequence {
    /// `?` private marker present
    pub private: bool,
    /// Arguments in order; empty ones are unset
    pub args: Vec<Option<u16>>,
    /// Final byte selecting the command
    pub final_byte: u8,
    /// Length of the sequence, `[` included
    pub len: usize,
}

/// Supported commands
///
/// Counts are kept 1-indexed as received. Relative motions move by the
/// count minus one, so `CSI 3A` moves two rows and a bare `CSI A` stays put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CursorUp(usize),
    CursorDown(usize),
    CursorForward(usize),
    CursorBack(usize),
    /// Down `n - 1` rows, column 0
    NextLine(usize),
    /// Up `n - 1` rows, column 0
    PrecedingLine(usize),
    /// 1-indexed column
    CursorColumn(usize),
    /// 1-indexed row and column
    CursorPosition { row: usize, col: usize },
    EraseInDisplay(Option<u16>),
    EraseInLine(Option<u16>),
    ScrollUp(usize),
    ScrollDown(usize),
    SelectGraphicRendition(Vec<u16>),
    SetIndicator(u16),
    /// 1-indexed inclusive rows; `None` selects the full height
    SetScrollArea(Option<(usize, usize)>),
    SaveCursor,
    RestoreCursor,
    HideCursor,
    ShowCursor,
}

fn is_final_byte(byte: u8) -> bool {
    matches!(byte, b'@'..=b'Z' | b'`'..=b'z')
}

fn is_arg_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b';'
}

/// Recognize a CSI sequence at the start of `fragment` (the text after ESC)
pub fn parse(fragment: &str) -> Option<CsiSequence> {
    let bytes = fragment.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }

    let mut i = 1;
    let private = bytes.get(i) == Some(&b'?');
    if private {
        i += 1;
    }

    let args_start = i;
    while bytes.get(i).copied().is_some_and(is_arg_byte) {
        i += 1;
    }
    let args_end = i;

    let final_byte = *bytes.get(i).filter(|&&b| is_final_byte(b))?;

    Some(CsiSequence {
        private,
        args: parse_args(&bytes[args_start..args_end]),
        final_byte,
        len: i + 1,
    })
}

fn parse_args(raw: &[u8]) -> Vec<Option<u16>> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(|&b| b == b';')
        .map(|arg| {
            if arg.is_empty() {
                return None;
            }
            Some(arg.iter().fold(0u16, |acc, &digit| {
                acc.saturating_mul(10).saturating_add(u16::from(digit - b'0'))
            }))
        })
        .collect()
}

/// Check whether `fragment` (the text after ESC) could still become a CSI
/// sequence once more input arrives
pub fn is_incomplete(fragment: &str) -> bool {
    let bytes = fragment.as_bytes();
    match bytes.split_first() {
        None => true,
        Some((&b'[', rest)) => {
            let rest = rest.strip_prefix(b"?").unwrap_or(rest);
            rest.iter().copied().all(is_arg_byte)
        }
        Some(_) => false,
    }
}

/// Count argument: unset or zero means 1
fn count(arg: Option<u16>) -> usize {
    usize::from(arg.filter(|&n| n != 0).unwrap_or(1))
}

impl CsiSequence {
    fn arg(&self, index: usize) -> Option<u16> {
        self.args.get(index).copied().flatten()
    }

    /// Decode into a command, or `None` for an unknown final byte
    pub fn command(&self) -> Option<Command> {
        let n = self.arg(0);
        let m = self.arg(1);

        let command = match self.final_byte {
            b'A' => Command::CursorUp(count(n)),
            b'B' => Command::CursorDown(count(n)),
            b'C' => Command::CursorForward(count(n)),
            b'D' => Command::CursorBack(count(n)),
            b'E' => Command::NextLine(count(n)),
            b'F' => Command::PrecedingLine(count(n)),
            b'G' => Command::CursorColumn(count(n)),
            b'H' | b'f' => Command::CursorPosition {
                row: count(n),
                col: count(m),
            },
            b'J' => Command::EraseInDisplay(n),
            b'K' => Command::EraseInLine(n),
            b'S' => Command::ScrollUp(count(n)),
            b'T' => Command::ScrollDown(count(n)),
            b'm' => {
                if self.args.is_empty() {
                    Command::SelectGraphicRendition(vec![0])
                } else {
                    let codes = self.args.iter().map(|arg| arg.unwrap_or(0)).collect();
                    Command::SelectGraphicRendition(codes)
                }
            }
            b'q' => Command::SetIndicator(n.unwrap_or(0)),
            b'r' => match (n, m) {
                (Some(top), Some(bottom)) => {
                    Command::SetScrollArea(Some((usize::from(top), usize::from(bottom))))
                }
                _ => Command::SetScrollArea(None),
            },
            b's' => Command::SaveCursor,
            b'u' => Command::RestoreCursor,
            b'l' => Command::HideCursor,
            b'h' => Command::ShowCursor,
            _ => return None,
        };
        Some(command)
    }
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// Relative distance for a 1-indexed count
fn distance(n: usize) -> isize {
    signed(n.saturating_sub(1))
}

impl Command {
    /// Apply the command to a host
    pub fn apply<H: TerminalHost + ?Sized>(self, host: &mut H) {
        match self {
            Command::CursorUp(n) => host.move_cursor(0, -distance(n)),
            Command::CursorDown(n) => host.move_cursor(0, distance(n)),
            Command::CursorForward(n) => host.move_cursor(distance(n), 0),
            Command::CursorBack(n) => host.move_cursor(-distance(n), 0),
            Command::NextLine(n) => {
                host.move_cursor(0, distance(n));
                host.buffer_mut().set_cursor(Some(0), None);
            }
            Command::PrecedingLine(n) => {
                host.move_cursor(0, -distance(n));
                host.buffer_mut().set_cursor(Some(0), None);
            }
            Command::CursorColumn(col) => {
                host.buffer_mut().set_cursor(Some(signed(col) - 1), None);
            }
            Command::CursorPosition { row, col } => {
                host.buffer_mut()
                    .set_cursor(Some(signed(col) - 1), Some(signed(row) - 1));
            }
            Command::EraseInDisplay(param) => match EraseMode::from_param(param) {
                Some(mode) => host.buffer_mut().erase_in_display(mode),
                None => tracing::warn!("Unknown erase-in-display mode {:?}", param),
            },
            Command::EraseInLine(param) => match EraseMode::from_param(param) {
                Some(mode) => host.buffer_mut().erase_in_line(mode),
                None => tracing::warn!("Unknown erase-in-line mode {:?}", param),
            },
            Command::ScrollUp(n) => host.scroll(-signed(n)),
            Command::ScrollDown(n) => host.scroll(signed(n)),
            Command::SelectGraphicRendition(codes) => {
                let buffer = host.buffer_mut();
                let defaults = *buffer.default_attributes();
                sgr::apply(buffer.attributes_mut(), &defaults, &codes);
            }
            Command::SetIndicator(n) => host.set_indicator(n),
            Command::SetScrollArea(area) => {
                let area = area.map(|(top, bottom)| (signed(top) - 1, signed(bottom) - 1));
                host.buffer_mut().set_scroll_area(area);
            }
            Command::SaveCursor => host.save_cursor(),
            Command::RestoreCursor => host.restore_cursor(),
            Command::HideCursor => host.buffer_mut().set_mode(Mode::ShowCursor, false),
            Command::ShowCursor => host.buffer_mut().set_mode(Mode::ShowCursor, true),
        }
    }
}

/// Recognize and apply the CSI sequence at the start of `fragment` (the
/// text after ESC). Returns the number of bytes consumed, `[` included.
pub fn dispatch<H: TerminalHost + ?Sized>(fragment: &str, host: &mut H) -> Result<usize, CsiError> {
    let sequence = parse(fragment).ok_or(CsiError::NotCsi)?;
    let text = &fragment[..sequence.len];

    let Some(command) = sequence.command() else {
        tracing::warn!("Unknown CSI command '{}'", text);
        return Err(CsiError::Unsupported {
            sequence: text.to_string(),
        });
    };

    tracing::trace!(sequence = text, ?command, "csi dispatch");
    command.apply(host);
    Ok(sequence.len)
}
