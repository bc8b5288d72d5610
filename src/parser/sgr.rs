//! SGR (Select Graphic Rendition) interpreter
//!
//! Applies the numeric codes of a `CSI ... m` sequence to an attribute
//! snapshot. Codes are processed left to right; the extended color forms
//! `38;5;N` and `48;5;N` consume their trailing arguments. Unknown codes are
//! reported and skipped without aborting the rest of the sequence.
//!
//! Two codes go beyond the base xterm subset handled here: `1` sets bold and
//! `39` restores the default foreground, mirroring `22` and `49`.

use crate::core::{Color, GraphicAttributes};

/// Apply SGR `codes` to `attrs`, using `defaults` for the reset forms
pub fn apply(attrs: &mut GraphicAttributes, defaults: &GraphicAttributes, codes: &[u16]) {
    let mut i = 0;
    while i < codes.len() {
        let code = codes[i];
        match code {
            0 => *attrs = *defaults,
            1 => attrs.bold = true,
            3 => attrs.italic = true,
            4 => attrs.underline = true,
            5 | 6 => attrs.blink = true,
            7 => attrs.inverse = true,
            22 => {
                attrs.bg = defaults.bg;
                attrs.fg = defaults.fg;
                attrs.bold = defaults.bold;
            }
            23 => attrs.italic = false,
            24 => attrs.underline = false,
            25 => attrs.blink = false,
            27 => attrs.inverse = false,
            30..=37 => attrs.fg = Color::Indexed((code - 30) as u8),
            38 => {
                let (color, consumed) = extended_color(&codes[i..]);
                if let Some(color) = color {
                    attrs.fg = color;
                }
                i += consumed;
            }
            39 => attrs.fg = defaults.fg,
            40..=47 => attrs.bg = Color::Indexed((code - 40) as u8),
            48 => {
                let (color, consumed) = extended_color(&codes[i..]);
                if let Some(color) = color {
                    attrs.bg = color;
                }
                i += consumed;
            }
            49 => attrs.bg = defaults.bg,
            90..=99 => attrs.fg = Color::Indexed((code - 90 + 8) as u8),
            100..=109 => attrs.bg = Color::Indexed((code - 100 + 8) as u8),
            _ => tracing::warn!("Unknown SGR code '{}'", code),
        }
        i += 1;
    }
}

/// Decode `38;5;N` / `48;5;N` starting at the 38/48 code.
/// Returns the color (if valid) and the number of trailing codes consumed.
fn extended_color(codes: &[u16]) -> (Option<Color>, usize) {
    if codes.get(1) != Some(&5) {
        tracing::debug!("SGR {} without 256-color selector ignored", codes[0]);
        return (None, 0);
    }
    match codes.get(2) {
        Some(&index) => match u8::try_from(index) {
            Ok(index) => (Some(Color::Indexed(index)), 2),
            Err(_) => {
                tracing::warn!("SGR {};5 color index {} out of range", codes[0], index);
                (None, 2)
            }
        },
        None => {
            tracing::warn!("SGR {};5 missing color index", codes[0]);
            (None, 1)
        }
    }
}
