//! Graphic attributes
//!
//! The color and style state attached to every written cell. A snapshot is a
//! plain value; cells share one snapshot through an `Arc` until the current
//! attributes change again.

use serde::{Deserialize, Serialize};

/// Color representation: the terminal default or a 256-color palette index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// Palette index (0-15 ANSI, 16-231 color cube, 232-255 grayscale)
    Indexed(u8),
}

impl Color {
    /// Standard ANSI colors (0-7)
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);
}

impl From<Option<u8>> for Color {
    fn from(index: Option<u8>) -> Self {
        index.map_or(Color::Default, Color::Indexed)
    }
}

/// A single boolean attribute, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeFlag {
    Bold,
    Italic,
    Underline,
    Blink,
    Inverse,
    /// Remap written characters through the DEC line-drawing table
    Graphics,
    DoubleTop,
    DoubleBottom,
    DoubleWidth,
}

/// Snapshot of the graphic rendition applied to written cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphicAttributes {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub inverse: bool,
    pub graphics: bool,
    pub double_top: bool,
    pub double_bottom: bool,
    pub double_width: bool,
}

impl GraphicAttributes {
    /// Default attributes with explicit default colors
    pub fn with_colors(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            ..Default::default()
        }
    }

    /// Set a flag
    pub fn set_flag(&mut self, flag: AttributeFlag, value: bool) {
        let slot = match flag {
            AttributeFlag::Bold => &mut self.bold,
            AttributeFlag::Italic => &mut self.italic,
            AttributeFlag::Underline => &mut self.underline,
            AttributeFlag::Blink => &mut self.blink,
            AttributeFlag::Inverse => &mut self.inverse,
            AttributeFlag::Graphics => &mut self.graphics,
            AttributeFlag::DoubleTop => &mut self.double_top,
            AttributeFlag::DoubleBottom => &mut self.double_bottom,
            AttributeFlag::DoubleWidth => &mut self.double_width,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_default() {
        let attrs = GraphicAttributes::default();
        assert_eq!(attrs.fg, Color::Default);
        assert_eq!(attrs.bg, Color::Default);
        assert!(!attrs.bold);
        assert!(!attrs.graphics);
    }

    #[test]
    fn test_flag_access() {
        let mut attrs = GraphicAttributes::default();
        attrs.set_flag(AttributeFlag::Underline, true);
        attrs.set_flag(AttributeFlag::DoubleWidth, true);

        assert!(attrs.underline);
        assert!(attrs.double_width);
        assert!(!attrs.italic);
    }

    #[test]
    fn test_color_from_option() {
        assert_eq!(Color::from(None), Color::Default);
        assert_eq!(Color::from(Some(9)), Color::Indexed(9));
    }

    #[test]
    fn test_value_equality() {
        let a = GraphicAttributes::with_colors(Color::GREEN, Color::Default);
        let mut b = GraphicAttributes::default();
        b.fg = Color::GREEN;
        assert_eq!(a, b);
    }
}
