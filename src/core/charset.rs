//! DEC Special Graphics translation
//!
//! Characters written while the `graphics` attribute is set are mapped
//! through the VT100 line-drawing table.

/// Translate a character through the DEC Special Graphics set.
/// Characters outside 0x60-0x7E pass through unchanged.
pub fn translate_graphics(c: char) -> char {
    match c {
        '`' => '◆', // Diamond
        'a' => '▒', // Checkerboard
        'b' => '␉', // HT symbol
        'c' => '␌', // FF symbol
        'd' => '␍', // CR symbol
        'e' => '␊', // LF symbol
        'f' => '°',
        'g' => '±',
        'h' => '␤', // NL symbol
        'i' => '␋', // VT symbol
        'j' => '┘',
        'k' => '┐',
        'l' => '┌',
        'm' => '└',
        'n' => '┼',
        'o' => '⎺', // Scan line 1
        'p' => '⎻', // Scan line 3
        'q' => '─', // Scan line 5
        'r' => '⎼', // Scan line 7
        's' => '⎽', // Scan line 9
        't' => '├',
        'u' => '┤',
        'v' => '┴',
        'w' => '┬',
        'x' => '│',
        'y' => '≤',
        'z' => '≥',
        '{' => 'π',
        '|' => '≠',
        '}' => '£',
        '~' => '·',
        _ => c,
    }
}
