//! Cursor position
//!
//! The column may equal the buffer width: that is the pending-wrap position
//! reached after writing the last column, resolved by the next write.

use serde::{Deserialize, Serialize};

/// Cursor position (0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column, in `0..=width`
    pub x: usize,
    /// Row, in `0..height`
    pub y: usize,
}

impl Cursor {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Check whether the cursor sits past the last column
    pub fn is_pending_wrap(&self, width: usize) -> bool {
        self.x >= width
    }
}

/// Clamp a signed coordinate into `0..=max`, reporting whether it was in range
pub(crate) fn clamp_axis(value: isize, max: usize) -> (usize, bool) {
    if value < 0 {
        (0, false)
    } else if value.unsigned_abs() > max {
        (max, false)
    } else {
        (value.unsigned_abs(), true)
    }
}
