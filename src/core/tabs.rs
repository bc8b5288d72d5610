//! Tab stops
//!
//! Explicit stops are kept sorted. Beyond the highest explicit stop an
//! implicit stop exists every 8 columns.

use serde::{Deserialize, Serialize};

/// Which stops a clear operation removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabClear {
    /// The nearest explicit stop left of the cursor
    Current,
    /// Every explicit stop
    All,
}

const IMPLICIT_INTERVAL: usize = 8;

/// Sorted set of explicit tab stop columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStops {
    stops: Vec<usize>,
}

impl TabStops {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit stops, ascending
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Add a stop, keeping the set sorted
    pub fn set(&mut self, col: usize) {
        if let Err(pos) = self.stops.binary_search(&col) {
            self.stops.insert(pos, col);
        }
    }

    /// Remove stops according to `scope`, relative to the cursor column
    pub fn clear(&mut self, scope: TabClear, col: usize) {
        match scope {
            TabClear::Current => {
                if let Some(pos) = self.stops.iter().rposition(|&stop| stop < col) {
                    self.stops.remove(pos);
                }
            }
            TabClear::All => self.stops.clear(),
        }
    }

    /// Check whether `col` is an explicit or implicit stop
    pub fn is_stop(&self, col: usize) -> bool {
        let highest = self.stops.last().copied().unwrap_or(0);
        self.stops.binary_search(&col).is_ok() || (col > highest && col % IMPLICIT_INTERVAL == 0)
    }

    /// Column reached by crossing `n` stops from `col` (forward when positive).
    /// Stepping halts early at column 0 or `width - 1`.
    pub fn step(&self, col: usize, n: isize, width: usize) -> usize {
        let last = width.saturating_sub(1);
        let mut remaining = n.unsigned_abs();
        let mut x = col;

        while remaining != 0 {
            if n > 0 {
                if x >= last {
                    break;
                }
                x += 1;
            } else {
                if x == 0 {
                    break;
                }
                x -= 1;
            }
            if self.is_stop(x) {
                remaining -= 1;
            }
        }

        x
    }
}
