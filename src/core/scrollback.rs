//! Scrollback buffer implementation
//!
//! The scrollback buffer stores lines evicted off the top of the visible
//! screen, oldest first. It grows without bound unless a capacity is set,
//! in which case the oldest lines are dropped first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::line::Line;

/// History of evicted lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scrollback {
    /// The lines, oldest at the front
    lines: VecDeque<Line>,
    /// Maximum number of lines to keep (`None` = unbounded)
    capacity: Option<usize>,
}

impl Scrollback {
    /// Create an unbounded scrollback buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of lines in the scrollback
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the scrollback is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Push a line into the scrollback buffer
    pub fn push(&mut self, line: Line) {
        if self.capacity == Some(0) {
            return;
        }
        self.lines.push_back(line);
        self.enforce_capacity();
    }

    /// Get a line by index (0 = oldest line in scrollback)
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Remove and return every line, oldest first
    pub fn take(&mut self) -> Vec<Line> {
        self.lines.drain(..).collect()
    }

    /// Iterate over all lines from oldest to newest
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Line> + '_ {
        self.lines.iter()
    }

    /// Set a new capacity, dropping the oldest lines if shrinking
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        if let Some(capacity) = self.capacity {
            while self.lines.len() > capacity {
                self.lines.pop_front();
            }
        }
    }
}
