//! Terminal Cell
//!
//! A single written position in the grid: the displayed character plus a
//! shared reference to the attribute snapshot it was written with.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::attributes::GraphicAttributes;

/// A single cell in the terminal grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The displayed character (already remapped for line drawing)
    pub ch: char,
    /// Attribute snapshot, shared with neighbouring cells written alike
    pub attrs: Arc<GraphicAttributes>,
}

impl Cell {
    /// Create a cell with the given character and attributes
    pub fn new(ch: char, attrs: Arc<GraphicAttributes>) -> Self {
        Self { ch, attrs }
    }

    /// A space carrying the given attributes
    pub fn blank(attrs: Arc<GraphicAttributes>) -> Self {
        Self::new(' ', attrs)
    }

    /// The attributes this cell was written with
    pub fn attributes(&self) -> &GraphicAttributes {
        &self.attrs
    }

    /// Whether two cells reference the same snapshot allocation
    pub fn shares_attributes_with(&self, other: &Cell) -> bool {
        Arc::ptr_eq(&self.attrs, &other.attrs)
    }
}
