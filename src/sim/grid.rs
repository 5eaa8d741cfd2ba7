//! Sparse storage for settled bubbles.
//!
//! A HashMap keyed by `Cell` keeps only occupied addresses, which handles
//! rows growing past the configured count (ceiling insertions) and the odd
//! below-row-one settle without any reindexing. A cell is present iff a
//! bubble occupies it.

use std::collections::HashMap;

use super::hex::Cell;
use super::state::{Bubble, ColorId};

#[derive(Debug, Clone, Default)]
pub struct GridStore {
    cells: HashMap<Cell, Bubble>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: Cell) -> Option<&Bubble> {
        self.cells.get(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Returns the previous occupant if the cell was already taken.
    pub fn insert(&mut self, cell: Cell, bubble: Bubble) -> Option<Bubble> {
        self.cells.insert(cell, bubble)
    }

    /// Removing an unoccupied cell is not an error; it just returns `None`.
    pub fn remove(&mut self, cell: Cell) -> Option<Bubble> {
        self.cells.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &Bubble)> {
        self.cells.iter()
    }

    /// All occupied addresses, in hash order; sort before anything
    /// order-sensitive.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.keys().copied()
    }

    /// Highest occupied row index (the ceiling-most row).
    pub fn max_row(&self) -> Option<i32> {
        self.cells.keys().map(|c| c.row).max()
    }

    pub fn min_row(&self) -> Option<i32> {
        self.cells.keys().map(|c| c.row).min()
    }

    /// Vertical extent in rows: max row - min row + 1, or 0 when empty.
    pub fn height_span(&self) -> i32 {
        match (self.min_row(), self.max_row()) {
            (Some(min), Some(max)) => max - min + 1,
            _ => 0,
        }
    }

    /// Distinct colors currently on the board, sorted so random draws
    /// biased by this list stay deterministic.
    pub fn colors_present(&self) -> Vec<ColorId> {
        let mut colors: Vec<ColorId> = self.cells.values().map(|b| b.color).collect();
        colors.sort();
        colors.dedup();
        colors
    }
}
