// Copyright 2025 the UI Presets Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-major mapping from a flat item index onto menu grid cells.
//!
//! Menus fill each column top to bottom before starting the next one, so a
//! column plays the role of a *track* holding `rows` cells:
//!
//! - column of item `i` is `i / rows`;
//! - row of item `i` is `i % rows`;
//! - the number of columns is `ceil(len / rows)`, and the last column may be partial.

use core::num::NonZeroUsize;

use kurbo::{Point, Rect, Size};

/// Maps item indices onto a column-major grid with a fixed number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuGrid {
    rows: NonZeroUsize,
    len: usize,
}

impl MenuGrid {
    /// Creates a grid of `len` items with `rows` cells per column.
    #[must_use]
    pub const fn new(rows: NonZeroUsize, len: usize) -> Self {
        Self { rows, len }
    }

    /// Returns the number of rows (cells per column).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Returns the number of items in the grid.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the grid holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the column holding item `index`.
    #[must_use]
    pub const fn column_of(&self, index: usize) -> usize {
        index / self.rows.get()
    }

    /// Returns the row of item `index` within its column.
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        index % self.rows.get()
    }

    /// Returns the number of columns needed for all items.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.len.div_ceil(self.rows.get())
    }

    /// Container-local rectangle of item `index` for cells of size `cell`.
    ///
    /// Indices past [`MenuGrid::len`] are not clamped; callers iterate `0..len`.
    pub fn cell_rect(&self, index: usize, cell: Size) -> Rect {
        let origin = Point::new(
            self.column_of(index) as f64 * cell.width,
            self.row_of(index) as f64 * cell.height,
        );
        Rect::from_origin_size(origin, cell)
    }
}
