// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A plain addressable grid.
//!
//! Holds whatever a processing stage needs per pixel: an `f64` for the
//! energy map, or a running cost plus parent coordinate for the seam
//! search tables.

use std::ops::{Index, IndexMut};

/// A row-major two-dimensional field, addressed as `(row, column)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: usize,
    height: usize,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A `width` by `height` map with every cell at `P::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width * height],
        }
    }

    /// Wrap an existing row-major vector.  Returns `None` if the vector
    /// does not hold exactly `width * height` cells.
    pub fn from_vec(width: usize, height: usize, data: Vec<P>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, in row-major order.
    pub fn values(&self) -> &[P] {
        &self.data
    }

    // Keep the index math in exactly one place.
    fn get_index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.height && column < self.width,
            "({}, {}) is outside a {}x{} map",
            row,
            column,
            self.width,
            self.height
        );
        row * self.width + column
    }
}

impl<P: Default + Copy> Index<(usize, usize)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (row, column): (usize, usize)) -> &P {
        let index = self.get_index(row, column);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(usize, usize)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut P {
        let index = self.get_index(row, column);
        &mut self.data[index]
    }
}

/// One cell of a seam search table: the cheapest cost of any path
/// ending here, and the perpendicular coordinate of the cell it came
/// from.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub(crate) struct EnergyAndBackPointer<P: Default + Copy> {
    pub energy: P,
    pub parent: usize,
}
