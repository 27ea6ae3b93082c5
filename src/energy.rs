// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the dual gradient across its immediate
//! neighbours: the squared RGB distance between the pixels to its left
//! and right, plus the squared RGB distance between the pixels above
//! and below it.  There is no special border case; the image is treated
//! as a torus, so the left neighbour of column 0 is the last column and
//! the pixel above row 0 is the last row.
//!
//! ```text
//!        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//!        |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//!       e(x,y) = |Δx|²+|Δy|²
//! ```

use crate::pixelbuffer::PixelBuffer;
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;
use num_traits::pow;

/// Per-pixel energy, recomputed from scratch after every carve.
pub type EnergyMap = TwoDimensionalMap<f64>;

/// Toroidal indexing: map any offset coordinate back into `0..len`, so
/// that `-1` is the last index and `len` is the first.
pub fn wrap(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}

// Sum of squared channel differences between two pixels.  Widened
// before subtracting; u8 differences would wrap.
fn energy_of_pair(p1: &[u8], p2: &[u8]) -> i64 {
    p1.iter()
        .zip(p2.iter())
        .map(|(c1, c2)| pow(i64::from(*c1) - i64::from(*c2), 2))
        .sum()
}

/// Compute the energy of every pixel in the logical extent of an
/// image.
pub fn calculate_energy(image: &PixelBuffer) -> EnergyMap {
    let (width, height) = image.dimensions();
    let mut emap = EnergyMap::new(width, height);

    for (row, column) in iproduct!(0..height, 0..width) {
        let (r, c) = (row as isize, column as isize);
        let (left, right) = (wrap(c - 1, width), wrap(c + 1, width));
        let (upper, lower) = (wrap(r - 1, height), wrap(r + 1, height));

        let dx2 = energy_of_pair(&image[(row, right)], &image[(row, left)]);
        let dy2 = energy_of_pair(&image[(lower, column)], &image[(upper, column)]);
        emap[(row, column)] = (dx2 + dy2) as f64;
    }
    emap
}
