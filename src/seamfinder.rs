// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map
//!
//! A seam is one pixel per row (vertical) or one pixel per column
//! (horizontal), each step moving at most one pixel sideways.  The
//! cheapest one is found by dynamic programming over the energy map,
//! keeping for every cell the cost of the best path ending there and
//! the coordinate it came from.
//!
//! When several predecessors cost the same, going straight wins, then
//! the lower-indexed neighbour, then the higher one.  A candidate only
//! displaces the current best if it is strictly cheaper.

use crate::energy::{calculate_energy, EnergyMap};
use crate::pixelbuffer::PixelBuffer;
use crate::twodmap::{EnergyAndBackPointer, TwoDimensionalMap};

type SeamTable = TwoDimensionalMap<EnergyAndBackPointer<f64>>;

/// Which way a seam runs through the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Top to bottom, one column per row; removing it narrows the
    /// image.
    Vertical,
    /// Left to right, one row per column; removing it shortens the
    /// image.
    Horizontal,
}

/// A path of pixels to be carved out of an image.
///
/// Not `Clone`: a seam belongs to one specific image and is consumed
/// by the removal that invalidates it.
#[derive(Debug, PartialEq)]
pub struct Seam {
    orientation: Orientation,
    path: Vec<usize>,
    cost: f64,
}

impl Seam {
    pub fn new(orientation: Orientation, path: Vec<usize>, cost: f64) -> Self {
        Seam {
            orientation,
            path,
            cost,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// For a vertical seam, the column at each row; for a horizontal
    /// seam, the row at each column.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Sum of the energies along the seam.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

// Replace `best` with the candidate cell if it is strictly cheaper.
fn prefer_cheaper(best: (f64, usize), candidate: (f64, usize)) -> (f64, usize) {
    if candidate.0 < best.0 {
        candidate
    } else {
        best
    }
}

// Position of the first strict minimum in a sequence of costs.
fn first_minimum<I: Iterator<Item = f64>>(costs: I) -> (usize, f64) {
    costs
        .enumerate()
        .fold((0, std::f64::INFINITY), |best, (i, cost)| {
            if cost < best.1 {
                (i, cost)
            } else {
                best
            }
        })
}

/// Given an energy map, return the vertical seam of least total
/// energy: for each row, top to bottom, the column to remove.
pub fn energy_to_vertical_seam(energy: &EnergyMap) -> Seam {
    let (width, height) = (energy.width(), energy.height());
    let mut target = SeamTable::new(width, height);

    // The first row is just its own energies.
    for x in 0..width {
        target[(0, x)].energy = energy[(0, x)];
    }

    // Every subsequent cell adds its energy to the cheapest of the
    // (up to) three cells above it.
    for y in 1..height {
        for x in 0..width {
            let mut best = (target[(y - 1, x)].energy, x);
            if x > 0 {
                best = prefer_cheaper(best, (target[(y - 1, x - 1)].energy, x - 1));
            }
            if x + 1 < width {
                best = prefer_cheaper(best, (target[(y - 1, x + 1)].energy, x + 1));
            }
            target[(y, x)] = EnergyAndBackPointer {
                energy: best.0 + energy[(y, x)],
                parent: best.1,
            };
        }
    }

    let (mut seam_col, cost) = first_minimum((0..width).map(|x| target[(height - 1, x)].energy));

    // Walk the back pointers from the bottom row up.
    let mut path = vec![0; height];
    for y in (0..height).rev() {
        path[y] = seam_col;
        seam_col = target[(y, seam_col)].parent;
    }
    Seam::new(Orientation::Vertical, path, cost)
}

/// Given an energy map, return the horizontal seam of least total
/// energy: for each column, left to right, the row to remove.
pub fn energy_to_horizontal_seam(energy: &EnergyMap) -> Seam {
    let (width, height) = (energy.width(), energy.height());
    let mut target = SeamTable::new(width, height);

    for y in 0..height {
        target[(y, 0)].energy = energy[(y, 0)];
    }

    for x in 1..width {
        for y in 0..height {
            let mut best = (target[(y, x - 1)].energy, y);
            if y > 0 {
                best = prefer_cheaper(best, (target[(y - 1, x - 1)].energy, y - 1));
            }
            if y + 1 < height {
                best = prefer_cheaper(best, (target[(y + 1, x - 1)].energy, y + 1));
            }
            target[(y, x)] = EnergyAndBackPointer {
                energy: best.0 + energy[(y, x)],
                parent: best.1,
            };
        }
    }

    let (mut seam_row, cost) = first_minimum((0..height).map(|y| target[(y, width - 1)].energy));

    let mut path = vec![0; width];
    for x in (0..width).rev() {
        path[x] = seam_row;
        seam_row = target[(seam_row, x)].parent;
    }
    Seam::new(Orientation::Horizontal, path, cost)
}

/// How the carver asks for seams.  Implementations see the current
/// image and nothing else; anything they compute is discarded once the
/// seam is handed back.
pub trait SeamFinder {
    /// Request a top-to-bottom seam.
    fn find_vertical_seam(&self, image: &PixelBuffer) -> Seam;

    /// Request a left-to-right seam.
    fn find_horizontal_seam(&self, image: &PixelBuffer) -> Seam;
}

/// Backward energy with the wrap-around dual-gradient cost.
#[derive(Debug, Default, Copy, Clone)]
pub struct DualGradient;

impl SeamFinder for DualGradient {
    fn find_vertical_seam(&self, image: &PixelBuffer) -> Seam {
        energy_to_vertical_seam(&calculate_energy(image))
    }

    fn find_horizontal_seam(&self, image: &PixelBuffer) -> Seam {
        energy_to_horizontal_seam(&calculate_energy(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_DATA: [f64; 20] = [
        9., 9., 0., 9., 9., 9., 1., 9., 8., 9., 9., 9., 9., 9., 0., 9., 9., 9., 0., 9.,
    ];

    fn grid(width: usize, height: usize, values: &[f64]) -> EnergyMap {
        EnergyMap::from_vec(width, height, values.to_vec()).unwrap()
    }

    // A small deterministic scramble so the adjacency checks see
    // irregular landscapes.
    fn noisy_grid(width: usize, height: usize, seed: u64) -> EnergyMap {
        let mut state = seed;
        let values: Vec<f64> = (0..width * height)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                ((state >> 33) % 50) as f64
            })
            .collect();
        grid(width, height, &values)
    }

    fn is_connected(path: &[usize]) -> bool {
        path.windows(2)
            .all(|w| (w[0] as isize - w[1] as isize).abs() <= 1)
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let seam = energy_to_vertical_seam(&grid(5, 4, &ENERGY_DATA));
        assert_eq!(seam.orientation(), Orientation::Vertical);
        assert_eq!(seam.path(), &[2, 3, 4, 3]);
        assert_eq!(seam.cost(), 8.0);
    }

    #[test]
    fn energy_grid_to_horizontal_seam() {
        let seam = energy_to_horizontal_seam(&grid(5, 4, &ENERGY_DATA));
        assert_eq!(seam.orientation(), Orientation::Horizontal);
        assert_eq!(seam.path(), &[1, 1, 0, 1, 2]);
        assert_eq!(seam.cost(), 18.0);
    }

    #[test]
    fn low_energy_column_is_followed_straight_down() {
        let seam = energy_to_vertical_seam(&grid(3, 3, &[9., 1., 9., 9., 1., 9., 9., 1., 9.]));
        assert_eq!(seam.path(), &[1, 1, 1]);
        assert_eq!(seam.cost(), 3.0);
    }

    #[test]
    fn vertical_ties_prefer_straight_over_left() {
        // Above (1, 1) the straight and left cells both cost 1.
        let seam = energy_to_vertical_seam(&grid(3, 2, &[1., 1., 5., 9., 0., 9.]));
        assert_eq!(seam.path(), &[1, 1]);
    }

    #[test]
    fn vertical_ties_prefer_left_over_right() {
        let seam = energy_to_vertical_seam(&grid(3, 2, &[1., 2., 1., 9., 0., 9.]));
        assert_eq!(seam.path(), &[0, 1]);
        assert_eq!(seam.cost(), 1.0);
    }

    #[test]
    fn horizontal_ties_prefer_straight_over_up() {
        // Column 0 is [1, 1, 5], column 1 is [9, 0, 9].
        let seam = energy_to_horizontal_seam(&grid(2, 3, &[1., 9., 1., 0., 5., 9.]));
        assert_eq!(seam.path(), &[1, 1]);
    }

    #[test]
    fn horizontal_ties_prefer_up_over_down() {
        // Column 0 is [1, 2, 1], column 1 is [9, 0, 9].
        let seam = energy_to_horizontal_seam(&grid(2, 3, &[1., 9., 2., 0., 1., 9.]));
        assert_eq!(seam.path(), &[0, 1]);
    }

    #[test]
    fn first_of_equal_endpoints_wins() {
        let flat = grid(4, 3, &[0.0; 12]);
        assert_eq!(energy_to_vertical_seam(&flat).path(), &[0, 0, 0]);
        assert_eq!(energy_to_horizontal_seam(&flat).path(), &[0, 0, 0, 0]);
    }

    #[test]
    fn vertical_seams_span_every_row_and_stay_connected() {
        for seed in 0..20 {
            let energy = noisy_grid(7, 11, seed);
            let seam = energy_to_vertical_seam(&energy);
            assert_eq!(seam.len(), 11);
            assert!(seam.path().iter().all(|x| *x < 7));
            assert!(is_connected(seam.path()), "seed {}: {:?}", seed, seam.path());
            let total: f64 = seam
                .path()
                .iter()
                .enumerate()
                .map(|(y, x)| energy[(y, *x)])
                .sum();
            assert_eq!(total, seam.cost());
        }
    }

    #[test]
    fn horizontal_seams_span_every_column_and_stay_connected() {
        for seed in 0..20 {
            let energy = noisy_grid(11, 7, seed);
            let seam = energy_to_horizontal_seam(&energy);
            assert_eq!(seam.len(), 11);
            assert!(seam.path().iter().all(|y| *y < 7));
            assert!(is_connected(seam.path()), "seed {}: {:?}", seed, seam.path());
            let total: f64 = seam
                .path()
                .iter()
                .enumerate()
                .map(|(x, y)| energy[(*y, x)])
                .sum();
            assert_eq!(total, seam.cost());
        }
    }

    #[test]
    fn degenerate_strips() {
        let column = grid(1, 4, &[3., 1., 4., 1.]);
        let seam = energy_to_vertical_seam(&column);
        assert_eq!(seam.path(), &[0, 0, 0, 0]);
        assert_eq!(seam.cost(), 9.0);

        let row = grid(4, 1, &[3., 1., 4., 1.]);
        assert_eq!(energy_to_vertical_seam(&row).path(), &[1]);
        assert_eq!(energy_to_horizontal_seam(&row).path(), &[0, 0, 0, 0]);
    }

    #[test]
    fn dual_gradient_finder_matches_the_free_functions() {
        let image = PixelBuffer::new(3, 2, (0..18).map(|v| v * 13).collect()).unwrap();
        let energy = calculate_energy(&image);
        assert_eq!(
            DualGradient.find_vertical_seam(&image),
            energy_to_vertical_seam(&energy)
        );
        assert_eq!(
            DualGradient.find_horizontal_seam(&image),
            energy_to_horizontal_seam(&energy)
        );
    }
}
