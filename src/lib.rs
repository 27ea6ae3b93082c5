// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image shrinking by seam carving.
//!
//! Repeatedly finds the connected path of least dual-gradient energy
//! through an image and removes it, first narrowing the image to its
//! target width and then shortening it to its target height.

pub mod error;
pub use error::{CarveError, Result};

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;

pub mod pixelbuffer;
pub use pixelbuffer::{PixelBuffer, CHANNELS};

pub mod energy;
pub use energy::{calculate_energy, wrap, EnergyMap};

pub mod seamfinder;
pub use seamfinder::{
    energy_to_horizontal_seam, energy_to_vertical_seam, DualGradient, Orientation, Seam,
    SeamFinder,
};

pub mod seamcarver;
pub use seamcarver::{remove_horizontal_seam, remove_vertical_seam, Carve, SeamCarver};

pub mod observer;
pub use observer::{FrameWriter, NullObserver, SeamObserver};

pub mod imageio;
pub use imageio::{energy_to_image, load_image, save_image};

pub mod logger;
