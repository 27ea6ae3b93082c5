// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Seam removal, and the driver that alternates between finding and
//! removing seams until the image reaches its target size.  All width
//! reduction happens first, then all height reduction.

use crate::observer::SeamObserver;
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::{DualGradient, Orientation, Seam, SeamFinder};
use log::{debug, info, warn};

/// Delete a vertical seam: in every row, the pixels right of the seam
/// slide one column left.  The image loses one column.
pub fn remove_vertical_seam(image: &mut PixelBuffer, seam: Seam) {
    assert_eq!(seam.orientation(), Orientation::Vertical);
    let width = image.width();
    for (y, &x) in seam.path().iter().enumerate().take(image.height()) {
        if x >= width {
            warn!("vertical seam column {} at row {} is off the image", x, y);
            continue;
        }
        image.shift_row_left(y, x + 1);
    }
    image.shrink_width();
}

/// Delete a horizontal seam: in every column, the pixels below the
/// seam slide one row up.  The image loses one row.
pub fn remove_horizontal_seam(image: &mut PixelBuffer, seam: Seam) {
    assert_eq!(seam.orientation(), Orientation::Horizontal);
    let height = image.height();
    for (x, &y) in seam.path().iter().enumerate().take(image.width()) {
        if y >= height {
            warn!("horizontal seam row {} at column {} is off the image", y, x);
            continue;
        }
        image.shift_column_up(x, y + 1);
    }
    image.shrink_height();
}

/// Where the carver is in its run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Carve {
    Width,
    Height,
    Done,
}

impl Carve {
    fn next(self) -> Self {
        match self {
            Carve::Width => Carve::Height,
            Carve::Height | Carve::Done => Carve::Done,
        }
    }
}

/// Owns an image and carves it down to a target size.
pub struct SeamCarver<F: SeamFinder = DualGradient> {
    image: PixelBuffer,
    finder: F,
    target_width: usize,
    target_height: usize,
    phase: Carve,
}

impl SeamCarver<DualGradient> {
    /// Carve `image` toward `width` x `height` using dual-gradient
    /// energy.  Targets larger than the image are clamped to it.
    pub fn new(image: PixelBuffer, width: usize, height: usize) -> Self {
        SeamCarver::with_finder(image, width, height, DualGradient)
    }
}

impl<F: SeamFinder> SeamCarver<F> {
    pub fn with_finder(image: PixelBuffer, width: usize, height: usize, finder: F) -> Self {
        let (target_width, target_height) = (width.min(image.width()), height.min(image.height()));
        SeamCarver {
            image,
            finder,
            target_width,
            target_height,
            phase: Carve::Width,
        }
    }

    /// The dimensions the carver is working toward, after clamping.
    pub fn target(&self) -> (usize, usize) {
        (self.target_width, self.target_height)
    }

    pub fn phase(&self) -> Carve {
        self.phase
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    // A dimension is still carvable while it is above target and at
    // least two pixels; a seam is never taken from a one-pixel strip.
    fn wants(&self, phase: Carve) -> bool {
        match phase {
            Carve::Width => self.image.width() > self.target_width && self.image.width() >= 2,
            Carve::Height => self.image.height() > self.target_height && self.image.height() >= 2,
            Carve::Done => false,
        }
    }

    /// Find and remove one seam, moving to the next phase when the
    /// current one is finished.  Returns false once there is nothing
    /// left to carve.
    pub fn step(&mut self, observer: &mut dyn SeamObserver) -> bool {
        while self.phase != Carve::Done && !self.wants(self.phase) {
            self.phase = self.phase.next();
            info!(
                "carving phase {:?} at {}x{}",
                self.phase,
                self.image.width(),
                self.image.height()
            );
        }

        match self.phase {
            Carve::Width => {
                let seam = self.finder.find_vertical_seam(&self.image);
                debug!("vertical seam, cost {}", seam.cost());
                observer.observe(&self.image, &seam);
                remove_vertical_seam(&mut self.image, seam);
            }
            Carve::Height => {
                let seam = self.finder.find_horizontal_seam(&self.image);
                debug!("horizontal seam, cost {}", seam.cost());
                observer.observe(&self.image, &seam);
                remove_horizontal_seam(&mut self.image, seam);
            }
            Carve::Done => return false,
        }
        true
    }

    /// Run to completion and hand the image back.
    pub fn carve(mut self, observer: &mut dyn SeamObserver) -> PixelBuffer {
        let (width, height) = self.image.dimensions();
        info!(
            "carving {}x{} down to {}x{}",
            width, height, self.target_width, self.target_height
        );
        let mut seams = 0;
        while self.step(observer) {
            seams += 1;
        }
        info!(
            "removed {} seams, image is now {}x{}",
            seams,
            self.image.width(),
            self.image.height()
        );
        self.image
    }
}
