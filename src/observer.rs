// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Watching the carver work
//!
//! An observer is shown the image and the seam about to be removed
//! from it, once per carve.  It only ever gets a shared borrow, and
//! nothing it does can stop or alter the carve.

use crate::error::{CarveError, Result};
use crate::imageio::to_rgb_image;
use crate::pixelbuffer::PixelBuffer;
use crate::seamfinder::{Orientation, Seam};
use image::{Rgb, RgbImage};
use log::{trace, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// The colour seams are painted in.
pub const SEAM_COLOUR: Rgb<u8> = Rgb([255, 0, 0]);

pub trait SeamObserver {
    fn observe(&mut self, image: &PixelBuffer, seam: &Seam);
}

/// Watches nothing.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullObserver;

impl SeamObserver for NullObserver {
    fn observe(&mut self, _image: &PixelBuffer, _seam: &Seam) {}
}

impl<F> SeamObserver for F
where
    F: FnMut(&PixelBuffer, &Seam),
{
    fn observe(&mut self, image: &PixelBuffer, seam: &Seam) {
        self(image, seam)
    }
}

/// Render the image with the seam painted over it.  The seam is drawn
/// three pixels thick (the seam plus its neighbours across it) so it
/// shows up at normal viewing sizes.  Seam entries outside the image
/// are ignored.
pub fn overlay_seam(image: &PixelBuffer, seam: &Seam) -> RgbImage {
    let mut out = to_rgb_image(image);
    let (width, height) = (out.width(), out.height());

    for (along, &across) in seam.path().iter().enumerate() {
        let (along, across) = (along as u32, across as u32);
        let (x, y, limit) = match seam.orientation() {
            Orientation::Vertical => (across, along, width),
            Orientation::Horizontal => (along, across, height),
        };
        if x >= width || y >= height {
            continue;
        }
        let mut paint = |offset: i64| {
            let at = i64::from(across) + offset;
            if at < 0 || at >= i64::from(limit) {
                return;
            }
            let at = at as u32;
            match seam.orientation() {
                Orientation::Vertical => out.put_pixel(at, y, SEAM_COLOUR),
                Orientation::Horizontal => out.put_pixel(x, at, SEAM_COLOUR),
            }
        };
        paint(-1);
        paint(0);
        paint(1);
    }
    out
}

/// Writes every seam, painted over the image it was found in, to a
/// numbered PNG in a directory.
pub struct FrameWriter {
    directory: PathBuf,
    frame: usize,
}

impl FrameWriter {
    /// Creates the directory if needed.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory).map_err(|err| CarveError::FrameDirectory {
            path: directory.display().to_string(),
            err,
        })?;
        Ok(FrameWriter {
            directory,
            frame: 0,
        })
    }

    /// How many frames have been attempted so far.
    pub fn frames(&self) -> usize {
        self.frame
    }

    fn frame_path(&self) -> PathBuf {
        self.directory.join(format!("frame_{:05}.png", self.frame))
    }
}

impl SeamObserver for FrameWriter {
    fn observe(&mut self, image: &PixelBuffer, seam: &Seam) {
        let path = self.frame_path();
        self.frame += 1;
        match overlay_seam(image, seam).save(&path) {
            Ok(()) => trace!("wrote {}", path.display()),
            Err(err) => warn!("could not write frame {}: {}", path.display(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn grey(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::new(width, height, vec![50; width * height * 3]).unwrap()
    }

    fn red_positions(img: &RgbImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| **p == SEAM_COLOUR)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn vertical_overlay_paints_seam_and_side_neighbours() {
        let image = grey(4, 2);
        let seam = Seam::new(Orientation::Vertical, vec![0, 2], 0.0);
        let out = overlay_seam(&image, &seam);
        assert_eq!(red_positions(&out), vec![(0, 0), (1, 0), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn horizontal_overlay_paints_seam_and_neighbours_above_and_below() {
        let image = grey(2, 4);
        let seam = Seam::new(Orientation::Horizontal, vec![3, 1], 0.0);
        let out = overlay_seam(&image, &seam);
        assert_eq!(red_positions(&out), vec![(1, 0), (1, 1), (0, 2), (1, 2), (0, 3)]);
    }

    #[test]
    fn overlay_skips_out_of_range_entries_and_leaves_source_alone() {
        let image = grey(3, 2);
        let seam = Seam::new(Orientation::Vertical, vec![9, 1], 0.0);
        let out = overlay_seam(&image, &seam);
        assert_eq!(red_positions(&out), vec![(0, 1), (1, 1), (2, 1)]);
        assert!(image.to_packed().iter().all(|c| *c == 50));
    }

    #[test]
    fn frame_writer_numbers_its_frames() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("frames");
        let mut writer = FrameWriter::new(&frames).unwrap();
        let image = grey(3, 3);
        writer.observe(&image, &Seam::new(Orientation::Vertical, vec![1, 1, 1], 0.0));
        writer.observe(&image, &Seam::new(Orientation::Horizontal, vec![0, 1, 2], 0.0));
        assert_eq!(writer.frames(), 2);
        assert!(frames.join("frame_00000.png").is_file());
        assert!(frames.join("frame_00001.png").is_file());
    }

    #[test]
    fn frame_writer_failures_do_not_escape() {
        let dir = tempdir().unwrap();
        let mut writer = FrameWriter::new(dir.path()).unwrap();
        // Remove the directory out from under the writer.
        let path = dir.path().to_path_buf();
        dir.close().unwrap();
        writer.observe(&grey(2, 2), &Seam::new(Orientation::Vertical, vec![0, 0], 0.0));
        assert_eq!(writer.frames(), 1);
        assert!(!path.exists());
    }
}
