// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Getting images in and out
//!
//! Decoding and encoding go through the `image` crate, so anything it
//! can read can be carved.  Everything is converted to eight-bit RGB on
//! the way in.

use crate::energy::EnergyMap;
use crate::error::{CarveError, Result};
use crate::pixelbuffer::PixelBuffer;
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use itertools::iproduct;
use log::debug;
use num_traits::NumCast;
use std::path::Path;

/// Decode the image at `path` into a fresh buffer.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|err| CarveError::Decode {
        path: path.display().to_string(),
        err,
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("decoded {} as {}x{}", path.display(), width, height);
    PixelBuffer::new(width as usize, height as usize, rgb.into_raw())
}

/// Copy the logical extent of a buffer into an `image` RGB image.
pub fn to_rgb_image(image: &PixelBuffer) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width as u32, height as u32);
    for (row, column) in iproduct!(0..height, 0..width) {
        out.put_pixel(column as u32, row as u32, Rgb(image.get_pixel(row, column)));
    }
    out
}

/// Encode the buffer to `path`; the format follows the extension.
pub fn save_image<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    to_rgb_image(image)
        .save(path)
        .map_err(|err| CarveError::Encode {
            path: path.display().to_string(),
            err,
        })?;
    debug!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Render an energy map as greyscale, scaled so the most energetic
/// pixel is white.  A map with no energy at all comes out black.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let (width, height) = (energy.width(), energy.height());
    let factor = energy.values().iter().cloned().fold(0.0, f64::max);
    let mut out: GrayImage = ImageBuffer::new(width as u32, height as u32);
    if factor <= 0.0 {
        return out;
    }
    for (y, x) in iproduct!(0..height, 0..width) {
        let scaled = (energy[(y, x)] * 255.0 / factor).round();
        let level: u8 = NumCast::from(scaled).unwrap_or(u8::MAX);
        out.put_pixel(x as u32, y as u32, Luma([level]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round.png");
        let data: Vec<u8> = (0..24).map(|v| v * 10).collect();
        let image = PixelBuffer::new(4, 2, data.clone()).unwrap();
        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert_eq!(loaded.to_packed(), data);
    }

    #[test]
    fn only_the_logical_extent_is_encoded() {
        let mut image = PixelBuffer::new(3, 2, (0..18).collect()).unwrap();
        image.shift_row_left(0, 1);
        image.shift_row_left(1, 1);
        image.shrink_width();
        let rgb = to_rgb_image(&image);
        assert_eq!(rgb.dimensions(), (2, 2));
        assert_eq!(rgb.into_raw(), vec![3, 4, 5, 6, 7, 8, 12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempdir().unwrap();
        match load_image(dir.path().join("nope.png")) {
            Err(CarveError::Decode { path, .. }) => assert!(path.ends_with("nope.png")),
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[test]
    fn energy_is_scaled_to_full_range() {
        let energy = EnergyMap::from_vec(3, 1, vec![0.0, 50.0, 100.0]).unwrap();
        let img = energy_to_image(&energy);
        assert_eq!(img.into_raw(), vec![0, 128, 255]);
    }

    #[test]
    fn flat_energy_is_black() {
        let energy = EnergyMap::from_vec(2, 2, vec![0.0; 4]).unwrap();
        assert!(energy_to_image(&energy).into_raw().iter().all(|v| *v == 0));
    }
}
