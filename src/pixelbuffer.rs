// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The carvable image.
//!
//! A three-channel, eight-bit image stored row-major in a single
//! allocation.  Carving never reallocates: removing a seam shifts
//! pixels within the existing rows and then shrinks the logical width
//! or height, so the row stride stays at the original width for the
//! lifetime of the buffer.  Bytes beyond the logical extent are stale
//! and never read.

use crate::error::{CarveError, Result};
use std::ops::{Index, IndexMut};

/// Channels per pixel.
pub const CHANNELS: usize = 3;

#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Take ownership of `width * height` pixels of packed channel
    /// triplets.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyImage { width, height });
        }
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(CarveError::BufferSize {
                len: data.len(),
                expected,
                width,
                height,
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            stride: width,
            data,
        })
    }

    /// Current logical width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Current logical height.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row stride in pixels, fixed at the width the buffer was built
    /// with.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The full backing store, including stale bytes past the logical
    /// extent.
    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    // All of the index math lives here.
    fn get_index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.height && column < self.width,
            "pixel ({}, {}) is outside the {}x{} image",
            row,
            column,
            self.width,
            self.height
        );
        (row * self.stride + column) * CHANNELS
    }

    /// A copy of the pixel at `(row, column)`.
    pub fn get_pixel(&self, row: usize, column: usize) -> [u8; CHANNELS] {
        let index = self.get_index(row, column);
        let mut pixel = [0; CHANNELS];
        pixel.copy_from_slice(&self.data[index..index + CHANNELS]);
        pixel
    }

    pub fn put_pixel(&mut self, row: usize, column: usize, pixel: [u8; CHANNELS]) {
        let index = self.get_index(row, column);
        self.data[index..index + CHANNELS].copy_from_slice(&pixel);
    }

    /// A single channel intensity.
    pub fn channel(&self, row: usize, column: usize, channel: usize) -> u8 {
        assert!(channel < CHANNELS, "channel {} out of range", channel);
        self.data[self.get_index(row, column) + channel]
    }

    /// Copy the logical image out into a tightly packed vector.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.width * self.height * CHANNELS);
        for row in 0..self.height {
            let start = self.get_index(row, 0);
            packed.extend_from_slice(&self.data[start..start + self.width * CHANNELS]);
        }
        packed
    }

    /// Within one row, copy columns `from..width` one place to the
    /// left, overwriting column `from - 1`.
    pub(crate) fn shift_row_left(&mut self, row: usize, from: usize) {
        assert!(from > 0, "nothing to the left of column 0");
        if from >= self.width {
            return;
        }
        let start = self.get_index(row, from);
        let end = self.get_index(row, self.width - 1) + CHANNELS;
        self.data.copy_within(start..end, start - CHANNELS);
    }

    /// Within one column, move every pixel from `from` to the bottom of
    /// the image up by one row, overwriting row `from - 1`.
    pub(crate) fn shift_column_up(&mut self, column: usize, from: usize) {
        assert!(from > 0, "nothing above row 0");
        for row in from..self.height {
            let pixel = self.get_pixel(row, column);
            self.put_pixel(row - 1, column, pixel);
        }
    }

    pub(crate) fn shrink_width(&mut self) {
        assert!(self.width > 1, "cannot shrink a one-pixel-wide image");
        self.width -= 1;
    }

    pub(crate) fn shrink_height(&mut self) {
        assert!(self.height > 1, "cannot shrink a one-pixel-high image");
        self.height -= 1;
    }
}

impl Index<(usize, usize)> for PixelBuffer {
    type Output = [u8];

    /// The channels of the pixel at `(row, column)`.
    fn index(&self, (row, column): (usize, usize)) -> &[u8] {
        let index = self.get_index(row, column);
        &self.data[index..index + CHANNELS]
    }
}

impl IndexMut<(usize, usize)> for PixelBuffer {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut [u8] {
        let index = self.get_index(row, column);
        &mut self.data[index..index + CHANNELS]
    }
}
