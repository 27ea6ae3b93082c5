// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.

use failure::Fail;

#[derive(Debug, Fail)]
pub enum CarveError {
    /// The source image could not be opened or decoded.
    #[fail(display = "could not decode image '{}': {}", path, err)]
    Decode {
        path: String,
        #[cause]
        err: image::ImageError,
    },

    /// The result could not be encoded or written.
    #[fail(display = "could not write image '{}': {}", path, err)]
    Encode {
        path: String,
        #[cause]
        err: image::ImageError,
    },

    #[fail(
        display = "pixel data holds {} bytes, a {}x{} RGB image needs {}",
        len, width, height, expected
    )]
    BufferSize {
        len: usize,
        expected: usize,
        width: usize,
        height: usize,
    },

    #[fail(display = "a {}x{} image has no pixels to carve", width, height)]
    EmptyImage { width: usize, height: usize },

    #[fail(display = "could not create frame directory '{}': {}", path, err)]
    FrameDirectory {
        path: String,
        #[cause]
        err: std::io::Error,
    },

    #[fail(display = "could not configure logging: {}", _0)]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CarveError>;
