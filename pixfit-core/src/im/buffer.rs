// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::slice::ChunksExact;

use image::{DynamicImage, RgbaImage};

use crate::constant::CHANNELS;
use crate::error::PixfitError;

/// A row-major container storing a decoded RGBA pixel grid.
///
/// Every pixel occupies four consecutive bytes in (R, G, B, A) order and rows
/// carry no padding, so the length of the container must always equal the
/// product of `w` * `h` * 4. Buffers are never mutated once built; every
/// transform in the pipeline reads a buffer and produces a new one.
///
/// # Examples
///
/// ```
/// use pixfit_core::im::PixelBuffer;
///
/// let width = 10;
/// let height = 10;
/// let data = vec![0u8; (width * height * 4) as usize];
///
/// let buffer = PixelBuffer::new(width, height, data);
///
/// assert_eq!(buffer.unwrap().len(), (width * height * 4) as usize);
/// ```
///
/// ```
/// use pixfit_core::im::PixelBuffer;
///
/// let data = vec![0u8; 10 * 10 * 3];
/// let buffer = PixelBuffer::new(10, 10, data);
///
/// assert!(buffer.is_err()); // RGB data is not a valid RGBA buffer
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    w: u32,         // Width
    h: u32,         // Height
    data: Vec<u8>,  // RGBA subpixels
}

impl PixelBuffer {
    /// Initializes a buffer from raw RGBA subpixels
    ///
    /// # Arguments
    ///
    /// * `width` - Image width
    /// * `height` - Image height
    /// * `data` - Interleaved RGBA bytes of length `width * height * 4`
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<PixelBuffer, PixfitError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS as usize))
            .ok_or(PixfitError::BufferSizeError)?;

        if expected == data.len() {
            Ok(PixelBuffer {
                w: width,
                h: height,
                data,
            })
        } else {
            Err(PixfitError::BufferSizeError)
        }
    }

    /// Builds a buffer whose length was derived from its dimensions by the caller
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> PixelBuffer {
        debug_assert_eq!(data.len(), width as usize * height as usize * CHANNELS as usize);
        PixelBuffer {
            w: width,
            h: height,
            data,
        }
    }

    /// Initializes a buffer where every pixel holds the same RGBA value
    ///
    /// # Arguments
    ///
    /// * `width` - Image width
    /// * `height` - Image height
    /// * `rgba` - Pixel value
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * CHANNELS as usize);

        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }

        PixelBuffer {
            w: width,
            h: height,
            data,
        }
    }

    /// Initialize a buffer from any decoded image-rs image
    ///
    /// # Arguments
    ///
    /// * `image` - A DynamicImage of any color type, converted to RGBA8
    pub fn from_dynamic(image: DynamicImage) -> PixelBuffer {
        let rgba = image.into_rgba8();

        PixelBuffer {
            w: rgba.width(),
            h: rgba.height(),
            data: rgba.into_raw(),
        }
    }
}

// >>> PROPERTY METHODS

impl PixelBuffer {
    /// Width of the image
    pub fn width(&self) -> u32 {
        self.w
    }

    /// Height of the image
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Length of the raw image
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// <<< PROPERTY METHODS

// >>> CONVERSION METHODS

impl PixelBuffer {
    /// Returns a reference to the raw image
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// RGBA value of the pixel at column `x` and row `y`
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.w as usize + x as usize) * CHANNELS as usize;
        &self.data[start..start + CHANNELS as usize]
    }

    // An iterator over pixel-level chunks of the raw buffer
    pub fn iter_pixels(&self) -> ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS as usize)
    }

    /// Convert into an image-rs RGBA image for encoding
    pub fn into_rgba_image(self) -> Result<RgbaImage, PixfitError> {
        RgbaImage::from_raw(self.w, self.h, self.data).ok_or(PixfitError::BufferSizeError)
    }
}

// <<< CONVERSION METHODS
