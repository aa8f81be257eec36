// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

use crate::constant::CHANNELS;
use crate::error::PixfitError;
use crate::im::PixelBuffer;

/// Halve both dimensions of a buffer using area averaging
///
/// The output is `floor(w / 2)` x `floor(h / 2)`, with each side kept at one
/// pixel minimum. Averaging is performed by the SIMD-accelerated
/// fast-image-resize crate with a box filter, which at an exact 2x ratio
/// blends each 2x2 source block into one destination pixel.
///
/// # Arguments
///
/// * `buffer` - Source RGBA buffer
///
/// # Examples
///
/// ```
/// use pixfit_core::im::PixelBuffer;
/// use pixfit_core::cv::transform::halve;
///
/// let buffer = PixelBuffer::filled(8, 6, [255, 0, 0, 255]);
/// let half = halve(&buffer).unwrap();
///
/// assert_eq!((half.width(), half.height()), (4, 3));
/// ```
pub fn halve(buffer: &PixelBuffer) -> Result<PixelBuffer, PixfitError> {
    let new_width = (buffer.width() / 2).max(1);
    let new_height = (buffer.height() / 2).max(1);

    let source = ImageRef::new(
        buffer.width(),
        buffer.height(),
        buffer.as_raw(),
        PixelType::U8x4,
    )
    .map_err(|_| PixfitError::SurfaceError("Source buffer could not be bound for halving."))?;

    let mut destination = Image::new(new_width, new_height, PixelType::U8x4);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));

    resizer
        .resize(&source, &mut destination, &options)
        .map_err(|_| PixfitError::SurfaceError("Half-scale surface could not be drawn."))?;

    PixelBuffer::new(new_width, new_height, destination.into_vec())
}

/// Repeatedly halve a buffer until its width is less than twice the target
///
/// Returns the reduced buffer together with the number of halvings applied.
/// Keeping the residual ratio below 2 bounds the cost of the bilinear pass
/// regardless of the source size.
///
/// # Arguments
///
/// * `buffer` - Source RGBA buffer
/// * `target_width` - Final output width (at least 1)
pub fn halve_until(
    buffer: PixelBuffer,
    target_width: u32,
) -> Result<(PixelBuffer, u32), PixfitError> {
    let target_width = target_width.max(1) as u64;
    let mut current = buffer;
    let mut halvings = 0;

    while current.width() as u64 >= 2 * target_width {
        current = halve(&current)?;
        halvings += 1;
    }

    Ok((current, halvings))
}

/// Output height of the bilinear pass for a buffer resized to `target_width`
///
/// The aspect ratio is taken from the buffer being resized (i.e. after any
/// halving), and the height is rounded half-up with a minimum of one row.
pub fn resampled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let ratio = width as f64 / height as f64;
    ((target_width as f64 / ratio).round() as u32).max(1)
}

/// Resize a buffer to an exact width using bilinear interpolation
///
/// Each destination pixel `(j, i)` maps back to the source coordinate
/// `(j / scale, i / scale)` with `scale = target_width / width`. The four
/// neighbouring samples are blended per channel by their fractional offsets,
/// and the result is rounded to the nearest integer. Neighbour indices are
/// clamped to the last column/row so the final row and column never read out
/// of bounds.
///
/// # Arguments
///
/// * `buffer` - Source RGBA buffer
/// * `target_width` - Width of the resized buffer
///
/// # Examples
///
/// ```
/// use pixfit_core::im::PixelBuffer;
/// use pixfit_core::cv::transform::resample_bilinear;
///
/// let buffer = PixelBuffer::filled(500, 500, [0, 128, 255, 255]);
/// let resized = resample_bilinear(&buffer, 400);
///
/// assert_eq!((resized.width(), resized.height()), (400, 400));
/// assert_eq!(resized.pixel(399, 399), &[0, 128, 255, 255]);
/// ```
pub fn resample_bilinear(buffer: &PixelBuffer, target_width: u32) -> PixelBuffer {
    let target_width = target_width.max(1);
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;

    if target_width as usize == width {
        return buffer.clone();
    }

    let new_width = target_width as usize;
    let new_height = resampled_height(buffer.width(), buffer.height(), target_width) as usize;
    let channels = CHANNELS as usize;

    let scale = target_width as f64 / width as f64;
    let source = buffer.as_raw();
    let mut result = vec![0u8; new_width * new_height * channels];

    for i in 0..new_height {
        let iyv = i as f64 / scale;
        let iy0 = (iyv.floor() as usize).min(height - 1);
        let iy1 = (iyv.ceil() as usize).min(height - 1);
        let dy = iyv - iy0 as f64;

        for j in 0..new_width {
            let ixv = j as f64 / scale;
            let ix0 = (ixv.floor() as usize).min(width - 1);
            let ix1 = (ixv.ceil() as usize).min(width - 1);
            let dx = ixv - ix0 as f64;

            let idx_d = (i * new_width + j) * channels;
            let idx_00 = (iy0 * width + ix0) * channels;
            let idx_10 = (iy0 * width + ix1) * channels;
            let idx_01 = (iy1 * width + ix0) * channels;
            let idx_11 = (iy1 * width + ix1) * channels;

            for c in 0..channels {
                let value = interpolate(
                    source[idx_00 + c] as f64,
                    source[idx_10 + c] as f64,
                    source[idx_01 + c] as f64,
                    source[idx_11 + c] as f64,
                    dx,
                    dy,
                );

                result[idx_d + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    PixelBuffer::from_parts(new_width as u32, new_height as u32, result)
}

/// Weighted blend of four corner samples on the unit square
#[inline]
fn interpolate(f00: f64, f10: f64, f01: f64, f11: f64, dx: f64, dy: f64) -> f64 {
    let un_x = 1.0 - dx;
    let un_y = 1.0 - dy;
    f00 * un_x * un_y + f10 * dx * un_y + f01 * un_x * dy + f11 * dx * dy
}

// >>> ORIENTATION PRIMITIVES

/// Remap every pixel of a buffer into a new `new_width` x `new_height` grid
fn remap<F>(buffer: &PixelBuffer, new_width: u32, new_height: u32, destination: F) -> PixelBuffer
where
    F: Fn(u32, u32) -> (u32, u32),
{
    let channels = CHANNELS as usize;
    let mut result = vec![0u8; buffer.len()];

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let (dst_x, dst_y) = destination(x, y);
            let dst = (dst_y as usize * new_width as usize + dst_x as usize) * channels;
            result[dst..dst + channels].copy_from_slice(buffer.pixel(x, y));
        }
    }

    PixelBuffer::from_parts(new_width, new_height, result)
}

/// Rotate a buffer 90 degrees clockwise
pub fn rotate90(buffer: &PixelBuffer) -> PixelBuffer {
    let h = buffer.height();
    remap(buffer, h, buffer.width(), |x, y| (h - 1 - y, x))
}

/// Rotate a buffer 180 degrees
pub fn rotate180(buffer: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (buffer.width(), buffer.height());
    remap(buffer, w, h, |x, y| (w - 1 - x, h - 1 - y))
}

/// Rotate a buffer 270 degrees clockwise
pub fn rotate270(buffer: &PixelBuffer) -> PixelBuffer {
    let w = buffer.width();
    remap(buffer, buffer.height(), w, |x, y| (y, w - 1 - x))
}

/// Mirror a buffer across its vertical axis
pub fn flip_horizontal(buffer: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (buffer.width(), buffer.height());
    remap(buffer, w, h, |x, y| (w - 1 - x, y))
}

/// Mirror a buffer across its horizontal axis
pub fn flip_vertical(buffer: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (buffer.width(), buffer.height());
    remap(buffer, w, h, |x, y| (x, h - 1 - y))
}

// <<< ORIENTATION PRIMITIVES

#[cfg(test)]
mod test {

    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 0, 255]);
            }
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_halve_dimensions() {
        let half = halve(&PixelBuffer::filled(1600, 1200, [0, 0, 0, 255])).unwrap();
        assert_eq!((half.width(), half.height()), (800, 600));

        let half = halve(&PixelBuffer::filled(7, 5, [0, 0, 0, 255])).unwrap();
        assert_eq!((half.width(), half.height()), (3, 2));
    }

    #[test]
    fn test_halve_keeps_single_row() {
        let half = halve(&PixelBuffer::filled(10, 1, [0, 0, 0, 255])).unwrap();
        assert_eq!((half.width(), half.height()), (5, 1));
    }

    #[test]
    fn test_halve_uniform_color() {
        let half = halve(&PixelBuffer::filled(16, 16, [40, 80, 120, 255])).unwrap();

        for pixel in half.iter_pixels() {
            assert_eq!(pixel, &[40, 80, 120, 255]);
        }
    }

    #[test]
    fn test_halve_until_invariant() {
        for (width, target) in [(1600, 800), (3200, 800), (1000, 400), (5000, 3), (10, 9)] {
            let buffer = PixelBuffer::filled(width, 4, [0, 0, 0, 255]);
            let (reduced, _) = halve_until(buffer, target).unwrap();
            assert!(reduced.width() < 2 * target);
        }
    }

    #[test]
    fn test_halve_until_counts() {
        let buffer = PixelBuffer::filled(3200, 2400, [0, 0, 0, 255]);
        let (reduced, halvings) = halve_until(buffer, 800).unwrap();
        assert_eq!(halvings, 2);
        assert_eq!((reduced.width(), reduced.height()), (800, 600));

        let buffer = PixelBuffer::filled(1000, 1000, [0, 0, 0, 255]);
        let (reduced, halvings) = halve_until(buffer, 400).unwrap();
        assert_eq!(halvings, 1);
        assert_eq!((reduced.width(), reduced.height()), (500, 500));
    }

    #[test]
    fn test_resampled_height_rounds_half_up() {
        // 5 / 2 = 2.5
        assert_eq!(resampled_height(4, 2, 5), 3);
        // 3 * 3 / 4 = 2.25
        assert_eq!(resampled_height(4, 3, 3), 2);
        assert_eq!(resampled_height(1000, 1, 10), 1);
    }

    #[test]
    fn test_resample_bilinear_dimensions() {
        let resized = resample_bilinear(&gradient(500, 500), 400);
        assert_eq!((resized.width(), resized.height()), (400, 400));

        let resized = resample_bilinear(&gradient(801, 601), 800);
        assert_eq!((resized.width(), resized.height()), (800, 600));
    }

    #[test]
    fn test_resample_bilinear_last_row_and_column() {
        // Width 3 -> 2 gives scale 2/3, so j = 1 maps to 1.5 and ceil stays in bounds
        let buffer = gradient(3, 3);
        let resized = resample_bilinear(&buffer, 2);

        assert_eq!((resized.width(), resized.height()), (2, 2));
        assert_eq!(resized.pixel(0, 0), &[0, 0, 0, 255]);
        assert_eq!(resized.pixel(1, 1), &[2, 2, 0, 255]);
    }

    #[test]
    fn test_resample_bilinear_interpolates() {
        let buffer = PixelBuffer::new(
            4,
            1,
            vec![0, 0, 0, 0, 100, 100, 100, 100, 200, 200, 200, 200, 250, 250, 250, 250],
        )
        .unwrap();

        // scale = 3 / 4, so j maps to 0, 1.333.. and 2.666..
        let resized = resample_bilinear(&buffer, 3);
        assert_eq!(resized.height(), 1);
        assert_eq!(resized.pixel(0, 0), &[0, 0, 0, 0]);
        assert_eq!(resized.pixel(1, 0), &[133, 133, 133, 133]);
        assert_eq!(resized.pixel(2, 0), &[233, 233, 233, 233]);
    }

    #[test]
    fn test_resample_bilinear_identity() {
        let buffer = gradient(5, 4);
        assert_eq!(resample_bilinear(&buffer, 5), buffer);
    }

    #[test]
    fn test_rotations() {
        // Two pixels side by side: A (red) and B (blue)
        let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();

        let r90 = rotate90(&buffer);
        assert_eq!((r90.width(), r90.height()), (1, 2));
        assert_eq!(r90.pixel(0, 0), &[255, 0, 0, 255]);
        assert_eq!(r90.pixel(0, 1), &[0, 0, 255, 255]);

        let r270 = rotate270(&buffer);
        assert_eq!((r270.width(), r270.height()), (1, 2));
        assert_eq!(r270.pixel(0, 0), &[0, 0, 255, 255]);
        assert_eq!(r270.pixel(0, 1), &[255, 0, 0, 255]);

        let r180 = rotate180(&buffer);
        assert_eq!(r180.pixel(0, 0), &[0, 0, 255, 255]);

        assert_eq!(rotate90(&rotate270(&buffer)), buffer);
        assert_eq!(rotate180(&rotate180(&buffer)), buffer);
    }

    #[test]
    fn test_flips() {
        let buffer = gradient(3, 2);

        let h = flip_horizontal(&buffer);
        assert_eq!(h.pixel(0, 0), buffer.pixel(2, 0));
        assert_eq!(flip_horizontal(&h), buffer);

        let v = flip_vertical(&buffer);
        assert_eq!(v.pixel(0, 0), buffer.pixel(0, 1));
        assert_eq!(flip_vertical(&v), buffer);
    }
}
