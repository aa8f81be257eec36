// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};

use crate::constant;
use crate::error::PixfitError;
use crate::im::{Orientation, PixelBuffer};
use crate::io::exif;

/// The codec collaborator that turns bytes into pixels and back
///
/// The scaling pipeline only ever sees decoded [`PixelBuffer`]s; a surface
/// owns every compressed format concern. Implementations must be shareable
/// across threads so one resizer can serve concurrent requests.
pub trait Surface: Send + Sync {
    /// Decode compressed image bytes into an RGBA buffer
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, PixfitError>;

    /// Encode an RGBA buffer into the format named by `mime_type`
    ///
    /// `quality` in [0, 1] is only meaningful for lossy formats.
    fn encode(
        &self,
        buffer: &PixelBuffer,
        mime_type: &str,
        quality: f64,
    ) -> Result<Vec<u8>, PixfitError>;

    /// Read the EXIF orientation tag, if present
    fn read_orientation(&self, bytes: &[u8]) -> Result<Option<Orientation>, PixfitError> {
        exif::read_orientation(bytes)
    }
}

/// Default surface backed by the image-rs codecs
///
/// # Examples
///
/// ```
/// use pixfit_core::im::PixelBuffer;
/// use pixfit_core::io::{ImageSurface, Surface};
///
/// let surface = ImageSurface::default();
/// let buffer = PixelBuffer::filled(4, 2, [10, 20, 30, 255]);
///
/// let png = surface.encode(&buffer, "image/png", 1.0).unwrap();
/// let decoded = surface.decode(&png).unwrap();
///
/// assert_eq!(decoded, buffer);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSurface {
    auto_orient: bool,
}

impl ImageSurface {
    /// A surface that applies the EXIF orientation while decoding
    pub fn auto_orient() -> ImageSurface {
        ImageSurface { auto_orient: true }
    }
}

impl Surface for ImageSurface {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, PixfitError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|err| PixfitError::DecodeError(err.to_string()))?;

        let mut decoder = reader
            .into_decoder()
            .map_err(|err| PixfitError::DecodeError(err.to_string()))?;

        let orientation = if self.auto_orient {
            decoder.orientation().ok()
        } else {
            None
        };

        let mut image = DynamicImage::from_decoder(decoder)
            .map_err(|err| PixfitError::DecodeError(err.to_string()))?;

        if let Some(orientation) = orientation {
            image.apply_orientation(orientation);
        }

        if image.width() == 0 || image.height() == 0 {
            return Err(PixfitError::DecodeError(
                "Decoded image has no pixels.".to_string(),
            ));
        }

        Ok(PixelBuffer::from_dynamic(image))
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        mime_type: &str,
        quality: f64,
    ) -> Result<Vec<u8>, PixfitError> {
        if !constant::SUPPORTED_MIME_TYPES.contains(&mime_type) {
            return Err(PixfitError::FormatError(mime_type.to_string()));
        }

        let format = ImageFormat::from_mime_type(mime_type)
            .ok_or_else(|| PixfitError::FormatError(mime_type.to_string()))?;

        let image = DynamicImage::ImageRgba8(buffer.clone().into_rgba_image()?);
        let mut bytes: Vec<u8> = Vec::new();

        match format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality(quality));
                DynamicImage::ImageRgb8(image.into_rgb8())
                    .write_with_encoder(encoder)
                    .map_err(|err| PixfitError::EncodeError(err.to_string()))?;
            }
            _ => {
                image
                    .write_to(&mut Cursor::new(&mut bytes), format)
                    .map_err(|err| PixfitError::EncodeError(err.to_string()))?;
            }
        }

        Ok(bytes)
    }
}

/// Map a [0, 1] quality onto the 1..=100 JPEG quality scale
pub fn jpeg_quality(quality: f64) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// File extension conventionally used for an output mime type
///
/// # Examples
///
/// ```
/// use pixfit_core::io::extension_for_mime;
///
/// assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
/// assert_eq!(extension_for_mime("text/plain"), None);
/// ```
pub fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/bmp" => Some("bmp"),
        "image/gif" => Some("gif"),
        "image/tiff" => Some("tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_jpeg_quality() {
        assert_eq!(jpeg_quality(0.0), 1);
        assert_eq!(jpeg_quality(0.5), 50);
        assert_eq!(jpeg_quality(0.924), 92);
        assert_eq!(jpeg_quality(1.0), 100);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let surface = ImageSurface::default();
        let result = surface.decode(b"definitely not an image");
        assert!(matches!(result, Err(PixfitError::DecodeError(_))));

        let result = surface.decode(&[]);
        assert!(matches!(result, Err(PixfitError::DecodeError(_))));
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let surface = ImageSurface::default();
        let buffer = PixelBuffer::filled(8, 8, [200, 100, 50, 128]);

        let jpeg = surface.encode(&buffer, "image/jpeg", 0.9).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let decoded = surface.decode(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
        assert_eq!(decoded.pixel(0, 0)[3], 255);
    }

    #[test]
    fn test_encode_formats() {
        let surface = ImageSurface::default();
        let buffer = PixelBuffer::filled(3, 5, [1, 2, 3, 4]);

        for mime_type in ["image/png", "image/webp", "image/bmp", "image/gif", "image/tiff"] {
            let bytes = surface.encode(&buffer, mime_type, 0.5).unwrap();
            let decoded = surface.decode(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (3, 5));
        }
    }

    #[test]
    fn test_encode_unknown_mime() {
        let surface = ImageSurface::default();
        let buffer = PixelBuffer::filled(1, 1, [0, 0, 0, 255]);
        let result = surface.encode(&buffer, "image/svg+xml", 0.5);
        assert!(matches!(result, Err(PixfitError::FormatError(_))));
    }
}
