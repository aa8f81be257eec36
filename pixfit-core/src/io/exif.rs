// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::io::Cursor;

use image::metadata::Orientation as ExifOrientation;
use image::{ImageDecoder, ImageReader};

use crate::error::PixfitError;
use crate::im::Orientation;

/// Read the EXIF orientation tag from compressed image bytes
///
/// Returns `Ok(None)` when the image carries no EXIF block or no orientation
/// tag. Errors are reported as `MetadataError` so callers can fall back to
/// the identity orientation.
///
/// # Arguments
///
/// * `bytes` - Raw source image bytes
pub fn read_orientation(bytes: &[u8]) -> Result<Option<Orientation>, PixfitError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| PixfitError::MetadataError(err.to_string()))?;

    let mut decoder = reader
        .into_decoder()
        .map_err(|err| PixfitError::MetadataError(err.to_string()))?;

    let chunk = decoder
        .exif_metadata()
        .map_err(|err| PixfitError::MetadataError(err.to_string()))?;

    Ok(chunk
        .as_deref()
        .and_then(ExifOrientation::from_exif_chunk)
        .and_then(|orientation| Orientation::from_exif(orientation.to_exif())))
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_read_orientation_without_exif() {
        let mut png = Vec::new();
        image::DynamicImage::new_rgba8(2, 2)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        assert_eq!(read_orientation(&png).unwrap(), None);
    }

    #[test]
    fn test_read_orientation_invalid_bytes() {
        let result = read_orientation(b"not an image");
        assert!(matches!(result, Err(PixfitError::MetadataError(_))));
    }
}
