// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::fmt;

#[derive(Debug, Clone)]
pub enum PixfitError {
    BufferSizeError,
    ConfigError(String),
    DecodeError(String),
    DirError(String),
    EncodeError(String),
    FormatError(String),
    MetadataError(String),
    ReadError(String),
    SurfaceError(&'static str),
    OtherError(String),
}

impl fmt::Display for PixfitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PixfitError::BufferSizeError => {
                write!(
                    f,
                    "[pixfit::BufferSizeError] The pixel buffer does not match width * height * 4."
                )
            }
            PixfitError::ConfigError(message) => {
                write!(f, "[pixfit::ConfigError] Invalid configuration. {}", message)
            }
            PixfitError::DecodeError(message) => {
                write!(f, "[pixfit::DecodeError] Cannot load image. {}", message)
            }
            PixfitError::DirError(message) => {
                write!(
                    f,
                    "[pixfit::DirError] Directory could not be read. {}.",
                    message
                )
            }
            PixfitError::EncodeError(message) => {
                write!(f, "[pixfit::EncodeError] Failed to encode image. {}", message)
            }
            PixfitError::FormatError(message) => {
                write!(
                    f,
                    "[pixfit::FormatError] Unsupported output format: {}.",
                    message
                )
            }
            PixfitError::MetadataError(message) => {
                write!(
                    f,
                    "[pixfit::MetadataError] Error getting orientation. {}",
                    message
                )
            }
            PixfitError::ReadError(message) => {
                write!(f, "[pixfit::ReadError] Cannot read image file. {}", message)
            }
            PixfitError::SurfaceError(message) => {
                write!(
                    f,
                    "[pixfit::SurfaceError] The working pixel surface is unavailable. {}",
                    message
                )
            }
            PixfitError::OtherError(message) => {
                write!(f, "[pixfit::OtherError] Error: {}.", message)
            }
        }
    }
}

impl std::error::Error for PixfitError {}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_error_display_prefix() {
        let error = PixfitError::DecodeError("not an image".to_string());
        assert_eq!(
            error.to_string(),
            "[pixfit::DecodeError] Cannot load image. not an image"
        );

        let error = PixfitError::SurfaceError("Zero-sized surface.");
        assert!(error.to_string().starts_with("[pixfit::SurfaceError]"));
    }
}
