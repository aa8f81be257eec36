// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constant;
use crate::error::PixfitError;

/// Constraints and output settings for a single resize request
///
/// Every field has a default, so partial configurations (e.g. a JSON file
/// that only sets `maxWidth`) are filled in from [`ScaleConfig::default`].
/// Keys are accepted in camelCase or snake_case.
///
/// # Examples
///
/// ```
/// use pixfit_core::config::ScaleConfig;
///
/// let config: ScaleConfig = serde_json::from_str(r#"{"maxWidth": 320, "quality": 0.9}"#).unwrap();
///
/// assert_eq!(config.max_width, 320);
/// assert_eq!(config.max_height, 600);
/// assert!(config.auto_rotate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaleConfig {
    /// Lossy encoding quality in [0, 1]
    pub quality: f64,
    #[serde(alias = "max_width")]
    pub max_width: u32,
    #[serde(alias = "max_height")]
    pub max_height: u32,
    /// Pixel budget in thousands of pixels
    #[serde(alias = "max_size")]
    pub max_size: Option<u32>,
    /// Additional multiplicative cap on the source width, in (0, 1]
    #[serde(alias = "scale_ratio")]
    pub scale_ratio: Option<f64>,
    /// Consult the EXIF orientation tag before scaling
    #[serde(alias = "auto_rotate")]
    pub auto_rotate: bool,
    pub debug: bool,
    #[serde(alias = "mime_type")]
    pub mime_type: String,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            quality: constant::DEFAULT_QUALITY,
            max_width: constant::DEFAULT_MAX_WIDTH,
            max_height: constant::DEFAULT_MAX_HEIGHT,
            max_size: None,
            scale_ratio: None,
            auto_rotate: true,
            debug: false,
            mime_type: constant::DEFAULT_MIME_TYPE.to_string(),
        }
    }
}

impl ScaleConfig {
    /// Load a configuration from a JSON file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON object with any subset of the config keys
    ///
    /// ```no_run
    /// use pixfit_core::config::ScaleConfig;
    /// let config = ScaleConfig::from_json_file("pixfit.json").unwrap();
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<ScaleConfig, PixfitError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            PixfitError::ReadError(format!("{}: {}", path.as_ref().display(), err))
        })?;

        serde_json::from_str(&contents).map_err(|err| PixfitError::ConfigError(err.to_string()))
    }

    /// Check that all values are inside their valid ranges
    pub fn validate(&self) -> Result<(), PixfitError> {
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(PixfitError::ConfigError(format!(
                "quality must be in [0, 1], got {}.",
                self.quality
            )));
        }

        if self.max_width == 0 || self.max_height == 0 {
            return Err(PixfitError::ConfigError(
                "max_width and max_height must be at least 1.".to_string(),
            ));
        }

        if let Some(ratio) = self.scale_ratio {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(PixfitError::ConfigError(format!(
                    "scale_ratio must be in (0, 1], got {}.",
                    ratio
                )));
            }
        }

        if !constant::SUPPORTED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(PixfitError::FormatError(self.mime_type.clone()));
        }

        Ok(())
    }
}
