// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;

use pixfit_core::config::ScaleConfig;
use pixfit_core::constant;
use pixfit_core::error::PixfitError;

/// Resize constraints shared by every subcommand
///
/// Values given on the command line override those loaded from `--config`,
/// which in turn override the defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct ScaleOptions {
    #[arg(short = 'c', long, help = "JSON file with resize settings.")]
    pub config: Option<String>,

    #[arg(long, help = "Maximum output width in pixels.")]
    pub max_width: Option<u32>,

    #[arg(long, help = "Maximum output height in pixels.")]
    pub max_height: Option<u32>,

    #[arg(long, help = "Pixel budget in thousands of pixels (e.g. 500).")]
    pub max_size: Option<u32>,

    #[arg(long, help = "Additional cap on the output width as a fraction of the source width.")]
    pub scale_ratio: Option<f64>,

    #[arg(short = 'q', long, help = "Lossy encoding quality between 0 and 1.")]
    pub quality: Option<f64>,

    #[arg(short = 'm', long, help = "Output format (e.g. image/jpeg, image/png, image/webp).")]
    pub mime_type: Option<String>,

    #[arg(long, help = "Ignore the EXIF orientation tag.")]
    pub no_auto_rotate: bool,

    #[arg(long, help = "Print per-image scaling diagnostics.")]
    pub debug: bool,
}

impl ScaleOptions {
    /// Merge the config file, command line overrides, and defaults
    pub fn to_config(&self) -> Result<ScaleConfig, PixfitError> {
        let mut config = match &self.config {
            Some(path) => ScaleConfig::from_json_file(path)?,
            None => ScaleConfig::default(),
        };

        if let Some(max_width) = self.max_width {
            config.max_width = max_width;
        }

        if let Some(max_height) = self.max_height {
            config.max_height = max_height;
        }

        if self.max_size.is_some() {
            config.max_size = self.max_size;
        }

        if self.scale_ratio.is_some() {
            config.scale_ratio = self.scale_ratio;
        }

        if let Some(quality) = self.quality {
            config.quality = quality;
        }

        if let Some(mime_type) = &self.mime_type {
            config.mime_type = mime_type.to_lowercase();
        }

        if self.no_auto_rotate {
            config.auto_rotate = false;
        }

        if self.debug {
            config.debug = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Resolve the config or exit with the error on stderr
    pub fn resolve(&self, context: &str) -> ScaleConfig {
        self.to_config().unwrap_or_else(|err| {
            eprintln!("[pixfit::{}] ERROR: {}", context, err);
            if matches!(err, PixfitError::FormatError(_)) {
                eprintln!(
                    "[pixfit::{}] Supported output formats: {:?}.",
                    context,
                    constant::SUPPORTED_MIME_TYPES
                );
            }
            std::process::exit(1);
        })
    }
}
