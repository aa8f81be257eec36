// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use crate::config::ScaleConfig;
use crate::cv::solve::target_width;
use crate::cv::transform::{halve, resample_bilinear};
use crate::error::PixfitError;
use crate::im::{normalize, Orientation, OrientationCapability, OrientationProbe, PixelBuffer};
use crate::io::{EncodedImage, ImageSurface, Surface};
use crate::ut::track::{progress_log, progress_warn};

/// Downscale a decoded buffer to fit the constraints in `config`
///
/// The buffer is halved while its width is at least twice the solved target,
/// then a single bilinear pass brings it to the exact target width when the
/// halvings did not land on it. Buffers already at or below the target are
/// returned unchanged.
///
/// # Arguments
///
/// * `buffer` - Upright RGBA buffer
/// * `config` - Resize constraints
///
/// # Examples
///
/// ```
/// use pixfit_core::config::ScaleConfig;
/// use pixfit_core::im::PixelBuffer;
/// use pixfit_core::pipeline::scale_pixels;
///
/// let config = ScaleConfig { max_width: 800, max_height: 600, ..ScaleConfig::default() };
/// let buffer = PixelBuffer::filled(1600, 1200, [40, 80, 120, 255]);
///
/// let scaled = scale_pixels(buffer, &config).unwrap();
/// assert_eq!((scaled.width(), scaled.height()), (800, 600));
/// ```
pub fn scale_pixels(buffer: PixelBuffer, config: &ScaleConfig) -> Result<PixelBuffer, PixfitError> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(PixfitError::SurfaceError("Source image has no pixels."));
    }

    progress_log(
        &format!("Original size {} x {}", buffer.width(), buffer.height()),
        config.debug,
    );

    let target = target_width(buffer.width(), buffer.height(), config);
    let mut current = buffer;

    while current.width() as u64 >= 2 * target as u64 {
        current = halve(&current)?;
        progress_log(
            &format!("Halved to {} x {}", current.width(), current.height()),
            config.debug,
        );
    }

    if current.width() > target {
        current = resample_bilinear(&current, target);
        progress_log(
            &format!(
                "Bilinear resample to {} x {}",
                current.width(),
                current.height()
            ),
            config.debug,
        );
    }

    progress_log(
        &format!("Scaled size {} x {}", current.width(), current.height()),
        config.debug,
    );

    Ok(current)
}

/// Decode, orient, downscale, and re-encode images
///
/// A resizer owns its [`Surface`] and the memoized answer to whether that
/// surface applies EXIF orientation on its own. Share one resizer behind an
/// `Arc` so concurrent requests reuse the same probe.
///
/// # Examples
///
/// ```
/// use pixfit_core::config::ScaleConfig;
/// use pixfit_core::im::PixelBuffer;
/// use pixfit_core::io::{ImageSurface, Surface};
/// use pixfit_core::pipeline::Resizer;
///
/// let surface = ImageSurface::default();
/// let png = surface.encode(&PixelBuffer::filled(1000, 1000, [0, 0, 0, 255]), "image/png", 1.0).unwrap();
///
/// let config = ScaleConfig {
///     max_width: 800,
///     max_height: 800,
///     scale_ratio: Some(0.5),
///     mime_type: "image/png".to_string(),
///     ..ScaleConfig::default()
/// };
///
/// let resized = Resizer::new().resize_image(&png, &config).unwrap();
/// assert_eq!((resized.width, resized.height), (400, 400));
/// ```
#[derive(Debug)]
pub struct Resizer<S: Surface = ImageSurface> {
    surface: S,
    probe: OrientationProbe,
}

impl Resizer<ImageSurface> {
    /// A resizer backed by the image-rs codecs
    pub fn new() -> Resizer<ImageSurface> {
        Resizer::with_surface(ImageSurface::default())
    }
}

impl Default for Resizer<ImageSurface> {
    fn default() -> Self {
        Resizer::new()
    }
}

impl<S: Surface> Resizer<S> {
    /// A resizer backed by a custom surface, probed lazily on first use
    pub fn with_surface(surface: S) -> Resizer<S> {
        Resizer {
            surface,
            probe: OrientationProbe::new(),
        }
    }

    /// Replace the orientation probe with a known capability
    pub fn with_capability(self, capability: OrientationCapability) -> Resizer<S> {
        Resizer {
            surface: self.surface,
            probe: OrientationProbe::with_capability(capability),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether the surface orients images itself, probing on first call
    pub fn capability(&self) -> OrientationCapability {
        self.probe.resolve(&self.surface)
    }

    /// Resize compressed image bytes and return the re-encoded bytes
    ///
    /// # Arguments
    ///
    /// * `bytes` - Compressed source image
    /// * `config` - Resize constraints and output format
    pub fn resize(&self, bytes: &[u8], config: &ScaleConfig) -> Result<Vec<u8>, PixfitError> {
        self.resize_with(bytes, config, |_| {})
    }

    /// Resize compressed image bytes, handing the encoded result to `on_scale`
    ///
    /// `on_scale` runs exactly once after a successful encode and never runs
    /// when the request fails.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Compressed source image
    /// * `config` - Resize constraints and output format
    /// * `on_scale` - Observer for the final encoded image
    pub fn resize_with<F>(
        &self,
        bytes: &[u8],
        config: &ScaleConfig,
        on_scale: F,
    ) -> Result<Vec<u8>, PixfitError>
    where
        F: FnOnce(&EncodedImage),
    {
        let encoded = self.resize_image(bytes, config)?;
        on_scale(&encoded);
        Ok(encoded.into_bytes())
    }

    /// Resize compressed image bytes into an [`EncodedImage`]
    pub fn resize_image(
        &self,
        bytes: &[u8],
        config: &ScaleConfig,
    ) -> Result<EncodedImage, PixfitError> {
        config.validate()?;

        let decoded = self.surface.decode(bytes)?;
        let upright = self.orient(decoded, bytes, config);
        let scaled = scale_pixels(upright, config)?;

        let data = self
            .surface
            .encode(&scaled, &config.mime_type, config.quality)?;

        Ok(EncodedImage {
            bytes: data,
            mime_type: config.mime_type.clone(),
            width: scaled.width(),
            height: scaled.height(),
        })
    }

    /// Orientation tag of the source, recovering to `Normal` on bad metadata
    pub fn orientation(&self, bytes: &[u8]) -> Orientation {
        match self.surface.read_orientation(bytes) {
            Ok(orientation) => orientation.unwrap_or(Orientation::Normal),
            Err(err) => {
                progress_warn(&format!("{} Continuing with orientation 1.", err));
                Orientation::Normal
            }
        }
    }

    fn orient(&self, buffer: PixelBuffer, bytes: &[u8], config: &ScaleConfig) -> PixelBuffer {
        if !config.auto_rotate {
            progress_log("Ignoring EXIF orientation", config.debug);
            return buffer;
        }

        let orientation = self.orientation(bytes);
        progress_log(
            &format!("Orientation {}", orientation.to_exif()),
            config.debug,
        );

        if orientation == Orientation::Normal {
            return buffer;
        }

        let capability = self.capability();
        progress_log(
            &format!("Orientation capability {:?}", capability),
            config.debug,
        );

        normalize(&buffer, orientation, capability)
    }
}

/// Read an image file and resize it with the default image-rs surface
///
/// # Arguments
///
/// * `path` - Path to a compressed image
/// * `config` - Resize constraints and output format
///
/// ```no_run
/// use pixfit_core::config::ScaleConfig;
///
/// let bytes = pixfit_core::read_and_compress("photo.jpg", &ScaleConfig::default()).unwrap();
/// ```
pub fn read_and_compress<P: AsRef<Path>>(
    path: P,
    config: &ScaleConfig,
) -> Result<Vec<u8>, PixfitError> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|err| PixfitError::ReadError(format!("{}: {}", path.as_ref().display(), err)))?;

    Resizer::new().resize(&bytes, config)
}
