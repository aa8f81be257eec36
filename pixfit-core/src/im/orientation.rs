// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::sync::OnceLock;

use base64::{Engine as _, engine::general_purpose};

use crate::constant;
use crate::cv::transform;
use crate::im::PixelBuffer;
use crate::io::Surface;

/// The eight EXIF orientation codes
///
/// Each variant names the transform that brings the stored pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// 1: stored upright
    Normal,
    /// 2: mirrored left to right
    FlipHorizontal,
    /// 3: upside down
    Rotate180,
    /// 4: mirrored top to bottom
    FlipVertical,
    /// 5: mirrored along the top-left to bottom-right diagonal
    Transpose,
    /// 6: needs a 90 degree clockwise rotation
    Rotate90,
    /// 7: mirrored along the top-right to bottom-left diagonal
    Transverse,
    /// 8: needs a 270 degree clockwise rotation
    Rotate270,
}

impl Orientation {
    /// Parse an EXIF orientation value
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfit_core::im::Orientation;
    ///
    /// assert_eq!(Orientation::from_exif(6), Some(Orientation::Rotate90));
    /// assert_eq!(Orientation::from_exif(9), None);
    /// ```
    pub fn from_exif(value: u8) -> Option<Orientation> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270),
            _ => None,
        }
    }

    /// EXIF orientation value
    pub fn to_exif(self) -> u8 {
        match self {
            Orientation::Normal => 1,
            Orientation::FlipHorizontal => 2,
            Orientation::Rotate180 => 3,
            Orientation::FlipVertical => 4,
            Orientation::Transpose => 5,
            Orientation::Rotate90 => 6,
            Orientation::Transverse => 7,
            Orientation::Rotate270 => 8,
        }
    }

    /// Whether applying this orientation swaps width and height
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90
                | Orientation::Transverse
                | Orientation::Rotate270
        )
    }

    /// Apply the orientation to a buffer unconditionally
    pub fn apply(self, buffer: &PixelBuffer) -> PixelBuffer {
        match self {
            Orientation::Normal => buffer.clone(),
            Orientation::FlipHorizontal => transform::flip_horizontal(buffer),
            Orientation::Rotate180 => transform::rotate180(buffer),
            Orientation::FlipVertical => transform::flip_vertical(buffer),
            Orientation::Transpose => transform::flip_horizontal(&transform::rotate90(buffer)),
            Orientation::Rotate90 => transform::rotate90(buffer),
            Orientation::Transverse => transform::flip_horizontal(&transform::rotate270(buffer)),
            Orientation::Rotate270 => transform::rotate270(buffer),
        }
    }
}

/// Whether the decoding surface already applies EXIF orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationCapability {
    /// Decoded buffers are already upright; orientation tags are consumed
    Automatic,
    /// Decoded buffers are stored as-is and must be normalized
    Manual,
}

impl OrientationCapability {
    fn from_automatic(automatic: bool) -> OrientationCapability {
        if automatic {
            OrientationCapability::Automatic
        } else {
            OrientationCapability::Manual
        }
    }
}

/// Resolve the orientation left to apply after the surface has decoded
///
/// A surface that orients while decoding has already consumed the tag, so
/// anything other than `Manual` collapses to `Normal`.
pub fn effective_orientation(
    orientation: Orientation,
    capability: OrientationCapability,
) -> Orientation {
    match capability {
        OrientationCapability::Automatic => Orientation::Normal,
        OrientationCapability::Manual => orientation,
    }
}

/// Rotate and mirror a decoded buffer so it displays upright
///
/// Orientation 1 and any orientation on an `Automatic` surface return an
/// unchanged copy of the buffer, which prevents rotating twice.
///
/// # Arguments
///
/// * `buffer` - Decoded RGBA buffer
/// * `orientation` - Orientation read from the source metadata
/// * `capability` - Whether the surface already applied the orientation
///
/// # Examples
///
/// ```
/// use pixfit_core::im::{normalize, Orientation, OrientationCapability, PixelBuffer};
///
/// let buffer = PixelBuffer::filled(2, 1, [0, 0, 0, 255]);
///
/// let upright = normalize(&buffer, Orientation::Rotate90, OrientationCapability::Manual);
/// assert_eq!((upright.width(), upright.height()), (1, 2));
///
/// let untouched = normalize(&buffer, Orientation::Rotate90, OrientationCapability::Automatic);
/// assert_eq!((untouched.width(), untouched.height()), (2, 1));
/// ```
pub fn normalize(
    buffer: &PixelBuffer,
    orientation: Orientation,
    capability: OrientationCapability,
) -> PixelBuffer {
    effective_orientation(orientation, capability).apply(buffer)
}

/// A memoized check of whether a surface applies EXIF orientation itself
///
/// The probe decodes a fixed 2x1 JPEG tagged with orientation 6 and reports
/// `Automatic` when the surface returns it as 1x2. A decode failure resolves
/// to `Manual`. The answer is computed once per probe; concurrent callers
/// that race on the first check compute the same value from the same asset.
///
/// # Examples
///
/// ```
/// use pixfit_core::im::{OrientationCapability, OrientationProbe};
/// use pixfit_core::io::ImageSurface;
///
/// let probe = OrientationProbe::new();
/// assert!(probe.cached().is_none());
///
/// let capability = probe.resolve(&ImageSurface::default());
/// assert_eq!(capability, OrientationCapability::Manual);
/// assert_eq!(probe.cached(), Some(OrientationCapability::Manual));
/// ```
#[derive(Debug, Default)]
pub struct OrientationProbe {
    automatic: OnceLock<bool>,
}

impl OrientationProbe {
    /// A probe that has not yet inspected any surface
    pub fn new() -> OrientationProbe {
        OrientationProbe {
            automatic: OnceLock::new(),
        }
    }

    /// A probe with a known answer, skipping the reference decode
    pub fn with_capability(capability: OrientationCapability) -> OrientationProbe {
        let probe = OrientationProbe::new();
        let _ = probe
            .automatic
            .set(capability == OrientationCapability::Automatic);
        probe
    }

    /// The memoized capability, if the probe has run
    pub fn cached(&self) -> Option<OrientationCapability> {
        self.automatic
            .get()
            .copied()
            .map(OrientationCapability::from_automatic)
    }

    /// Resolve the capability of `surface`, probing at most once
    pub fn resolve<S: Surface + ?Sized>(&self, surface: &S) -> OrientationCapability {
        let automatic = *self.automatic.get_or_init(|| probe_surface(surface));
        OrientationCapability::from_automatic(automatic)
    }
}

/// Decode the reference image and check whether it came back rotated
pub fn probe_surface<S: Surface + ?Sized>(surface: &S) -> bool {
    let Ok(bytes) = general_purpose::STANDARD.decode(constant::ORIENTATION_PROBE_JPEG) else {
        return false;
    };

    match surface.decode(&bytes) {
        Ok(buffer) => buffer.width() == 1 && buffer.height() == 2,
        Err(_) => false,
    }
}
