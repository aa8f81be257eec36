// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use crate::config::ScaleConfig;
use crate::constant::PIXELS_PER_SIZE_UNIT;
use crate::cv::transform::resampled_height;
use crate::ut;

/// Compute the output width for a source image under a set of constraints
///
/// The width starts from the tightest of the source width, `max_width`, and
/// the width implied by `max_height` at the source aspect ratio. A pixel
/// budget (`max_size`, in thousands of pixels) only applies when the source
/// exceeds it, and `scale_ratio` caps the width further. The result never
/// exceeds the source width and is never below 1.
///
/// # Arguments
///
/// * `width` - Source width
/// * `height` - Source height
/// * `config` - Resize constraints
///
/// # Examples
///
/// ```
/// use pixfit_core::config::ScaleConfig;
/// use pixfit_core::cv::solve::target_width;
///
/// let config = ScaleConfig { max_width: 800, max_height: 600, ..ScaleConfig::default() };
/// assert_eq!(target_width(1600, 1200, &config), 800);
/// ```
pub fn target_width(width: u32, height: u32, config: &ScaleConfig) -> u32 {
    let src_width = width as f64;
    let src_height = height as f64;
    let ratio = src_width / src_height;

    let mut w = src_width
        .min(config.max_width as f64)
        .min(ratio * config.max_height as f64);

    if let Some(max_size) = config.max_size {
        if max_size > 0 && (max_size as f64) < (src_width * src_height) / PIXELS_PER_SIZE_UNIT {
            w = w.min((max_size as f64 * PIXELS_PER_SIZE_UNIT / src_height).floor());
        }
    }

    if let Some(scale_ratio) = config.scale_ratio {
        w = w.min((scale_ratio * src_width).floor());
    }

    let w = w.floor();

    if w.is_nan() || w <= 0.0 {
        ut::track::progress_warn("Image size is too small. Output width set to 1 pixel.");
        return 1;
    }

    w as u32
}

/// The sequence of operations a resize will perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePlan {
    /// Source dimensions as (width, height)
    pub source: (u32, u32),
    /// Width solved from the constraints
    pub target_width: u32,
    /// Number of 2x halvings applied before interpolation
    pub halvings: u32,
    /// Dimensions after halving
    pub halved: (u32, u32),
    /// Whether a bilinear pass follows the halvings
    pub bilinear: bool,
    /// Final output dimensions
    pub output: (u32, u32),
}

/// Predict the halvings, bilinear pass, and output size of a resize
///
/// # Arguments
///
/// * `width` - Source width
/// * `height` - Source height
/// * `config` - Resize constraints
///
/// # Examples
///
/// ```
/// use pixfit_core::config::ScaleConfig;
/// use pixfit_core::cv::solve::plan;
///
/// let config = ScaleConfig { max_width: 800, max_height: 800, scale_ratio: Some(0.5), ..ScaleConfig::default() };
/// let plan = plan(1000, 1000, &config);
///
/// assert_eq!(plan.target_width, 400);
/// assert_eq!(plan.halvings, 1);
/// assert!(plan.bilinear);
/// assert_eq!(plan.output, (400, 400));
/// ```
pub fn plan(width: u32, height: u32, config: &ScaleConfig) -> ScalePlan {
    let target = target_width(width, height, config);

    let (mut w, mut h) = (width, height);
    let mut halvings = 0;

    while w as u64 >= 2 * target as u64 {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        halvings += 1;
    }

    let bilinear = w > target;
    let output = if bilinear {
        (target, resampled_height(w, h, target))
    } else {
        (w, h)
    };

    ScalePlan {
        source: (width, height),
        target_width: target,
        halvings,
        halved: (w, h),
        bilinear,
        output,
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn config(max_width: u32, max_height: u32) -> ScaleConfig {
        ScaleConfig {
            max_width,
            max_height,
            ..ScaleConfig::default()
        }
    }

    #[test]
    fn test_target_width_max_width() {
        assert_eq!(target_width(1600, 1200, &config(800, 600)), 800);
        assert_eq!(target_width(3200, 2400, &config(800, 600)), 800);
    }

    #[test]
    fn test_target_width_max_height() {
        // Portrait: height bound dominates, 600 * 0.75 = 450
        assert_eq!(target_width(1200, 1600, &config(800, 600)), 450);
    }

    #[test]
    fn test_target_width_never_upscales() {
        assert_eq!(target_width(300, 200, &config(800, 600)), 300);
    }

    #[test]
    fn test_target_width_max_size() {
        let config = ScaleConfig {
            max_width: 10_000,
            max_height: 10_000,
            max_size: Some(50),
            ..ScaleConfig::default()
        };
        assert_eq!(target_width(1000, 500, &config), 100);
    }

    #[test]
    fn test_target_width_max_size_not_exceeded() {
        // 500 thousand pixel budget on a 500 thousand pixel image is not applied
        let config = ScaleConfig {
            max_width: 10_000,
            max_height: 10_000,
            max_size: Some(500),
            ..ScaleConfig::default()
        };
        assert_eq!(target_width(1000, 500, &config), 1000);

        let config = ScaleConfig {
            max_size: Some(0),
            ..config
        };
        assert_eq!(target_width(1000, 500, &config), 1000);
    }

    #[test]
    fn test_target_width_scale_ratio() {
        let config = ScaleConfig {
            max_width: 800,
            max_height: 800,
            scale_ratio: Some(0.5),
            ..ScaleConfig::default()
        };
        assert_eq!(target_width(1000, 1000, &config), 400);
    }

    #[test]
    fn test_target_width_degenerate() {
        let tiny = ScaleConfig {
            scale_ratio: Some(0.001),
            ..ScaleConfig::default()
        };
        assert_eq!(target_width(100, 100, &tiny), 1);

        // A tall strip with a one pixel height bound
        assert_eq!(target_width(1, 1000, &config(800, 1)), 1);
    }

    #[test]
    fn test_target_width_bounds() {
        for (width, height) in [(1, 1), (7, 3), (640, 480), (4000, 3000), (123, 4567)] {
            for (max_width, max_height) in [(1, 1), (10, 500), (800, 600), (5000, 5000)] {
                let w = target_width(width, height, &config(max_width, max_height));
                assert!(w >= 1);
                assert!(w <= width.min(max_width).max(1));
            }
        }
    }

    #[test]
    fn test_plan_scenarios() {
        let p = plan(1600, 1200, &config(800, 600));
        assert_eq!(p.halvings, 1);
        assert!(!p.bilinear);
        assert_eq!(p.output, (800, 600));

        let p = plan(3200, 2400, &config(800, 600));
        assert_eq!(p.halvings, 2);
        assert!(!p.bilinear);
        assert_eq!(p.output, (800, 600));

        let p = plan(640, 480, &config(800, 600));
        assert_eq!(p.halvings, 0);
        assert!(!p.bilinear);
        assert_eq!(p.output, (640, 480));
    }
}
