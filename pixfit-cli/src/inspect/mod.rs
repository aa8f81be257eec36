// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;

use pixfit_core::config::ScaleConfig;
use pixfit_core::cv::solve::{ScalePlan, plan};
use pixfit_core::error::PixfitError;
use pixfit_core::im::Orientation;
use pixfit_core::im::orientation::effective_orientation;
use pixfit_core::io::Surface;
use pixfit_core::pipeline::Resizer;

use crate::options::ScaleOptions;

#[derive(Debug, Args)]
#[command(about = "Print the scaling plan for an image without writing output.")]
#[command(arg_required_else_help = true)]
pub struct InspectArgs {
    #[arg(short = 'i', long, help = "Input image.", required = true)]
    pub input: Option<String>,

    #[command(flatten)]
    pub scale: ScaleOptions,
}

/// What the resizer would do with one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub orientation: Orientation,
    pub upright: (u32, u32),
    pub plan: ScalePlan,
}

/// Decode `bytes` and predict the resize without encoding
pub fn inspect_bytes(
    resizer: &Resizer,
    bytes: &[u8],
    config: &ScaleConfig,
) -> Result<Inspection, PixfitError> {
    let decoded = resizer.surface().decode(bytes)?;

    let orientation = if config.auto_rotate {
        resizer.orientation(bytes)
    } else {
        Orientation::Normal
    };

    let pending = if orientation == Orientation::Normal {
        Orientation::Normal
    } else {
        effective_orientation(orientation, resizer.capability())
    };

    let upright = if pending.swaps_dimensions() {
        (decoded.height(), decoded.width())
    } else {
        (decoded.width(), decoded.height())
    };

    Ok(Inspection {
        orientation,
        upright,
        plan: plan(upright.0, upright.1, config),
    })
}

pub fn inspect(args: &InspectArgs) {
    let config = args.scale.resolve("inspect");
    let input = args.input.to_owned().unwrap();

    let bytes = std::fs::read(&input).unwrap_or_else(|err| {
        eprintln!("[pixfit::ReadError] Cannot read image file. {}: {}", input, err);
        std::process::exit(1);
    });

    let resizer = Resizer::new();

    let inspection = inspect_bytes(&resizer, &bytes, &config).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    let plan = inspection.plan;

    println!("input\t{}", input);
    println!("orientation\t{}", inspection.orientation.to_exif());
    println!("source\t{} x {}", inspection.upright.0, inspection.upright.1);
    println!("target_width\t{}", plan.target_width);
    println!("halvings\t{}", plan.halvings);
    println!("halved\t{} x {}", plan.halved.0, plan.halved.1);
    println!("bilinear\t{}", plan.bilinear);
    println!("output\t{} x {}", plan.output.0, plan.output.1);
    println!("mime_type\t{}", config.mime_type);
}
