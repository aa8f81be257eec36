// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;

use pixfit_core::pipeline::Resizer;
use pixfit_core::ut;

use crate::options::ScaleOptions;

#[derive(Debug, Args)]
#[command(about = "Resize a single image.")]
pub struct ResizeFileArgs {
    #[arg(short = 'i', long, help = "Input image.", required = true)]
    pub input: Option<String>,

    #[arg(short = 'o', long, help = "Output image.")]
    pub output: Option<String>,

    #[command(flatten)]
    pub scale: ScaleOptions,

    #[arg(long, help = "Print the resized image as a base64 data URL.")]
    pub data_url: bool,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn resize_file(args: &ResizeFileArgs) {
    let config = args.scale.resolve("resize::file");
    let input = args.input.to_owned().unwrap();

    if args.output.is_none() && !args.data_url {
        eprintln!(
            "[pixfit::resize::file] ERROR: Provide an --output (-o) path and/or --data-url."
        );
        std::process::exit(1);
    }

    let bytes = std::fs::read(&input).unwrap_or_else(|err| {
        eprintln!("[pixfit::ReadError] Cannot read image file. {}: {}", input, err);
        std::process::exit(1);
    });

    ut::track::progress_log(
        &format!("Resizing {} ({} bytes).", input, ut::track::thousands_format(bytes.len())),
        args.verbose,
    );

    let resizer = Resizer::new();

    let mut data_url: Option<String> = None;
    let resized = resizer
        .resize_with(&bytes, &config, |encoded| {
            ut::track::progress_log(
                &format!(
                    "Resized to {} x {} as {}.",
                    encoded.width, encoded.height, encoded.mime_type
                ),
                args.verbose,
            );

            if args.data_url {
                data_url = Some(encoded.to_data_url());
            }
        })
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

    if let Some(output) = &args.output {
        std::fs::write(output, &resized).unwrap_or_else(|err| {
            eprintln!("[pixfit::resize::file] ERROR: Could not write {}. {}", output, err);
            std::process::exit(1);
        });

        ut::track::progress_log(
            &format!(
                "Complete. Wrote {} bytes to {}.",
                ut::track::thousands_format(resized.len()),
                output
            ),
            args.verbose,
        );
    }

    if let Some(data_url) = data_url {
        println!("{}", data_url);
    }
}
