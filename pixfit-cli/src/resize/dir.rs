// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Args;
use futures::stream::{self, StreamExt};
use kdam::BarExt;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use pixfit_core::config::ScaleConfig;
use pixfit_core::constant;
use pixfit_core::error::PixfitError;
use pixfit_core::io::extension_for_mime;
use pixfit_core::pipeline::Resizer;
use pixfit_core::ut;

use crate::options::ScaleOptions;

#[derive(Debug, Args)]
#[command(about = "Resize every image in a directory.")]
pub struct ResizeDirArgs {
    #[arg(short = 'i', long, help = "Image directory.", required = true)]
    pub input: Option<String>,

    #[arg(short = 'o', long, help = "Output directory.", required = true)]
    pub output: Option<String>,

    #[command(flatten)]
    pub scale: ScaleOptions,

    #[arg(long, help = "Substring specifying images (e.g. _image).")]
    pub image_substring: Option<String>,

    #[arg(short = 't', long, help = "Number of threads.")]
    pub threads: Option<usize>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

/// Summary of one resized file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resized {
    pub output: String,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub width: u32,
    pub height: u32,
}

pub fn resize_dir(args: &ResizeDirArgs) {
    let config = args.scale.resolve("resize::dir");

    let threads = if let Some(t) = args.threads {
        t
    } else {
        std::thread::available_parallelism().unwrap_or_else(|_| {
            eprintln!("[pixfit::resize::dir] Could not automatically assign number of tasks. Please manually set the --threads (-t) argument.");
            std::process::exit(1);
        }).get()
    };

    if threads < 1 {
        eprintln!("[pixfit::resize::dir] ERROR: threads cannot be less than 1.");
        std::process::exit(1);
    }

    let input = args.input.to_owned().unwrap();

    let image_files = ut::path::collect_file_paths(
        &input,
        constant::SUPPORTED_IMAGE_FORMATS.as_slice(),
        args.image_substring.to_owned(),
    )
    .unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if image_files.is_empty() {
        eprintln!(
            "[pixfit::resize::dir] ERROR: No image files were detected. Please check your path and/or substring identifier."
        );
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!(
            "Detected {} images.",
            ut::track::thousands_format(image_files.len())
        ),
        args.verbose,
    );

    let output = PathBuf::from(args.output.to_owned().unwrap());

    let output = ut::path::create_directory(&output).unwrap_or_else(|err| {
        eprintln!("[pixfit::resize::dir] ERROR: Could not create directory. {}", err);
        std::process::exit(1);
    });

    let extension = extension_for_mime(&config.mime_type).unwrap_or_else(|| {
        eprintln!(
            "[pixfit::resize::dir] ERROR: No file extension for {}.",
            config.mime_type
        );
        std::process::exit(1);
    });

    let destinations = ut::path::output_paths(&output, &image_files, extension);
    let jobs: Vec<(PathBuf, PathBuf)> = image_files.into_iter().zip(destinations).collect();

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|err| {
        eprintln!("[pixfit::resize::dir] ERROR: Could not start runtime. {}", err);
        std::process::exit(1);
    });

    let resizer = Arc::new(Resizer::new());

    let results = rt.block_on(run_all(jobs, resizer, &config, threads, args.verbose));

    let saved: Mutex<usize> = Mutex::new(0);
    let success: Mutex<Vec<String>> = Mutex::new(vec![]);
    let failure: Mutex<Vec<String>> = Mutex::new(Vec::with_capacity(results.len()));

    results.into_par_iter().for_each(|(id, run)| match run {
        Ok(resized) => {
            *saved.lock().unwrap() += resized.input_bytes.saturating_sub(resized.output_bytes);
            success.lock().unwrap().push(format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                id,
                resized.output,
                resized.input_bytes,
                resized.output_bytes,
                resized.width,
                resized.height
            ));
        }
        Err(err) => {
            failure.lock().unwrap().push(format!("{}\t{}", id, err));
        }
    });

    let saved = saved.into_inner().unwrap();
    let mut success = success.into_inner().unwrap();
    let mut failure = failure.into_inner().unwrap();

    success.sort_unstable();
    failure.sort_unstable();

    if args.verbose {
        println!();
    }

    ut::track::progress_log(
        &format!(
            "Complete. Resized {} images ({} failed), saving {} bytes.",
            ut::track::thousands_format(success.len()),
            ut::track::thousands_format(failure.len()),
            ut::track::thousands_format(saved)
        ),
        args.verbose,
    );

    if !success.is_empty() {
        write_table(&output.join("resize_sizes.tsv"), &success);
    }

    if !failure.is_empty() {
        write_table(&output.join("resize_errors.tsv"), &failure);
    }
}

fn write_table(path: &Path, rows: &[String]) {
    std::fs::write(path, rows.join("\n")).unwrap_or_else(|err| {
        eprintln!(
            "[pixfit::resize::dir] ERROR: Could not write {}. {}",
            path.display(),
            err
        );
        std::process::exit(1);
    });
}

/// Resize one file and write it to `destination`
fn resize_one(
    resizer: &Resizer,
    image_path: &Path,
    destination: &Path,
    config: &ScaleConfig,
) -> Result<Resized, PixfitError> {
    let bytes = std::fs::read(image_path)
        .map_err(|err| PixfitError::ReadError(format!("{}: {}", image_path.display(), err)))?;

    let encoded = resizer.resize_image(&bytes, config)?;

    std::fs::write(destination, &encoded.bytes).map_err(|err| {
        PixfitError::OtherError(format!("{}: {}", destination.display(), err))
    })?;

    Ok(Resized {
        output: destination
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
        input_bytes: bytes.len(),
        output_bytes: encoded.bytes.len(),
        width: encoded.width,
        height: encoded.height,
    })
}

pub async fn run_all(
    jobs: Vec<(PathBuf, PathBuf)>,
    resizer: Arc<Resizer>,
    config: &ScaleConfig,
    threads: usize,
    verbose: bool,
) -> Vec<(String, Result<Resized, PixfitError>)> {
    let pb = Arc::new(Mutex::new(ut::track::progress_bar(
        jobs.len(),
        "Resizing",
        verbose,
    )));

    stream::iter(jobs)
        .map(|(image_path, destination)| {
            let resizer = resizer.clone();
            let config = config.clone();
            let pb_clone = pb.clone();

            async move {
                let id = image_path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_default();

                let result = tokio::task::spawn_blocking(move || {
                    resize_one(&resizer, &image_path, &destination, &config)
                })
                .await
                .unwrap_or_else(|_| {
                    Err(PixfitError::OtherError("Failed to resize image.".to_string()))
                });

                if verbose {
                    if let Ok(mut bar) = pb_clone.lock() {
                        let _ = bar.update(1);
                    }
                }

                (id, result)
            }
        })
        .buffer_unordered(threads)
        .collect::<Vec<_>>()
        .await
}
