// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::{Args, Subcommand};

mod dir;
mod file;

use dir::{ResizeDirArgs, resize_dir};
use file::{ResizeFileArgs, resize_file};

#[derive(Debug, Args)]
#[command(about = "Downscale images to fit width, height and pixel-budget constraints.")]
#[command(args_conflicts_with_subcommands = true)]
#[command(arg_required_else_help = true)]
#[command(flatten_help = true)]
pub struct ResizeArgs {
    #[command(subcommand)]
    command: Option<ResizeCommands>,
}

#[derive(Debug, Subcommand)]
enum ResizeCommands {
    File(ResizeFileArgs),
    Dir(ResizeDirArgs),
}

pub fn resize(args: &ResizeArgs) {
    match args.command.as_ref() {
        Some(ResizeCommands::File(file)) => resize_file(file),
        Some(ResizeCommands::Dir(dir)) => resize_dir(dir),
        None => {}
    }
}
