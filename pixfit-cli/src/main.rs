// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::{Parser, Subcommand};
use pixfit_cli::{inspect, resize};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Resize(resize::ResizeArgs),
    Inspect(inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Resize(resize_args)) => resize::resize(resize_args),
        Some(Commands::Inspect(inspect_args)) => inspect::inspect(inspect_args),
        None => {}
    }
}
