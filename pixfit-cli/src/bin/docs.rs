#![allow(clippy::all)]
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
    clap_markdown::print_help_markdown::<Cli>();
}
