// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

pub mod config;
pub mod constant;
pub mod cv;
pub mod error;
pub mod im;
pub mod io;
pub mod pipeline;
pub mod ut;

pub use config::ScaleConfig;
pub use error::PixfitError;
pub use pipeline::{Resizer, read_and_compress, scale_pixels};
