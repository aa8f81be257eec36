// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

pub mod inspect;
pub mod options;
pub mod resize;
