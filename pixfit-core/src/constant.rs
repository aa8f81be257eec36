// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

// All input image formats the default surface can decode
pub const SUPPORTED_IMAGE_FORMATS: [&str; 14] = [
    "avif", "bmp", "gif", "ico", "jpeg", "jpg", "png", "pbm", "pgm", "ppm", "tga", "tif", "tiff",
    "webp",
];

// Output mime types the default surface can encode
pub const SUPPORTED_MIME_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/bmp",
    "image/gif",
    "image/tiff",
];

// Bytes per pixel of every buffer flowing through the pipeline (RGBA)
pub const CHANNELS: u32 = 4;

// Pixel budgets (`max_size`) are expressed in thousands of pixels
pub const PIXELS_PER_SIZE_UNIT: f64 = 1000.0;

// Default configuration values
pub const DEFAULT_QUALITY: f64 = 0.5;
pub const DEFAULT_MAX_WIDTH: u32 = 800;
pub const DEFAULT_MAX_HEIGHT: u32 = 600;
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

// Black 2x1 JPEG carrying EXIF orientation 6. A surface that applies
// orientation while decoding yields a 1x2 image from it.
pub const ORIENTATION_PROBE_JPEG: &str = concat!(
    "/9j/4QAiRXhpZgAATU0AKgAAAAgAAQESAAMAAAABAAYAAAA",
    "AAAD/2wCEAAEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBA",
    "QEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE",
    "BAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAf/AABEIAAEAAgMBEQACEQEDEQH/x",
    "ABKAAEAAAAAAAAAAAAAAAAAAAALEAEAAAAAAAAAAAAAAAAAAAAAAQEAAAAAAAAAAAAAAAA",
    "AAAAAEQEAAAAAAAAAAAAAAAAAAAAA/9oADAMBAAIRAxEAPwA/8H//2Q==",
);
