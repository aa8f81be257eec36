// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use base64::{Engine as _, engine::general_purpose};

/// A re-encoded image together with its format and dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    /// Render the image as a base64 `data:` URL preview
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfit_core::io::EncodedImage;
    ///
    /// let image = EncodedImage {
    ///     bytes: vec![1, 2, 3],
    ///     mime_type: "image/png".to_string(),
    ///     width: 1,
    ///     height: 1,
    /// };
    ///
    /// assert_eq!(image.to_data_url(), "data:image/png;base64,AQID");
    /// ```
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Returns the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
