//! Transient in-memory image payloads.
//!
//! Uploaded images live in a buffer scoped to one analysis request and
//! are dropped when the request finishes, on success and error paths
//! alike. Validation is header-only (format sniff + dimension read) so
//! corrupt uploads are rejected before any model call is spent on them.

use std::io::Cursor;

use base64::Engine;
use ::image::ImageReader;

use crate::error::CoreError;

/// A validated, in-memory image for one pipeline run.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: &'static str,
    width: u32,
    height: u32,
}

impl ImagePayload {
    /// Decode a base64 upload and validate that it is a readable image.
    ///
    /// Returns [`CoreError::ImageUnreadable`] if the payload is not valid
    /// base64, not a recognized image format (JPEG/PNG/WebP), or has an
    /// unreadable header.
    pub fn from_base64(encoded: &str) -> Result<Self, CoreError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| CoreError::ImageUnreadable(format!("invalid base64: {e}")))?;

        Self::from_bytes(bytes)
    }

    /// Validate raw image bytes (already decoded).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CoreError> {
        let reader = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| CoreError::ImageUnreadable(format!("format sniff failed: {e}")))?;

        let format = reader.format().ok_or_else(|| {
            CoreError::ImageUnreadable("unrecognized image format".to_string())
        })?;

        // Header-only dimension read; catches truncated/corrupt files
        // without decoding pixel data.
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| CoreError::ImageUnreadable(format!("unreadable image header: {e}")))?;

        Ok(Self {
            bytes,
            mime_type: format.to_mime_type(),
            width,
            height,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type derived from the sniffed format (e.g. `image/jpeg`).
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
