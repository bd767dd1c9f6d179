//! Raster encoding for Pixkit's download paths.
//!
//! Every tool ends by turning a [`DecodedImage`](crate::decode::DecodedImage)
//! back into file bytes:
//! - JPEG with a configurable quality (compress, convert, PDF pages)
//! - PNG for crops, resizes and favicons
//! - WebP, quality-quantized ahead of a lossless encode (compress default)
//! - GIF and BMP for the converter
//!
//! # Examples
//!
//! ```ignore
//! use pixkit_core::encode::{encode, OutputFormat};
//!
//! let png = encode(&image, OutputFormat::Png, 100).unwrap();
//! ```

mod format;
mod jpeg;
mod raster;
mod webp;

use thiserror::Error;

pub use format::OutputFormat;
pub use jpeg::encode_jpeg;
pub use raster::encode;
pub use webp::encode_webp;

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested output format is not one Pixkit writes
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The underlying codec failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check an RGB buffer against its dimensions.
pub(crate) fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
