//! Image resizing for the resize tool and for favicon/overlay scaling.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the input.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{decode_image, DecodeError, DecodedImage, FilterType};
use crate::encode::{encode, EncodeError, OutputFormat};

/// Errors from the resize tool.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving
/// aspect ratio. Images that already fit are returned unchanged.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.width <= max_edge && image.height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Height that keeps `src_width:src_height` when the width becomes
/// `new_width`. Never less than 1.
pub fn linked_height(src_width: u32, src_height: u32, new_width: u32) -> u32 {
    if src_width == 0 {
        return src_height.max(1);
    }
    let ratio = src_height as f64 / src_width as f64;
    ((new_width as f64 * ratio).round() as u32).max(1)
}

/// Width that keeps `src_width:src_height` when the height becomes
/// `new_height`. Never less than 1.
pub fn linked_width(src_width: u32, src_height: u32, new_height: u32) -> u32 {
    if src_height == 0 {
        return src_width.max(1);
    }
    let ratio = src_width as f64 / src_height as f64;
    ((new_height as f64 * ratio).round() as u32).max(1)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    if width >= height {
        (max_edge, linked_height(width, height, max_edge))
    } else {
        (linked_width(width, height, max_edge), max_edge)
    }
}

/// Settings of the resize tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeOptions {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels. Ignored when `maintain_aspect` is set.
    pub height: u32,
    /// Derive the height from the width using the source aspect ratio.
    pub maintain_aspect: bool,
    /// Interpolation filter.
    pub filter: FilterType,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            maintain_aspect: true,
            filter: FilterType::Lanczos3,
        }
    }
}

/// Result of the resize tool: dimensions before and after plus PNG bytes.
#[derive(Debug, Clone)]
pub struct ResizeOutcome {
    pub original_width: u32,
    pub original_height: u32,
    pub new_width: u32,
    pub new_height: u32,
    pub bytes: Vec<u8>,
}

/// Decode `bytes`, resize per `options` and encode the result as PNG.
pub fn resize_image(bytes: &[u8], options: &ResizeOptions) -> Result<ResizeOutcome, ResizeError> {
    let source = decode_image(bytes)?;

    let width = options.width;
    let height = if options.maintain_aspect {
        linked_height(source.width, source.height, width)
    } else {
        options.height
    };

    let resized = resize(&source, width, height, options.filter)?;
    let png = encode(&resized, OutputFormat::Png, 100)?;

    debug!(
        "resized {}x{} -> {}x{} ({} bytes)",
        source.width,
        source.height,
        resized.width,
        resized.height,
        png.len()
    );

    Ok(ResizeOutcome {
        original_width: source.width,
        original_height: source.height,
        new_width: resized.width,
        new_height: resized.height,
        bytes: png,
    })
}
