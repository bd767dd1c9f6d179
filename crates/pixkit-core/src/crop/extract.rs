//! Region extraction: turning a crop rectangle into pixels.

use serde::{Deserialize, Serialize};

use super::geometry::{CropRect, ImageBounds};
use super::CropError;
use crate::decode::DecodedImage;
use crate::encode::{encode, OutputFormat};

/// Whole-pixel rectangle handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Round a crop rectangle to whole pixels, clamped into `bounds`.
    ///
    /// The result is always at least 1x1 and never extends past the image.
    pub fn from_rect(rect: &CropRect, bounds: ImageBounds) -> Self {
        let (bw, bh) = (bounds.width(), bounds.height());

        let x = round_px(rect.x).min(bw - 1);
        let y = round_px(rect.y).min(bh - 1);
        let width = round_px(rect.width).clamp(1, bw - x);
        let height = round_px(rect.height).clamp(1, bh - y);

        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    fn fits(&self, image: &DecodedImage) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= image.width as u64
            && self.y as u64 + self.height as u64 <= image.height as u64
    }
}

/// Round to the nearest pixel; negative and non-finite inputs become 0.
fn round_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Copy the pixels of `region` out of `image`.
///
/// # Errors
///
/// Returns `CropError::RegionOutOfBounds` if the region does not lie
/// entirely inside the image.
pub fn extract_region(image: &DecodedImage, region: Region) -> Result<DecodedImage, CropError> {
    if !region.fits(image) {
        return Err(CropError::RegionOutOfBounds {
            region,
            width: image.width,
            height: image.height,
        });
    }

    // Fast path: full image
    if region.x == 0
        && region.y == 0
        && region.width == image.width
        && region.height == image.height
    {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = region.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    for row in region.y..region.y + region.height {
        let start = row as usize * src_stride + region.x as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(DecodedImage::new(region.width, region.height, output))
}

/// Extract `rect` from `image` and encode it as PNG, the crop tool's
/// download format.
pub fn crop_to_png(image: &DecodedImage, rect: &CropRect) -> Result<Vec<u8>, CropError> {
    let bounds = image.bounds()?;
    let region = Region::from_rect(rect, bounds);
    let cropped = extract_region(image, region)?;
    Ok(encode(&cropped, OutputFormat::Png, 100)?)
}
