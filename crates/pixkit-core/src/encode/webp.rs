//! WebP encoding with a quality knob.
//!
//! The only WebP encoder in `image` is lossless, so quality below 100 is
//! applied by snapping each RGB channel to a reduced set of levels first.

use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;

use super::{validate, EncodeError};

/// Encode RGB pixel data as WebP.
///
/// `quality` is clamped to 1-100; 100 keeps every channel value.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut buffer);

    let result = if quality < 100 {
        let quantized = quantize(pixels, quality);
        encoder.encode(&quantized, width, height, ExtendedColorType::Rgb8)
    } else {
        encoder.encode(pixels, width, height, ExtendedColorType::Rgb8)
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Levels kept per channel. Quadratic so the top of the slider stays close
/// to the source and the bottom gets coarse quickly.
fn levels_for_quality(quality: u8) -> u16 {
    if quality >= 100 {
        return 256;
    }
    let q = f32::from(quality.max(1)) / 100.0;
    (2.0 + q * q * 254.0).round().clamp(2.0, 256.0) as u16
}

fn quantize(pixels: &[u8], quality: u8) -> Vec<u8> {
    let step = 255.0 / (f32::from(levels_for_quality(quality)) - 1.0);
    pixels
        .iter()
        .map(|&value| ((f32::from(value) / step).round() * step).round().clamp(0.0, 255.0) as u8)
        .collect()
}
