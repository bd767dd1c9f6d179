//! QR code rendering and the centered image badge.
//!
//! [`generate_qr`] rasterizes the code itself; [`compose_overlay`] paints a
//! white badge, a colored border and a clipped copy of an uploaded image over
//! its center. [`render_qr_png`] runs both and encodes the result.

mod generate;
mod overlay;

use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode, EncodeError, OutputFormat};

pub use generate::{generate_qr, ErrorCorrection, QrOptions, MAX_QR_SIZE, MIN_QR_SIZE, QUIET_ZONE};
pub use overlay::{
    compose_overlay, parse_hex_color, OverlayGeometry, OverlayOptions, OverlayStyle, Rgb,
    BORDER_PADDING,
};

#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR content must not be empty")]
    EmptyContent,

    #[error("QR size must be between 100 and 1000 pixels, got {0}")]
    InvalidSize(u32),

    #[error("Overlay scale must be between 0 and 1, got {0}")]
    InvalidScale(f64),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown error correction level: {0}")]
    UnknownLevel(String),

    #[error("Unknown overlay style: {0}")]
    UnknownStyle(String),

    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Image(#[from] EncodeError),
}

/// Render the code, optionally badge an uploaded image onto it, and encode
/// the result as PNG.
pub fn render_qr_png(
    options: &QrOptions,
    overlay: Option<&[u8]>,
    overlay_options: &OverlayOptions,
) -> Result<Vec<u8>, QrError> {
    let mut qr = generate_qr(options)?;

    if let Some(bytes) = overlay {
        let image = decode_image(bytes)?;
        qr = compose_overlay(&qr, &image, overlay_options)?;
    }

    Ok(encode(&qr, OutputFormat::Png, 100)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;

    #[test]
    fn test_render_plain_png() {
        let options = QrOptions::new("https://example.com");
        let png = render_qr_png(&options, None, &OverlayOptions::default()).unwrap();

        let decoded = decode_image(&png).unwrap();
        assert_eq!((decoded.width, decoded.height), (300, 300));
    }

    #[test]
    fn test_render_with_overlay() {
        let red = DecodedImage::new(20, 20, [255u8, 0, 0].repeat(400));
        let logo = encode(&red, OutputFormat::Png, 100).unwrap();

        let options = QrOptions::new("hello").with_size(200);
        let png = render_qr_png(&options, Some(&logo), &OverlayOptions::default()).unwrap();

        let decoded = decode_image(&png).unwrap();
        let center = ((100 * 200 + 100) * 3) as usize;
        let pixel = &decoded.pixels[center..center + 3];
        assert!(pixel[0] > 250 && pixel[1] < 5 && pixel[2] < 5, "got {pixel:?}");
    }

    #[test]
    fn test_render_rejects_bad_overlay() {
        let options = QrOptions::new("hello");
        let result = render_qr_png(&options, Some(b"garbage"), &OverlayOptions::default());
        assert!(matches!(result, Err(QrError::Decode(_))));
    }
}
