//! Encoding bindings.
//!
//! ```typescript
//! const webp = encode_image(image, "webp", 80);
//! const jpeg = encode_jpeg_from_image(image, 90);
//! ```

use pixkit_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsDecodedImage};

/// Encode an image as `format` (`"jpeg"`, `"png"`, `"webp"`, `"gif"`,
/// `"bmp"` or a matching MIME type). `quality` applies to JPEG.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format: OutputFormat = format.parse().map_err(js_error)?;
    encode::encode(&image.to_decoded(), format, quality).map_err(js_error)
}

/// Encode raw RGB pixels to JPEG.
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(js_error)
}

/// Encode a decoded image to JPEG.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_jpeg(&image.pixels(), image.width(), image.height(), quality)
}

/// MIME type for a format name, for building `Blob`s.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> Result<String, JsValue> {
    let format: OutputFormat = format.parse().map_err(js_error)?;
    Ok(format.mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> JsDecodedImage {
        JsDecodedImage::new(8, 8, vec![128u8; 8 * 8 * 3])
    }

    #[test]
    fn test_encode_image_formats() {
        let png = encode_image(&gray(), "png", 100).ok();
        assert_eq!(png.as_ref().map(|b| &b[1..4]), Some(&b"PNG"[..]));

        let jpeg = encode_image(&gray(), "image/jpeg", 80).ok();
        assert_eq!(jpeg.as_ref().map(|b| &b[0..2]), Some(&[0xFF, 0xD8][..]));
    }

    #[test]
    fn test_encode_jpeg_from_image() {
        let jpeg = encode_jpeg_from_image(&gray(), 90).ok();
        assert!(jpeg.is_some_and(|b| b.starts_with(&[0xFF, 0xD8])));
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("webp").ok().as_deref(), Some("image/webp"));
    }
}
