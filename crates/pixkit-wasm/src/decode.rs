//! Decoding and resize bindings.
//!
//! ```typescript
//! import { decode_image, resize_image } from '@pixkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const result = resize_image(bytes, { width: 800, maintainAspect: true });
//! ```

use pixkit_core::decode::{self, ResizeOptions};
use wasm_bindgen::prelude::*;

use crate::types::{filter_from_u8, from_js, js_error, JsDecodedImage};

/// Decode any supported upload (JPEG, PNG, WebP, GIF, BMP, ICO), applying
/// EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Short format name of the upload (`"jpg"`, `"png"`, ...), if recognized.
#[wasm_bindgen]
pub fn detect_format(bytes: &[u8]) -> Option<String> {
    decode::detect_format(bytes).map(str::to_string)
}

/// Resize to exact dimensions. `filter`: 0=Nearest, 1=Bilinear, 2=Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Shrink so the longest edge is at most `max_edge`; never upscales.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_edge: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(&image.to_decoded(), max_edge, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Height that keeps the source aspect ratio at `new_width`.
#[wasm_bindgen]
pub fn linked_height(src_width: u32, src_height: u32, new_width: u32) -> u32 {
    decode::linked_height(src_width, src_height, new_width)
}

/// Width that keeps the source aspect ratio at `new_height`.
#[wasm_bindgen]
pub fn linked_width(src_width: u32, src_height: u32, new_height: u32) -> u32 {
    decode::linked_width(src_width, src_height, new_height)
}

/// Output of the resize tool.
#[wasm_bindgen]
pub struct JsResizeResult {
    original_width: u32,
    original_height: u32,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsResizeResult {
    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// PNG bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// Run the resize tool. `options` is `{ width, height, maintainAspect,
/// filter }`; missing fields take their defaults.
#[wasm_bindgen]
pub fn resize_image(bytes: &[u8], options: JsValue) -> Result<JsResizeResult, JsValue> {
    let options: ResizeOptions = from_js(options)?;
    let outcome = decode::resize_image(bytes, &options).map_err(js_error)?;

    Ok(JsResizeResult {
        original_width: outcome.original_width,
        original_height: outcome.original_height,
        width: outcome.new_width,
        height: outcome.new_height,
        bytes: outcome.bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_dimensions() {
        assert_eq!(linked_height(1920, 1080, 1280), 720);
        assert_eq!(linked_width(1920, 1080, 540), 960);
    }

    #[test]
    fn test_detect_format() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_format(&png_magic).as_deref(), Some("png"));
        assert_eq!(detect_format(&[1, 2, 3]), None);
    }

    #[test]
    fn test_resize_ok_path() {
        let img = JsDecodedImage::new(100, 50, vec![128u8; 100 * 50 * 3]);
        let resized = resize(&img, 50, 25, 1).ok().map(|r| (r.width(), r.height()));
        assert_eq!(resized, Some((50, 25)));
    }
}
