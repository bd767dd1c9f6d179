//! QR code bindings.
//!
//! ```typescript
//! const qr = generate_qr({ content: url, size: 300, errorCorrection: "H" });
//! const badged = compose_qr_overlay(qr, decode_image(logoBytes), { style: "rounded" });
//! const png = encode_image(badged, "png", 100);
//! ```

use pixkit_core::qr::{self, OverlayOptions, QrOptions};
use wasm_bindgen::prelude::*;

use crate::types::{from_js, js_error, JsDecodedImage};

/// Render a QR code. `options` is `{ content, size, errorCorrection }`.
#[wasm_bindgen]
pub fn generate_qr(options: JsValue) -> Result<JsDecodedImage, JsValue> {
    let options: QrOptions = from_js(options)?;
    qr::generate_qr(&options)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Badge `overlay` onto the center of `qr`. `options` is
/// `{ scale, style, borderColor }`.
#[wasm_bindgen]
pub fn compose_qr_overlay(
    qr: &JsDecodedImage,
    overlay: &JsDecodedImage,
    options: JsValue,
) -> Result<JsDecodedImage, JsValue> {
    let options: OverlayOptions = from_js(options)?;
    qr::compose_overlay(&qr.to_decoded(), &overlay.to_decoded(), &options)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// One-shot PNG: the code plus an optional badge from uploaded bytes.
#[wasm_bindgen]
pub fn render_qr_png(
    options: JsValue,
    overlay: Option<Vec<u8>>,
    overlay_options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let options: QrOptions = from_js(options)?;
    let overlay_options: OverlayOptions = from_js(overlay_options)?;
    qr::render_qr_png(&options, overlay.as_deref(), &overlay_options).map_err(js_error)
}
