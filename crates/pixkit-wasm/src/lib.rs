//! Pixkit WASM - WebAssembly bindings for Pixkit
//!
//! Exposes every `pixkit-core` tool to the browser.
//!
//! # Module Structure
//!
//! - `types` - `JsDecodedImage` and JS conversion helpers
//! - `crop` - the stateful `JsCropSession`
//! - `decode` / `encode` - codecs and the resize tool
//! - `compress` - compression and format conversion
//! - `favicon`, `qr`, `pdf` - the remaining tools
//! - `logger` - `log` output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsCropSession } from '@pixkit/wasm';
//!
//! await init();
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const session = new JsCropSession(image.width, image.height);
//! ```

use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod compress;
mod crop;
mod decode;
mod encode;
mod favicon;
mod logger;
mod pdf;
mod qr;
mod types;

pub use compress::{compress_image, convert_image, JsCompressResult, JsConversion};
pub use crop::{JsCropSession, JsRegion};
pub use decode::{
    decode_image, detect_format, linked_height, linked_width, resize, resize_image,
    resize_to_fit, JsResizeResult,
};
pub use encode::{encode_image, encode_jpeg, encode_jpeg_from_image, mime_type};
pub use favicon::{generate_favicons, JsFaviconSet};
pub use pdf::{build_pdf, layout_pdf, pdf_file_name};
pub use qr::{compose_qr_overlay, generate_qr, render_qr_png};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load).
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logger::init(LevelFilter::Info);
}

/// Change console log verbosity (`"off"`, `"error"`, ... `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    pixkit_core::VERSION.to_string()
}

/// Download name for a tool's output: `{stem}_{suffix}.{extension}`.
#[wasm_bindgen]
pub fn output_name(original: &str, suffix: &str, extension: &str) -> String {
    pixkit_core::naming::output_name(original, suffix, extension)
}
