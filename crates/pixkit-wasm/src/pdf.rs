//! Image-to-PDF bindings.

use js_sys::{Array, Uint8Array};
use pixkit_core::pdf::{self, PdfOptions};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::types::{from_js, js_error, to_js};

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct ImageSizes(Vec<(u32, u32)>);

/// Compute page placements for images of the given pixel sizes
/// (`[[width, height], ...]`). Returns `{ pageWidth, pageHeight, title,
/// pages: [{ placements: [{ image, x, y, width, height }] }] }` in mm.
#[wasm_bindgen]
pub fn layout_pdf(sizes: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let sizes: ImageSizes = from_js(sizes)?;
    let options: PdfOptions = from_js(options)?;
    let layout = pdf::layout(&sizes.0, &options).map_err(js_error)?;
    to_js(&layout)
}

/// Build a PDF from an array of uploaded file bytes (`Uint8Array[]`).
/// `options` is `{ pageSize, orientation, title }`.
#[wasm_bindgen]
pub fn build_pdf(files: Array, options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options: PdfOptions = from_js(options)?;
    let files: Vec<Vec<u8>> = files
        .iter()
        .map(|value| Uint8Array::new(&value).to_vec())
        .collect();

    pdf::build_pdf(&files, &options).map_err(js_error)
}

/// `{title}.pdf` or `document.pdf`.
#[wasm_bindgen]
pub fn pdf_file_name(options: JsValue) -> Result<String, JsValue> {
    let options: PdfOptions = from_js(options)?;
    Ok(options.file_name())
}
