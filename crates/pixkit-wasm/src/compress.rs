//! Compression and format conversion bindings.

use pixkit_core::compress::{self, CompressOptions, CompressionReport};
use pixkit_core::convert;
use pixkit_core::encode::OutputFormat;
use wasm_bindgen::prelude::*;

use crate::types::{from_js, js_error, to_js};

/// Output of the compression tool.
#[wasm_bindgen]
pub struct JsCompressResult {
    bytes: Vec<u8>,
    report: CompressionReport,
}

#[wasm_bindgen]
impl JsCompressResult {
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn original_size(&self) -> f64 {
        self.report.original_size as f64
    }

    #[wasm_bindgen(getter)]
    pub fn compressed_size(&self) -> f64 {
        self.report.compressed_size as f64
    }

    #[wasm_bindgen(getter)]
    pub fn reduction_percent(&self) -> f64 {
        self.report.reduction_percent
    }

    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.report.format.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.report.format.mime_type().to_string()
    }

    /// `{ originalSize, compressedSize, reductionPercent, format }`.
    pub fn report(&self) -> Result<JsValue, JsValue> {
        to_js(&self.report)
    }
}

/// Re-encode an upload. `options` is `{ quality, format }` (defaults 80 and
/// `"webp"`).
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], options: JsValue) -> Result<JsCompressResult, JsValue> {
    let options: CompressOptions = from_js(options)?;
    let result = compress::compress(bytes, &options).map_err(js_error)?;

    Ok(JsCompressResult {
        bytes: result.bytes,
        report: result.report,
    })
}

/// Output of the format converter.
#[wasm_bindgen]
pub struct JsConversion {
    bytes: Vec<u8>,
    original_format: String,
    new_format: OutputFormat,
    file_name: String,
}

#[wasm_bindgen]
impl JsConversion {
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn original_format(&self) -> String {
        self.original_format.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn new_format(&self) -> String {
        self.new_format.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.new_format.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }
}

/// Convert an upload named `name` to `format`.
#[wasm_bindgen]
pub fn convert_image(bytes: &[u8], name: &str, format: &str) -> Result<JsConversion, JsValue> {
    let target: OutputFormat = format.parse().map_err(js_error)?;
    let result = convert::convert(bytes, name, target).map_err(js_error)?;

    Ok(JsConversion {
        bytes: result.bytes,
        original_format: result.original_format,
        new_format: result.new_format,
        file_name: result.file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_core::decode::DecodedImage;
    use pixkit_core::encode::encode;

    fn png() -> Vec<u8> {
        let image = DecodedImage::new(16, 16, vec![60u8; 16 * 16 * 3]);
        encode(&image, OutputFormat::Png, 100).unwrap()
    }

    #[test]
    fn test_convert_image() {
        let result = convert_image(&png(), "icon.png", "bmp").ok();
        let result =
            result.map(|r| (r.original_format(), r.new_format(), r.file_name(), r.mime_type()));
        assert_eq!(
            result,
            Some((
                "png".to_string(),
                "bmp".to_string(),
                "icon.bmp".to_string(),
                "image/bmp".to_string()
            ))
        );
    }
}
