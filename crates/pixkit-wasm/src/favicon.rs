//! Favicon set bindings.

use js_sys::Array;
use pixkit_core::favicon::{self, FaviconSet, ZIP_FILE_NAME};
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// Generated favicon files, indexed in display order.
#[wasm_bindgen]
pub struct JsFaviconSet {
    inner: FaviconSet,
}

#[wasm_bindgen]
impl JsFaviconSet {
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.files().len()
    }

    /// File names, e.g. `["favicon-16x16.png", ..., "favicon.ico"]`.
    pub fn file_names(&self) -> Array {
        self.inner
            .files()
            .iter()
            .map(|f| JsValue::from_str(f.file_name))
            .collect()
    }

    pub fn file_name(&self, index: usize) -> Option<String> {
        self.inner.files().get(index).map(|f| f.file_name.to_string())
    }

    /// `"32x32"` or `"ico"`.
    pub fn label(&self, index: usize) -> Option<String> {
        self.inner.files().get(index).map(|f| f.label())
    }

    pub fn mime_type(&self, index: usize) -> Option<String> {
        self.inner.files().get(index).map(|f| f.mime_type().to_string())
    }

    pub fn bytes(&self, index: usize) -> Option<Vec<u8>> {
        self.inner.files().get(index).map(|f| f.bytes.clone())
    }

    pub fn manifest(&self) -> Result<String, JsValue> {
        self.inner.manifest().map_err(js_error)
    }

    pub fn installation_html(&self) -> String {
        self.inner.installation_html().to_string()
    }

    /// Everything bundled as `favicons.zip`.
    pub fn to_zip(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.to_zip().map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn zip_file_name(&self) -> String {
        ZIP_FILE_NAME.to_string()
    }
}

#[wasm_bindgen]
pub fn generate_favicons(bytes: &[u8]) -> Result<JsFaviconSet, JsValue> {
    favicon::generate_favicons(bytes)
        .map(|inner| JsFaviconSet { inner })
        .map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_core::decode::DecodedImage;
    use pixkit_core::encode::{encode, OutputFormat};

    #[test]
    fn test_indexed_access() {
        let image = DecodedImage::new(20, 20, vec![250u8; 20 * 20 * 3]);
        let png = encode(&image, OutputFormat::Png, 100).unwrap();
        let set = match generate_favicons(&png) {
            Ok(set) => set,
            Err(_) => panic!("favicon generation failed"),
        };

        assert_eq!(set.length(), 7);
        assert_eq!(set.file_name(0).as_deref(), Some("favicon-16x16.png"));
        assert_eq!(set.label(6).as_deref(), Some("ico"));
        assert_eq!(set.mime_type(6).as_deref(), Some("image/x-icon"));
        assert!(set.bytes(3).is_some_and(|b| !b.is_empty()));
        assert_eq!(set.file_name(7), None);
        assert!(set.installation_html().contains("apple-touch-icon"));
        assert_eq!(set.zip_file_name(), "favicons.zip");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_garbage_errors() {
        assert!(generate_favicons(b"nope").is_err());
    }
}
