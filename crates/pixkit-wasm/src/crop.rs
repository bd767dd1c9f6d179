//! Crop editor bindings.
//!
//! The host page owns one `JsCropSession` per loaded image and forwards
//! pointer events in image coordinates:
//!
//! ```typescript
//! const session = new JsCropSession(image.width, image.height);
//! canvas.onpointerdown = (e) => {
//!   const p = toImage(e);
//!   const handle = session.hit_test_handle(p.x, p.y);
//!   if (handle) session.begin_resize(handle, p.x, p.y);
//!   else session.begin_drag(p.x, p.y);
//! };
//! canvas.onpointermove = (e) => { const p = toImage(e); session.update(p.x, p.y); };
//! canvas.onpointerup = canvas.onpointerleave = () => session.end();
//! const png = session.crop_png(image);
//! ```

use pixkit_core::crop::{
    crop_to_png, extract_region, CropSession, HandleId, ImageBounds, Point, Region,
    HANDLE_HIT_RADIUS,
};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsDecodedImage};

/// Whole-pixel crop region.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<Region> for JsRegion {
    fn from(r: Region) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// Stateful crop rectangle for one loaded image.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a session for an image of `width x height` pixels.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<JsCropSession, JsValue> {
        let bounds = ImageBounds::new(width, height).map_err(js_error)?;
        Ok(Self {
            inner: CropSession::new(bounds),
        })
    }

    /// Swap in a new image; resets the rectangle and the interaction.
    pub fn load(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let bounds = ImageBounds::new(width, height).map_err(js_error)?;
        self.inner.load(bounds);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.rect().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.rect().y
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.rect().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.rect().height
    }

    /// `"idle"`, `"dragging"` or `"resizing"`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().name().to_string()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.inner.contains(Point::new(x, y))
    }

    /// Handle under the pointer, e.g. `"nw"`.
    pub fn hit_test_handle(&self, x: f64, y: f64) -> Option<String> {
        self.inner
            .handle_at(Point::new(x, y), HANDLE_HIT_RADIUS)
            .map(|h| h.as_str().to_string())
    }

    /// Returns whether a drag started (the point was inside the rectangle).
    pub fn begin_drag(&mut self, x: f64, y: f64) -> bool {
        self.inner.begin_drag(Point::new(x, y))
    }

    pub fn begin_resize(&mut self, handle: &str, x: f64, y: f64) -> Result<(), JsValue> {
        let handle: HandleId = handle.parse().map_err(js_error)?;
        self.inner.begin_resize(handle, Point::new(x, y));
        Ok(())
    }

    pub fn update(&mut self, x: f64, y: f64) {
        self.inner.update(Point::new(x, y));
    }

    pub fn end(&mut self) {
        self.inner.end();
    }

    /// Current rectangle rounded to whole pixels.
    pub fn extract(&self) -> JsRegion {
        self.inner.extract().into()
    }

    /// Cut the current region out of `image`.
    pub fn crop(&self, image: &JsDecodedImage) -> Result<JsDecodedImage, JsValue> {
        extract_region(&image.to_decoded(), self.inner.extract())
            .map(JsDecodedImage::from_decoded)
            .map_err(js_error)
    }

    /// Cut the current region out of `image` and encode it as PNG.
    pub fn crop_png(&self, image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
        crop_to_png(&image.to_decoded(), &self.inner.rect()).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(width: u32, height: u32) -> JsCropSession {
        match JsCropSession::new(width, height) {
            Ok(s) => s,
            Err(_) => panic!("valid bounds"),
        }
    }

    #[test]
    fn test_initial_rect() {
        let s = session(800, 600);
        assert_eq!((s.x(), s.y(), s.width(), s.height()), (200.0, 150.0, 400.0, 300.0));
        assert_eq!(s.state(), "idle");
    }

    #[test]
    fn test_drag_round_trip() {
        let mut s = session(800, 600);
        assert!(s.begin_drag(300.0, 300.0));
        assert_eq!(s.state(), "dragging");

        s.update(350.0, 280.0);
        assert_eq!((s.x(), s.y()), (250.0, 130.0));

        s.end();
        s.end();
        assert_eq!(s.state(), "idle");
    }

    #[test]
    fn test_resize_via_handle_name() {
        let mut s = session(800, 600);
        let handle = s.hit_test_handle(600.0, 450.0);
        assert_eq!(handle.as_deref(), Some("se"));

        assert!(s.begin_resize("se", 600.0, 450.0).is_ok());
        assert_eq!(s.state(), "resizing");
        s.update(700.0, 500.0);
        assert_eq!((s.width(), s.height()), (500.0, 350.0));
    }

    #[test]
    fn test_extract_and_crop() {
        let s = session(10, 10);
        let region = s.extract();
        assert_eq!(
            region,
            JsRegion {
                x: 0,
                y: 0,
                width: 10,
                height: 10
            }
        );

        let image = JsDecodedImage::new(10, 10, vec![7u8; 300]);
        let cropped = s.crop(&image).ok().map(|c| (c.width(), c.height()));
        assert_eq!(cropped, Some((10, 10)));
    }

    #[test]
    fn test_load_resets() {
        let mut s = session(800, 600);
        s.begin_drag(300.0, 300.0);
        assert!(s.load(400, 200).is_ok());
        assert_eq!(s.state(), "idle");
        assert_eq!((s.x(), s.y(), s.width(), s.height()), (100.0, 50.0, 200.0, 100.0));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_zero_bounds_rejected() {
        assert!(JsCropSession::new(0, 10).is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_handle_rejected() {
        let mut s = JsCropSession::new(100, 100).unwrap();
        assert!(s.begin_resize("middle", 10.0, 10.0).is_err());
        assert_eq!(s.state(), "idle");
    }
}
