//! Interactive crop session: the drag/resize state machine.
//!
//! A [`CropSession`] owns the image bounds, the current [`CropRect`] and the
//! [`InteractionState`]. Pointer events are fed in sequentially by the host
//! page; every mutation re-establishes the rectangle invariants:
//!
//! - `x >= 0`, `y >= 0`
//! - `x + width <= bounds.width`, `y + height <= bounds.height`
//! - `width`/`height` never drop below the size floor
//!
//! Deltas are incremental: after each `update` the anchor moves to the
//! pointer, so the next delta is measured from there.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::extract::Region;
use super::geometry::{hit_test_handle, CropRect, HandleId, ImageBounds, Point};

/// What the pointer is currently doing to the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
    },
    Resizing {
        handle: HandleId,
        anchor: Point,
    },
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Dragging { .. } => "dragging",
            InteractionState::Resizing { .. } => "resizing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// Crop editing session for a single loaded image.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSession {
    bounds: ImageBounds,
    rect: CropRect,
    state: InteractionState,
}

impl CropSession {
    /// Start a session for a newly loaded image.
    pub fn new(bounds: ImageBounds) -> Self {
        let rect = CropRect::centered(bounds);
        debug!(
            "crop session: {}x{} image, initial rect {:?}",
            bounds.width(),
            bounds.height(),
            rect
        );
        Self {
            bounds,
            rect,
            state: InteractionState::Idle,
        }
    }

    /// Replace the image. The rectangle is reinitialized and any drag or
    /// resize in progress is dropped.
    pub fn load(&mut self, bounds: ImageBounds) -> CropRect {
        *self = Self::new(bounds);
        self.rect
    }

    pub fn bounds(&self) -> ImageBounds {
        self.bounds
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    /// Handle under `point`, if any.
    pub fn handle_at(&self, point: Point, radius: f64) -> Option<HandleId> {
        hit_test_handle(&self.rect, point, radius)
    }

    /// Start moving the rectangle. Ignored when `point` is outside it.
    ///
    /// Returns whether a drag started.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        if !self.rect.contains(point) {
            return false;
        }
        debug!("crop drag start at ({}, {})", point.x, point.y);
        self.state = InteractionState::Dragging { anchor: point };
        true
    }

    /// Start resizing from `handle`. Handle hit-testing is the caller's job.
    pub fn begin_resize(&mut self, handle: HandleId, point: Point) {
        debug!("crop resize start: {} at ({}, {})", handle, point.x, point.y);
        self.state = InteractionState::Resizing {
            handle,
            anchor: point,
        };
    }

    /// Apply a pointer move and return the resulting rectangle.
    ///
    /// Non-finite points are ignored.
    pub fn update(&mut self, point: Point) -> CropRect {
        if !point.is_finite() {
            return self.rect;
        }

        match self.state {
            InteractionState::Idle => {}
            InteractionState::Dragging { anchor } => {
                self.rect = translate(
                    self.rect,
                    self.bounds,
                    point.x - anchor.x,
                    point.y - anchor.y,
                );
                self.state = InteractionState::Dragging { anchor: point };
            }
            InteractionState::Resizing { handle, anchor } => {
                self.rect = resize(
                    self.rect,
                    self.bounds,
                    handle,
                    point.x - anchor.x,
                    point.y - anchor.y,
                );
                self.state = InteractionState::Resizing {
                    handle,
                    anchor: point,
                };
            }
        }

        trace!("crop rect now {:?}", self.rect);
        self.rect
    }

    /// Pointer released or left the canvas.
    pub fn end(&mut self) {
        if !self.state.is_idle() {
            debug!("crop {} finished with {:?}", self.state.name(), self.rect);
        }
        self.state = InteractionState::Idle;
    }

    /// Whole-pixel region for the extractor.
    pub fn extract(&self) -> Region {
        Region::from_rect(&self.rect, self.bounds)
    }
}

/// Move the rectangle by `(dx, dy)`, keeping it inside the image.
fn translate(rect: CropRect, bounds: ImageBounds, dx: f64, dy: f64) -> CropRect {
    let max_x = bounds.width() as f64 - rect.width;
    let max_y = bounds.height() as f64 - rect.height;

    CropRect {
        x: (rect.x + dx).min(max_x).max(0.0),
        y: (rect.y + dy).min(max_y).max(0.0),
        ..rect
    }
}

/// Move the edges controlled by `handle` by `(dx, dy)`.
///
/// Left/top edges are floored at 0 and sizes at the minimum. A size larger
/// than the image is capped, then the origin is pulled back so the
/// rectangle fits.
fn resize(rect: CropRect, bounds: ImageBounds, handle: HandleId, dx: f64, dy: f64) -> CropRect {
    let bound_w = bounds.width() as f64;
    let bound_h = bounds.height() as f64;

    let mut x = rect.x;
    let mut y = rect.y;
    let mut width = rect.width;
    let mut height = rect.height;

    if handle.moves_left() {
        x = (rect.x + dx).max(0.0);
        width = rect.width - dx;
    } else if handle.moves_right() {
        width = rect.width + dx;
    }

    if handle.moves_top() {
        y = (rect.y + dy).max(0.0);
        height = rect.height - dy;
    } else if handle.moves_bottom() {
        height = rect.height + dy;
    }

    let width = width.max(bounds.min_width()).min(bound_w);
    let height = height.max(bounds.min_height()).min(bound_h);

    CropRect {
        x: x.min(bound_w - width).max(0.0),
        y: y.min(bound_h - height).max(0.0),
        width,
        height,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
