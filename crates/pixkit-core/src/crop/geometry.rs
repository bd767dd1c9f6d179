//! Geometry primitives for the crop editor.
//!
//! All coordinates are in image pixel space. The host page is responsible for
//! translating pointer positions from screen/display space before handing
//! them to the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CropError;

/// Minimum crop rectangle edge length in pixels.
pub const MIN_SIZE: f64 = 50.0;

/// Default half-size of the square hot-zone around each resize handle.
///
/// The host page draws 12px handle dots centered on the rectangle's corners
/// and edge midpoints.
pub const HANDLE_HIT_RADIUS: f64 = 6.0;

/// A pointer position in image pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel dimensions of the loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBounds {
    width: u32,
    height: u32,
}

impl ImageBounds {
    /// Create bounds for a loaded image. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// Size floor along the horizontal axis.
    ///
    /// Images narrower than [`MIN_SIZE`] cannot hold a 50px rectangle, so the
    /// floor shrinks to the image width.
    #[inline]
    pub fn min_width(self) -> f64 {
        MIN_SIZE.min(self.width as f64)
    }

    /// Size floor along the vertical axis.
    #[inline]
    pub fn min_height(self) -> f64 {
        MIN_SIZE.min(self.height as f64)
    }
}

/// The crop selection, in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Initial selection for a freshly loaded image: half the width and
    /// height, offset by a quarter on each axis.
    ///
    /// For images smaller than twice [`MIN_SIZE`] on an axis the size is
    /// raised to the floor and the offset pulled back so the rectangle stays
    /// inside the image.
    pub fn centered(bounds: ImageBounds) -> Self {
        let w = bounds.width() as f64;
        let h = bounds.height() as f64;

        let width = (w * 0.5).max(bounds.min_width());
        let height = (h * 0.5).max(bounds.min_height());

        Self {
            x: (w * 0.25).min(w - width).max(0.0),
            y: (h * 0.25).min(h - height).max(0.0),
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Hit test against the closed rectangle (edges count as inside).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Center of the handle's hot-zone.
    pub fn handle_position(&self, handle: HandleId) -> Point {
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;
        match handle {
            HandleId::NW => Point::new(self.x, self.y),
            HandleId::N => Point::new(cx, self.y),
            HandleId::NE => Point::new(self.right(), self.y),
            HandleId::W => Point::new(self.x, cy),
            HandleId::E => Point::new(self.right(), cy),
            HandleId::SW => Point::new(self.x, self.bottom()),
            HandleId::S => Point::new(cx, self.bottom()),
            HandleId::SE => Point::new(self.right(), self.bottom()),
        }
    }

    /// Whether the rectangle satisfies the containment and size-floor
    /// invariants for `bounds`.
    pub fn is_valid_for(&self, bounds: ImageBounds) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= bounds.width() as f64
            && self.bottom() <= bounds.height() as f64
            && self.width >= bounds.min_width()
            && self.height >= bounds.min_height()
    }
}

/// One of the eight resize handles: four corners and four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    NW,
    N,
    NE,
    W,
    E,
    SW,
    S,
    SE,
}

impl HandleId {
    /// Every handle, corners before edges so that overlapping hot-zones on a
    /// small rectangle resolve to the corner.
    pub const ALL: [HandleId; 8] = [
        HandleId::NW,
        HandleId::NE,
        HandleId::SW,
        HandleId::SE,
        HandleId::N,
        HandleId::W,
        HandleId::E,
        HandleId::S,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HandleId::NW => "nw",
            HandleId::N => "n",
            HandleId::NE => "ne",
            HandleId::W => "w",
            HandleId::E => "e",
            HandleId::SW => "sw",
            HandleId::S => "s",
            HandleId::SE => "se",
        }
    }

    /// Handle moves the left edge.
    #[inline]
    pub fn moves_left(self) -> bool {
        matches!(self, HandleId::NW | HandleId::W | HandleId::SW)
    }

    /// Handle moves the right edge.
    #[inline]
    pub fn moves_right(self) -> bool {
        matches!(self, HandleId::NE | HandleId::E | HandleId::SE)
    }

    /// Handle moves the top edge.
    #[inline]
    pub fn moves_top(self) -> bool {
        matches!(self, HandleId::NW | HandleId::N | HandleId::NE)
    }

    /// Handle moves the bottom edge.
    #[inline]
    pub fn moves_bottom(self) -> bool {
        matches!(self, HandleId::SW | HandleId::S | HandleId::SE)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleId {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nw" => Ok(HandleId::NW),
            "n" => Ok(HandleId::N),
            "ne" => Ok(HandleId::NE),
            "w" => Ok(HandleId::W),
            "e" => Ok(HandleId::E),
            "sw" => Ok(HandleId::SW),
            "s" => Ok(HandleId::S),
            "se" => Ok(HandleId::SE),
            _ => Err(CropError::UnknownHandle(s.to_string())),
        }
    }
}

/// Find the handle whose square hot-zone of half-size `radius` contains
/// `point`.
pub fn hit_test_handle(rect: &CropRect, point: Point, radius: f64) -> Option<HandleId> {
    if !point.is_finite() {
        return None;
    }
    HandleId::ALL.into_iter().find(|&handle| {
        let center = rect.handle_position(handle);
        (point.x - center.x).abs() <= radius && (point.y - center.y).abs() <= radius
    })
}
