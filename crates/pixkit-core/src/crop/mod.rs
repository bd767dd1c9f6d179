//! Crop editor: interactive rectangle geometry and region extraction.
//!
//! The crop tool shows the loaded image with a movable, resizable selection
//! rectangle on top. This module owns everything about that rectangle except
//! drawing it:
//!
//! - [`geometry`] - points, bounds, the rectangle and its eight handles
//! - [`session`] - the `Idle` / `Dragging` / `Resizing` state machine
//! - [`extract`] - whole-pixel regions and pixel extraction
//!
//! # Coordinate System
//!
//! Every coordinate is in image pixels with the origin at the top-left
//! corner. The host page converts pointer positions from display space
//! before calling in; the engine never sees screen coordinates.

mod extract;
mod geometry;
mod session;

pub use extract::{crop_to_png, extract_region, Region};
pub use geometry::{
    hit_test_handle, CropRect, HandleId, ImageBounds, Point, HANDLE_HIT_RADIUS, MIN_SIZE,
};
pub use session::{CropSession, InteractionState};

use thiserror::Error;

use crate::encode::EncodeError;

/// Errors from the crop editor.
///
/// Pointer input is never an error; it is clamped. Only loading an image
/// and exchanging data with the host can fail.
#[derive(Debug, Error)]
pub enum CropError {
    /// An image with a zero dimension was loaded.
    #[error("Invalid image bounds: {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },

    /// The host passed a handle name that is not one of the eight handles.
    #[error("Unknown resize handle: {0}")]
    UnknownHandle(String),

    /// The region does not fit inside the image it is extracted from.
    #[error("Region {region:?} exceeds image bounds {width}x{height}")]
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },

    /// Encoding the cropped image failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
