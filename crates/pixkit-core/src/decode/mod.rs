//! Image decoding pipeline for Pixkit.
//!
//! This module provides functionality for:
//! - Decoding uploaded JPEG, PNG, WebP, GIF, BMP and ICO files
//! - EXIF orientation correction
//! - Image resizing, including the resize tool's aspect-linked dimensions
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from the browser via WASM
//! bindings. All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use pixkit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod resize;
mod types;

pub use raster::{decode_image, decode_image_no_orientation, detect_format, get_orientation};
pub use resize::{
    linked_height, linked_width, resize, resize_image, resize_to_fit, ResizeError, ResizeOptions,
    ResizeOutcome,
};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
