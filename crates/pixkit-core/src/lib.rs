//! Pixkit Core - browser image utilities
//!
//! This crate holds everything the Pixkit tools do to pixels: the
//! interactive crop-rectangle engine, decoding and encoding, compression,
//! format conversion, favicon sets, QR codes with image badges, and
//! image-to-PDF assembly. The WASM crate is a thin binding layer over it.

pub mod compress;
pub mod convert;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod favicon;
pub mod naming;
pub mod pdf;
pub mod qr;

pub use compress::{compress, CompressError, CompressOptions, Compressed, CompressionReport};
pub use convert::{convert, Conversion, ConvertError};
pub use crop::{CropError, CropRect, CropSession, HandleId, ImageBounds, InteractionState, Point};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode, EncodeError, OutputFormat};
pub use favicon::{generate_favicons, FaviconError, FaviconSet};
pub use naming::output_name;
pub use pdf::{build_pdf, PdfError, PdfOptions};
pub use qr::{generate_qr, render_qr_png, OverlayOptions, QrError, QrOptions};

/// Crate version, as reported to the host page.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
