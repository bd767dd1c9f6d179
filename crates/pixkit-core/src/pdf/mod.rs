//! Image-to-PDF assembly.
//!
//! [`layout`] decides where every image goes (in millimetres, top-left
//! origin); [`write_pdf`] turns that layout into a PDF document.

mod layout;
mod writer;

use log::debug;
use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::EncodeError;

pub use layout::{
    layout, DocumentLayout, PageLayout, PageOrientation, PageSize, PdfOptions, Placement,
    IMAGE_GAP_MM, MARGIN_MM,
};
pub use writer::{write_layout, write_pdf, PDF_JPEG_QUALITY};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("At least one image is required")]
    NoImages,

    #[error("Image {index} has invalid dimensions {width}x{height}")]
    InvalidImage { index: usize, width: u32, height: u32 },

    #[error("Layout references image {0}, which was not provided")]
    MissingImage(usize),

    #[error("Failed to write PDF: {0}")]
    Write(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Decode every upload, in order, and write them into one PDF.
pub fn build_pdf<B: AsRef<[u8]>>(files: &[B], options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    let images = files
        .iter()
        .map(|bytes| decode_image(bytes.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("building {} from {} images", options.file_name(), images.len());
    write_pdf(&images, options)
}
