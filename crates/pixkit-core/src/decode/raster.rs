//! Raster image decoding with EXIF orientation handling.
//!
//! Uploaded files are sniffed by their magic bytes rather than trusted by
//! extension, so a `.jpg` that is really a PNG still decodes.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};
use log::debug;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an uploaded image, applying EXIF orientation correction.
///
/// Supports every format the `image` crate is built with here: JPEG, PNG,
/// WebP, GIF (first frame), BMP and ICO. Alpha is discarded.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image, `DecodeError::CorruptedFile` if decoding fails part-way.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);

    let decoded = DecodedImage::from_rgb_image(oriented.into_rgb8());
    debug!(
        "decoded {}x{} image ({} bytes, orientation {:?})",
        decoded.width,
        decoded.height,
        bytes.len(),
        orientation
    );
    Ok(decoded)
}

/// Decode without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = read_dynamic(bytes)?;
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

/// Sniff the container format from the leading bytes.
///
/// Returns the canonical lowercase extension (`"jpg"`, `"png"`, `"webp"`,
/// ...) or `None` if the bytes are not a known image format.
pub fn detect_format(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;
    format.extensions_str().first().copied()
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !is_decodable(format) {
        return Err(DecodeError::UnsupportedFormat(format!("{format:?}")));
    }

    ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn is_decodable(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg
            | ImageFormat::Png
            | ImageFormat::WebP
            | ImageFormat::Gif
            | ImageFormat::Bmp
            | ImageFormat::Ico
    )
}

/// Read the EXIF orientation tag.
///
/// Returns `Orientation::Normal` if there is no EXIF block or no tag.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// EXIF orientation of an uploaded file (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
