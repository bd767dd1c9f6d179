//! Format-dispatching encoder.

use std::io::Cursor;

use image::DynamicImage;
use log::debug;

use super::{encode_jpeg, encode_webp, EncodeError, OutputFormat};
use crate::decode::DecodedImage;

/// Encode `image` as `format`.
///
/// `quality` (1-100) applies to JPEG and WebP; PNG, GIF and BMP are
/// lossless and ignore it.
pub fn encode(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, quality)?,
        OutputFormat::Webp => encode_webp(&image.pixels, image.width, image.height, quality)?,
        _ => encode_lossless(image, format)?,
    };

    debug!(
        "encoded {}x{} as {} ({} bytes)",
        image.width,
        image.height,
        format,
        bytes.len()
    );
    Ok(bytes)
}

fn encode_lossless(image: &DecodedImage, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    super::validate(&image.pixels, image.width, image.height)?;

    let rgb = image
        .to_rgb_image()
        .ok_or_else(|| EncodeError::EncodingFailed("Failed to create RgbImage".to_string()))?;

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut buffer, format.image_format())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[test]
    fn test_magic_bytes_per_format() {
        let img = gray(16, 16);

        let jpeg = encode(&img, OutputFormat::Jpeg, 80).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode(&img, OutputFormat::Png, 80).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let webp = encode(&img, OutputFormat::Webp, 80).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");

        let gif = encode(&img, OutputFormat::Gif, 80).unwrap();
        assert_eq!(&gif[0..3], b"GIF");

        let bmp = encode(&img, OutputFormat::Bmp, 80).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }

    #[test]
    fn test_lossless_ignores_quality() {
        let img = gray(8, 8);
        let a = encode(&img, OutputFormat::Png, 1).unwrap();
        let b = encode(&img, OutputFormat::Png, 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lossless_rejects_bad_buffer() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0u8; 5],
        };
        assert!(matches!(
            encode(&img, OutputFormat::Png, 100),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }
}
