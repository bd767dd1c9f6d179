//! The format converter.

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode, EncodeError, OutputFormat};
use crate::naming::{file_extension, output_name};

/// Errors from the format converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Quality used when the target format is lossy.
pub const CONVERT_QUALITY: u8 = 95;

/// Result of a conversion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Extension of the uploaded file, or `"unknown"`.
    pub original_format: String,
    pub new_format: OutputFormat,
    /// Suggested download name, `{stem}.{new_format}`.
    pub file_name: String,
}

/// Decode `bytes` and encode them as `target`.
pub fn convert(
    bytes: &[u8],
    original_name: &str,
    target: OutputFormat,
) -> Result<Conversion, ConvertError> {
    let image = decode_image(bytes)?;
    let encoded = encode(&image, target, CONVERT_QUALITY)?;
    let original_format = file_extension(original_name);

    debug!(
        "converted {} from {} to {} ({} -> {} bytes)",
        original_name,
        original_format,
        target,
        bytes.len(),
        encoded.len()
    );

    Ok(Conversion {
        bytes: encoded,
        original_format,
        new_format: target,
        file_name: output_name(original_name, "", target.extension()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{detect_format, DecodedImage};

    fn png() -> Vec<u8> {
        let image = DecodedImage::new(6, 4, vec![90u8; 6 * 4 * 3]);
        encode(&image, OutputFormat::Png, 100).unwrap()
    }

    #[test]
    fn test_png_to_each_format() {
        let source = png();
        for target in OutputFormat::ALL {
            let result = convert(&source, "logo.png", target).unwrap();
            assert_eq!(result.original_format, "png");
            assert_eq!(result.new_format, target);

            let decoded = decode_image(&result.bytes).unwrap();
            assert_eq!((decoded.width, decoded.height), (6, 4));
        }
    }

    #[test]
    fn test_detects_written_format() {
        let result = convert(&png(), "logo.png", OutputFormat::Gif).unwrap();
        assert_eq!(detect_format(&result.bytes), Some("gif"));
    }

    #[test]
    fn test_file_name_and_unknown_format() {
        let result = convert(&png(), "diagram", OutputFormat::Jpeg).unwrap();
        assert_eq!(result.original_format, "unknown");
        assert_eq!(result.file_name, "diagram.jpeg");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            convert(&[0u8; 16], "x.png", OutputFormat::Png),
            Err(ConvertError::Decode(_))
        ));
    }
}
