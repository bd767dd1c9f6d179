//! The compression tool: re-encode an upload at a chosen quality and format.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode, EncodeError, OutputFormat};

/// Errors from the compression tool.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Quality must be between 1 and 100, got {0}")]
    InvalidQuality(u8),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Compression settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
    /// 1-100, higher keeps more detail.
    pub quality: u8,
    pub format: OutputFormat,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            quality: 80,
            format: OutputFormat::Webp,
        }
    }
}

impl CompressOptions {
    pub fn validate(&self) -> Result<(), CompressError> {
        if !(1..=100).contains(&self.quality) {
            return Err(CompressError::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

/// Size comparison shown next to the download button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percentage saved, never negative.
    pub reduction_percent: f64,
    pub format: OutputFormat,
}

impl CompressionReport {
    pub fn new(original_size: u64, compressed_size: u64, format: OutputFormat) -> Self {
        let reduction_percent = if original_size == 0 {
            0.0
        } else {
            let saved = original_size as f64 - compressed_size as f64;
            (saved / original_size as f64 * 100.0).max(0.0)
        };

        Self {
            original_size,
            compressed_size,
            reduction_percent,
            format,
        }
    }
}

/// Encoded output plus its report.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub report: CompressionReport,
}

/// Decode `bytes` and re-encode them per `options`.
pub fn compress(bytes: &[u8], options: &CompressOptions) -> Result<Compressed, CompressError> {
    options.validate()?;

    let image = decode_image(bytes)?;
    let encoded = encode(&image, options.format, options.quality)?;
    let report = CompressionReport::new(bytes.len() as u64, encoded.len() as u64, options.format);

    debug!(
        "compressed {} -> {} bytes as {} at quality {} ({:.1}% smaller)",
        report.original_size,
        report.compressed_size,
        options.format,
        options.quality,
        report.reduction_percent
    );

    Ok(Compressed {
        bytes: encoded,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodedImage;

    fn busy_image(width: u32, height: u32) -> DecodedImage {
        let pixels = (0..(width * height * 3) as usize)
            .map(|i| ((i * 31 + i / 5) % 256) as u8)
            .collect();
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_defaults() {
        let options = CompressOptions::default();
        assert_eq!(options.quality, 80);
        assert_eq!(options.format, OutputFormat::Webp);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: CompressOptions = serde_json::from_str(r#"{"format":"jpeg"}"#).unwrap();
        assert_eq!(options.quality, 80);
        assert_eq!(options.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_rejects_quality_out_of_range() {
        let options = CompressOptions {
            quality: 0,
            ..Default::default()
        };
        assert!(matches!(
            compress(&[], &options),
            Err(CompressError::InvalidQuality(0))
        ));

        let options = CompressOptions {
            quality: 101,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_png_to_jpeg_shrinks() {
        let png = encode(&busy_image(64, 64), OutputFormat::Png, 100).unwrap();
        let options = CompressOptions {
            quality: 40,
            format: OutputFormat::Jpeg,
        };
        let result = compress(&png, &options).unwrap();

        assert_eq!(&result.bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(result.report.original_size, png.len() as u64);
        assert_eq!(result.report.compressed_size, result.bytes.len() as u64);
        assert!(result.report.reduction_percent > 0.0);
    }

    #[test]
    fn test_webp_quality_trades_size() {
        let mut seed: u32 = 0x9e37_79b9;
        let pixels = (0..48 * 48 * 3)
            .map(|_| {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (seed >> 24) as u8
            })
            .collect();
        let png = encode(&DecodedImage::new(48, 48, pixels), OutputFormat::Png, 100).unwrap();

        let at = |quality| {
            let options = CompressOptions {
                quality,
                ..Default::default()
            };
            compress(&png, &options).unwrap()
        };
        let high = at(100);
        let low = at(20);

        assert_eq!(&low.bytes[8..12], b"WEBP");
        assert!(low.bytes.len() < high.bytes.len());
        assert!(low.report.reduction_percent >= high.report.reduction_percent);
    }

    #[test]
    fn test_invalid_bytes() {
        let result = compress(b"not an image", &CompressOptions::default());
        assert!(matches!(result, Err(CompressError::Decode(_))));
    }

    #[test]
    fn test_report_never_negative() {
        let report = CompressionReport::new(100, 250, OutputFormat::Png);
        assert_eq!(report.reduction_percent, 0.0);

        let report = CompressionReport::new(200, 50, OutputFormat::Jpeg);
        assert!((report.reduction_percent - 75.0).abs() < 1e-9);

        let report = CompressionReport::new(0, 10, OutputFormat::Jpeg);
        assert_eq!(report.reduction_percent, 0.0);
    }
}
