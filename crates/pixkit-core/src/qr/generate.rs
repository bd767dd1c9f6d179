//! QR code rasterization.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use super::QrError;
use crate::decode::DecodedImage;

pub const MIN_QR_SIZE: u32 = 100;
pub const MAX_QR_SIZE: u32 = 1000;

/// Light modules around the code, per side.
pub const QUIET_ZONE: usize = 4;

const DARK: [u8; 3] = [0, 0, 0];
const LIGHT: [u8; 3] = [255, 255, 255];

/// Error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% recovery.
    #[serde(rename = "L")]
    Low,
    /// ~15% recovery.
    #[default]
    #[serde(rename = "M")]
    Medium,
    /// ~25% recovery.
    #[serde(rename = "Q")]
    Quartile,
    /// ~30% recovery.
    #[serde(rename = "H")]
    High,
}

impl ErrorCorrection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "L",
            Self::Medium => "M",
            Self::Quartile => "Q",
            Self::High => "H",
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::Medium => EcLevel::M,
            Self::Quartile => EcLevel::Q,
            Self::High => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCorrection {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::Low),
            "M" => Ok(Self::Medium),
            "Q" => Ok(Self::Quartile),
            "H" => Ok(Self::High),
            _ => Err(QrError::UnknownLevel(s.to_string())),
        }
    }
}

/// QR generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrOptions {
    /// Text or URL to encode.
    pub content: String,
    /// Output edge length in pixels.
    pub size: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            content: String::new(),
            size: 300,
            error_correction: ErrorCorrection::default(),
        }
    }
}

impl QrOptions {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    pub fn validate(&self) -> Result<(), QrError> {
        if self.content.is_empty() {
            return Err(QrError::EmptyContent);
        }
        if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&self.size) {
            return Err(QrError::InvalidSize(self.size));
        }
        Ok(())
    }
}

/// Render `options.content` as black modules on white, quiet zone
/// included, scaled to exactly `size x size` pixels.
pub fn generate_qr(options: &QrOptions) -> Result<DecodedImage, QrError> {
    options.validate()?;

    let code = QrCode::with_error_correction_level(
        options.content.as_bytes(),
        options.error_correction.ec_level(),
    )
    .map_err(|e| QrError::Encode(e.to_string()))?;

    let modules = code.width();
    let colors = code.to_colors();
    let total = modules + 2 * QUIET_ZONE;
    let size = options.size as usize;

    if size < total {
        warn!("QR code has {total} modules but only {size} pixels; modules will be dropped");
    }

    let is_dark = |module_x: usize, module_y: usize| -> bool {
        if module_x < QUIET_ZONE || module_y < QUIET_ZONE {
            return false;
        }
        let (x, y) = (module_x - QUIET_ZONE, module_y - QUIET_ZONE);
        x < modules && y < modules && colors[y * modules + x] == Color::Dark
    };

    let mut pixels = Vec::with_capacity(size * size * 3);
    for py in 0..size {
        let module_y = py * total / size;
        for px in 0..size {
            let module_x = px * total / size;
            pixels.extend_from_slice(if is_dark(module_x, module_y) { &DARK } else { &LIGHT });
        }
    }

    debug!(
        "generated {}x{} QR ({} modules, level {})",
        size, size, modules, options.error_correction
    );

    Ok(DecodedImage::new(options.size, options.size, pixels))
}
