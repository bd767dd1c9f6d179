//! Centered image badge over a QR code.
//!
//! Shapes are rasterized by signed distance, sampled at pixel centers.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::QrError;
use crate::decode::{resize, DecodedImage, FilterType};

/// Gap between the overlay and the outer edge of its badge.
pub const BORDER_PADDING: u32 = 6;

const MIN_OVERLAY_PX: u32 = 8;
const WHITE: Rgb = [255, 255, 255];

pub type Rgb = [u8; 3];

/// Badge shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayStyle {
    #[default]
    Circle,
    Rounded,
    Square,
}

impl OverlayStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rounded => "rounded",
            Self::Square => "square",
        }
    }
}

impl fmt::Display for OverlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayStyle {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "rounded" => Ok(Self::Rounded),
            "square" => Ok(Self::Square),
            _ => Err(QrError::UnknownStyle(s.to_string())),
        }
    }
}

/// Badge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayOptions {
    /// Overlay edge as a fraction of the QR edge.
    pub scale: f64,
    pub style: OverlayStyle,
    /// `#rrggbb` or `#rgb`.
    pub border_color: String,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            scale: 0.2,
            style: OverlayStyle::default(),
            border_color: "#000000".to_string(),
        }
    }
}

impl OverlayOptions {
    pub fn validate(&self) -> Result<Rgb, QrError> {
        if !(0.0..=1.0).contains(&self.scale) {
            return Err(QrError::InvalidScale(self.scale));
        }
        parse_hex_color(&self.border_color)
    }
}

/// Parse `#rrggbb` or `#rgb` (leading `#` optional).
pub fn parse_hex_color(input: &str) -> Result<Rgb, QrError> {
    let invalid = || QrError::InvalidColor(input.to_string());
    let hex = input.trim().trim_start_matches('#');

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match hex.len() {
        6 => Ok([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, i) in rgb.iter_mut().zip(0..3) {
                *slot = channel(&hex[i..i + 1])? * 17;
            }
            Ok(rgb)
        }
        _ => Err(invalid()),
    }
}

/// Pixel measurements of the badge for a given QR size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    /// Edge of the overlay image.
    pub overlay_px: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub line_width: u32,
    /// Corner radius; 0 for circle and square.
    pub radius: u32,
}

impl OverlayGeometry {
    pub fn new(width: u32, height: u32, options: &OverlayOptions) -> Self {
        let size = width.min(height);
        let overlay_px = ((size as f64 * options.scale).floor() as u32).max(MIN_OVERLAY_PX);
        let radius = match options.style {
            OverlayStyle::Rounded => (overlay_px as f64 * 0.15).floor() as u32,
            OverlayStyle::Circle | OverlayStyle::Square => 0,
        };

        Self {
            overlay_px,
            offset_x: width.saturating_sub(overlay_px) / 2,
            offset_y: height.saturating_sub(overlay_px) / 2,
            line_width: ((overlay_px as f64 * 0.08).floor() as u32).max(2),
            radius,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    RoundedRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        r: f64,
    },
}

impl Shape {
    /// Negative inside, positive outside.
    fn distance(&self, px: f64, py: f64) -> f64 {
        match *self {
            Shape::Circle { cx, cy, r } => (px - cx).hypot(py - cy) - r,
            Shape::RoundedRect { x, y, w, h, r } => {
                let r = r.clamp(0.0, w.min(h) / 2.0);
                let qx = (px - (x + w / 2.0)).abs() - (w / 2.0 - r);
                let qy = (py - (y + h / 2.0)).abs() - (h / 2.0 - r);
                qx.max(0.0).hypot(qy.max(0.0)) + qx.max(qy).min(0.0) - r
            }
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        self.distance(px, py) <= 0.0
    }

    fn on_stroke(&self, px: f64, py: f64, line_width: f64) -> bool {
        self.distance(px, py).abs() <= line_width / 2.0
    }
}

struct Badge {
    outer: Shape,
    stroke: Shape,
    inner: Shape,
}

impl Badge {
    fn new(width: u32, height: u32, style: OverlayStyle, g: &OverlayGeometry) -> Self {
        let pad = BORDER_PADDING as f64;
        let lw = g.line_width as f64;
        let px = g.overlay_px as f64;

        match style {
            OverlayStyle::Circle => {
                let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
                let half = px / 2.0;
                Self {
                    outer: Shape::Circle { cx, cy, r: half + pad },
                    stroke: Shape::Circle {
                        cx,
                        cy,
                        r: half + pad - lw / 2.0,
                    },
                    inner: Shape::Circle { cx, cy, r: half },
                }
            }
            OverlayStyle::Rounded | OverlayStyle::Square => {
                let r = g.radius as f64;
                let (ox, oy) = (g.offset_x as f64, g.offset_y as f64);
                let (x, y, side) = (ox - pad, oy - pad, px + pad * 2.0);
                Self {
                    outer: Shape::RoundedRect {
                        x,
                        y,
                        w: side,
                        h: side,
                        r,
                    },
                    stroke: Shape::RoundedRect {
                        x: x + lw / 2.0,
                        y: y + lw / 2.0,
                        w: side - lw,
                        h: side - lw,
                        r,
                    },
                    inner: Shape::RoundedRect {
                        x: ox,
                        y: oy,
                        w: px,
                        h: px,
                        r,
                    },
                }
            }
        }
    }
}

/// Paint `overlay` in a badge at the center of `qr`.
///
/// Order: white badge, border stroke, then the overlay stretched to
/// `overlay_px` square and clipped to the inner shape.
pub fn compose_overlay(
    qr: &DecodedImage,
    overlay: &DecodedImage,
    options: &OverlayOptions,
) -> Result<DecodedImage, QrError> {
    let border = options.validate()?;
    let geometry = OverlayGeometry::new(qr.width, qr.height, options);
    let badge = Badge::new(qr.width, qr.height, options.style, &geometry);
    let scaled = resize(overlay, geometry.overlay_px, geometry.overlay_px, FilterType::Lanczos3)?;

    let mut out = qr.clone();
    let line_width = geometry.line_width as f64;

    for y in 0..qr.height {
        for x in 0..qr.width {
            let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
            if !badge.outer.contains(cx, cy) {
                continue;
            }

            let mut color = WHITE;
            if badge.stroke.on_stroke(cx, cy, line_width) {
                color = border;
            }
            if badge.inner.contains(cx, cy) {
                if let Some(sample) = sample(&scaled, x, y, &geometry) {
                    color = sample;
                }
            }

            let i = ((y * qr.width + x) * 3) as usize;
            out.pixels[i..i + 3].copy_from_slice(&color);
        }
    }

    debug!(
        "composed {}px {} overlay onto {}x{} QR",
        geometry.overlay_px, options.style, qr.width, qr.height
    );

    Ok(out)
}

fn sample(scaled: &DecodedImage, x: u32, y: u32, g: &OverlayGeometry) -> Option<Rgb> {
    let sx = x.checked_sub(g.offset_x)?;
    let sy = y.checked_sub(g.offset_y)?;
    if sx >= scaled.width || sy >= scaled.height {
        return None;
    }
    let i = ((sy * scaled.width + sx) * 3) as usize;
    Some([scaled.pixels[i], scaled.pixels[i + 1], scaled.pixels[i + 2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = [0, 200, 0];

    fn qr_stub(size: u32) -> DecodedImage {
        DecodedImage::new(size, size, vec![0u8; (size * size * 3) as usize])
    }

    fn green(size: u32) -> DecodedImage {
        DecodedImage::new(size, size, GREEN.repeat((size * size) as usize))
    }

    fn pixel(image: &DecodedImage, x: u32, y: u32) -> Rgb {
        let i = ((y * image.width + x) * 3) as usize;
        [image.pixels[i], image.pixels[i + 1], image.pixels[i + 2]]
    }

    fn options(style: OverlayStyle, border: &str) -> OverlayOptions {
        OverlayOptions {
            style,
            border_color: border.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_geometry_default_300() {
        let g = OverlayGeometry::new(300, 300, &OverlayOptions::default());
        assert_eq!(g.overlay_px, 60);
        assert_eq!((g.offset_x, g.offset_y), (120, 120));
        assert_eq!(g.line_width, 4);
        assert_eq!(g.radius, 0);
    }

    #[test]
    fn test_geometry_floors() {
        let tiny = OverlayOptions {
            scale: 0.01,
            ..Default::default()
        };
        let g = OverlayGeometry::new(100, 100, &tiny);
        assert_eq!(g.overlay_px, 8);
        assert_eq!(g.offset_x, 46);
        assert_eq!(g.line_width, 2);
    }

    #[test]
    fn test_geometry_rounded_radius() {
        let g = OverlayGeometry::new(500, 500, &options(OverlayStyle::Rounded, "#000"));
        assert_eq!(g.overlay_px, 100);
        assert_eq!(g.radius, 15);
        assert_eq!(g.line_width, 8);
    }

    #[test]
    fn test_circle_layers() {
        let qr = qr_stub(300);
        let out =
            compose_overlay(&qr, &green(10), &options(OverlayStyle::Circle, "#ff0000")).unwrap();

        // Center shows the overlay
        let center = pixel(&out, 150, 150);
        assert!(center[1] > 190 && center[0] < 10, "got {center:?}");
        // Outer ring (radius 36, stroke centered at 34, width 4)
        assert_eq!(pixel(&out, 150 + 34, 150), [255, 0, 0]);
        // Between overlay (r 30) and stroke (32..36): white
        assert_eq!(pixel(&out, 150 + 31, 150), WHITE);
        // Outside the badge: untouched
        assert_eq!(pixel(&out, 150 + 40, 150), [0, 0, 0]);
        // Inside the overlay square but outside the clip circle
        assert_eq!(pixel(&out, 128, 128), WHITE);
    }

    #[test]
    fn test_square_layers() {
        let qr = qr_stub(300);
        let out = compose_overlay(&qr, &green(60), &options(OverlayStyle::Square, "#00f")).unwrap();

        // Overlay corner kept for square style
        assert_eq!(pixel(&out, 120, 120), GREEN);
        // Badge spans 114..186, stroke along its inside edge
        assert_eq!(pixel(&out, 115, 150), [0, 0, 255]);
        assert_eq!(pixel(&out, 118, 150), WHITE);
        assert_eq!(pixel(&out, 113, 150), [0, 0, 0]);
    }

    #[test]
    fn test_rounded_clips_overlay_corner() {
        let qr = qr_stub(300);
        let out =
            compose_overlay(&qr, &green(60), &options(OverlayStyle::Rounded, "#000000")).unwrap();

        // radius 9: the very corner of the overlay is clipped to white
        assert_eq!(pixel(&out, 120, 120), WHITE);
        assert_eq!(pixel(&out, 150, 150), GREEN);
    }

    #[test]
    fn test_size_unchanged() {
        let qr = qr_stub(257);
        let out = compose_overlay(&qr, &green(33), &OverlayOptions::default()).unwrap();
        assert_eq!((out.width, out.height), (257, 257));
    }

    #[test]
    fn test_rejects_bad_options() {
        let qr = qr_stub(100);
        let bad_scale = OverlayOptions {
            scale: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            compose_overlay(&qr, &green(8), &bad_scale),
            Err(QrError::InvalidScale(_))
        ));
        assert!(matches!(
            compose_overlay(&qr, &green(8), &options(OverlayStyle::Circle, "red")),
            Err(QrError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000000").unwrap(), [0, 0, 0]);
        assert_eq!(parse_hex_color("#1a2B3c").unwrap(), [0x1a, 0x2b, 0x3c]);
        assert_eq!(parse_hex_color("#fff").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex_color("f80").unwrap(), [0xff, 0x88, 0x00]);
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("Rounded".parse::<OverlayStyle>().unwrap(), OverlayStyle::Rounded);
        assert!("hexagon".parse::<OverlayStyle>().is_err());
    }
}
