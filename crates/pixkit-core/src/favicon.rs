//! Favicon set generation.
//!
//! One upload becomes the six PNG icons browsers and home screens ask for,
//! a multi-size `favicon.ico`, a `site.webmanifest` and an HTML snippet.
//! [`FaviconSet::to_zip`] bundles them for a single download.

use std::io::{Cursor, Write};

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::ExtendedColorType;
use log::debug;
use serde::Serialize;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::decode::{decode_image, resize, DecodeError, DecodedImage, FilterType};
use crate::encode::{encode, EncodeError, OutputFormat};

/// Icon sizes and the file each one is written to.
pub const FAVICON_SIZES: [(u32, &str); 6] = [
    (16, "favicon-16x16.png"),
    (32, "favicon-32x32.png"),
    (48, "favicon-48x48.png"),
    (180, "apple-touch-icon.png"),
    (192, "android-chrome-192x192.png"),
    (512, "android-chrome-512x512.png"),
];

/// Sizes packed into `favicon.ico`.
const ICO_SIZES: [u32; 3] = [16, 32, 48];

pub const ICO_FILE_NAME: &str = "favicon.ico";
pub const MANIFEST_FILE_NAME: &str = "site.webmanifest";
pub const SNIPPET_FILE_NAME: &str = "installation.html";
pub const ZIP_FILE_NAME: &str = "favicons.zip";

const INSTALLATION_HTML: &str = r#"<!-- Place these tags in the <head> of your HTML -->
<link rel="apple-touch-icon" sizes="180x180" href="/apple-touch-icon.png">
<link rel="icon" type="image/png" sizes="32x32" href="/favicon-32x32.png">
<link rel="icon" type="image/png" sizes="16x16" href="/favicon-16x16.png">
<link rel="manifest" href="/site.webmanifest">"#;

#[derive(Debug, Error)]
pub enum FaviconError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("ICO encoding failed: {0}")]
    Ico(String),

    #[error("Failed to build zip: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to write zip entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// One generated file.
#[derive(Debug, Clone)]
pub struct FaviconFile {
    pub file_name: &'static str,
    /// Edge length in pixels; `None` for the ICO.
    pub size: Option<u32>,
    pub bytes: Vec<u8>,
}

impl FaviconFile {
    /// Label shown in the file list, e.g. `32x32` or `ico`.
    pub fn label(&self) -> String {
        match self.size {
            Some(size) => format!("{size}x{size}"),
            None => "ico".to_string(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self.size {
            Some(_) => "image/png",
            None => "image/x-icon",
        }
    }
}

#[derive(Debug, Serialize)]
struct ManifestIcon {
    src: &'static str,
    sizes: &'static str,
    #[serde(rename = "type")]
    mime_type: &'static str,
}

#[derive(Debug, Serialize)]
struct WebManifest {
    name: &'static str,
    short_name: &'static str,
    icons: [ManifestIcon; 2],
    theme_color: &'static str,
    background_color: &'static str,
    display: &'static str,
}

impl Default for WebManifest {
    fn default() -> Self {
        Self {
            name: "",
            short_name: "",
            icons: [
                ManifestIcon {
                    src: "/android-chrome-192x192.png",
                    sizes: "192x192",
                    mime_type: "image/png",
                },
                ManifestIcon {
                    src: "/android-chrome-512x512.png",
                    sizes: "512x512",
                    mime_type: "image/png",
                },
            ],
            theme_color: "#ffffff",
            background_color: "#ffffff",
            display: "standalone",
        }
    }
}

/// The six PNG icons plus the ICO, in display order.
#[derive(Debug, Clone)]
pub struct FaviconSet {
    files: Vec<FaviconFile>,
}

impl FaviconSet {
    pub fn files(&self) -> &[FaviconFile] {
        &self.files
    }

    pub fn get(&self, file_name: &str) -> Option<&FaviconFile> {
        self.files.iter().find(|f| f.file_name == file_name)
    }

    pub fn ico(&self) -> Option<&[u8]> {
        self.get(ICO_FILE_NAME).map(|f| f.bytes.as_slice())
    }

    /// Pretty-printed `site.webmanifest`.
    pub fn manifest(&self) -> Result<String, FaviconError> {
        Ok(serde_json::to_string_pretty(&WebManifest::default())?)
    }

    /// `<head>` tags for the generated files.
    pub fn installation_html(&self) -> &'static str {
        INSTALLATION_HTML
    }

    /// Every file plus the manifest and snippet as one deflated zip.
    pub fn to_zip(&self) -> Result<Vec<u8>, FaviconError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for file in &self.files {
            zip.start_file(file.file_name, options)?;
            zip.write_all(&file.bytes)?;
        }

        zip.start_file(MANIFEST_FILE_NAME, options)?;
        zip.write_all(self.manifest()?.as_bytes())?;

        zip.start_file(SNIPPET_FILE_NAME, options)?;
        zip.write_all(INSTALLATION_HTML.as_bytes())?;

        let bytes = zip.finish()?.into_inner();
        debug!("favicon zip: {} entries, {} bytes", self.files.len() + 2, bytes.len());
        Ok(bytes)
    }
}

/// Decode an upload and build the full favicon set from it.
pub fn generate_favicons(bytes: &[u8]) -> Result<FaviconSet, FaviconError> {
    let source = decode_image(bytes)?;
    favicons_from_image(&source)
}

/// Build the favicon set from an already decoded image. Non-square sources
/// are stretched to each square size.
pub fn favicons_from_image(source: &DecodedImage) -> Result<FaviconSet, FaviconError> {
    let mut files = Vec::with_capacity(FAVICON_SIZES.len() + 1);
    let mut ico_frames = Vec::with_capacity(ICO_SIZES.len());

    for (size, file_name) in FAVICON_SIZES {
        let icon = resize(source, size, size, FilterType::Lanczos3)?;
        let png = encode(&icon, OutputFormat::Png, 100)?;

        if ICO_SIZES.contains(&size) {
            ico_frames.push(icon);
        }

        files.push(FaviconFile {
            file_name,
            size: Some(size),
            bytes: png,
        });
    }

    files.push(FaviconFile {
        file_name: ICO_FILE_NAME,
        size: None,
        bytes: write_ico(&ico_frames)?,
    });

    debug!(
        "generated {} favicon files from {}x{} source",
        files.len(),
        source.width,
        source.height
    );

    Ok(FaviconSet { files })
}

/// Pack square RGB icons into one ICO with PNG-compressed entries.
fn write_ico(icons: &[DecodedImage]) -> Result<Vec<u8>, FaviconError> {
    let frames = icons
        .iter()
        .map(|icon| {
            IcoFrame::as_png(&icon.pixels, icon.width, icon.height, ExtendedColorType::Rgb8)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FaviconError::Ico(e.to_string()))?;

    let mut buffer = Vec::new();
    IcoEncoder::new(&mut buffer)
        .encode_images(&frames)
        .map_err(|e| FaviconError::Ico(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn source_png(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 200]);
            }
        }
        encode(&DecodedImage::new(width, height, pixels), OutputFormat::Png, 100).unwrap()
    }

    #[test]
    fn test_generates_all_sizes() {
        let set = generate_favicons(&source_png(64, 64)).unwrap();
        assert_eq!(set.files().len(), 7);

        for (size, file_name) in FAVICON_SIZES {
            let file = set.get(file_name).unwrap();
            assert_eq!(file.size, Some(size));
            assert_eq!(file.mime_type(), "image/png");

            let decoded = decode_image(&file.bytes).unwrap();
            assert_eq!((decoded.width, decoded.height), (size, size));
        }
    }

    #[test]
    fn test_non_square_source_is_stretched() {
        let set = generate_favicons(&source_png(120, 40)).unwrap();
        let icon = decode_image(&set.get("apple-touch-icon.png").unwrap().bytes).unwrap();
        assert_eq!((icon.width, icon.height), (180, 180));
    }

    #[test]
    fn test_ico_has_three_entries() {
        let set = generate_favicons(&source_png(64, 64)).unwrap();
        let ico = set.ico().unwrap();

        // ICONDIR: reserved 0, type 1, count
        assert_eq!(&ico[0..4], &[0, 0, 1, 0]);
        assert_eq!(u16::from_le_bytes([ico[4], ico[5]]), 3);

        let file = set.get(ICO_FILE_NAME).unwrap();
        assert_eq!(file.label(), "ico");
        assert_eq!(file.mime_type(), "image/x-icon");
    }

    #[test]
    fn test_manifest_contents() {
        let set = generate_favicons(&source_png(32, 32)).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&set.manifest().unwrap()).unwrap();

        assert_eq!(manifest["display"], "standalone");
        assert_eq!(manifest["theme_color"], "#ffffff");
        assert_eq!(manifest["icons"][0]["src"], "/android-chrome-192x192.png");
        assert_eq!(manifest["icons"][1]["sizes"], "512x512");
        assert_eq!(manifest["icons"][1]["type"], "image/png");
    }

    #[test]
    fn test_zip_bundle() {
        let set = generate_favicons(&source_png(32, 32)).unwrap();
        let bytes = set.to_zip().unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 9);

        let mut html = String::new();
        archive
            .by_name(SNIPPET_FILE_NAME)
            .unwrap()
            .read_to_string(&mut html)
            .unwrap();
        assert!(html.contains(r#"href="/site.webmanifest""#));

        let mut ico = Vec::new();
        archive.by_name(ICO_FILE_NAME).unwrap().read_to_end(&mut ico).unwrap();
        assert_eq!(ico, set.ico().unwrap());
    }

    #[test]
    fn test_labels() {
        let set = generate_favicons(&source_png(16, 16)).unwrap();
        assert_eq!(set.files()[0].label(), "16x16");
        assert_eq!(set.files()[5].label(), "512x512");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            generate_favicons(b"nope"),
            Err(FaviconError::Decode(_))
        ));
    }
}
