//! Page layout for the image-to-PDF tool. All measurements are millimetres
//! from the top-left corner of the page.

use serde::{Deserialize, Serialize};

use super::PdfError;

pub const MARGIN_MM: f64 = 10.0;
pub const IMAGE_GAP_MM: f64 = 10.0;
pub const TITLE_FONT_SIZE: f64 = 16.0;
pub const TITLE_BASELINE_MM: f64 = 15.0;
/// Where the first image goes when the first page carries a title.
pub const TITLED_CONTENT_TOP_MM: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    A3,
}

impl PageSize {
    /// Portrait `(width, height)` in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::A3 => (297.0, 420.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PdfOptions {
    pub page_size: PageSize,
    pub orientation: PageOrientation,
    /// Printed on the first page and used as the file name.
    pub title: Option<String>,
}

impl PdfOptions {
    /// Title with surrounding whitespace removed; `None` when blank.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// `{title}.pdf`, or `document.pdf` without a title.
    pub fn file_name(&self) -> String {
        match self.title() {
            Some(title) => format!("{title}.pdf"),
            None => "document.pdf".to_string(),
        }
    }

    /// `(width, height)` in millimetres after applying the orientation.
    pub fn page_dimensions_mm(&self) -> (f64, f64) {
        let (w, h) = self.page_size.dimensions_mm();
        match self.orientation {
            PageOrientation::Portrait => (w, h),
            PageOrientation::Landscape => (h, w),
        }
    }
}

/// Where one image lands on its page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Index into the input image list.
    pub image: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub title: Option<String>,
    pub pages: Vec<PageLayout>,
}

/// Place images of the given pixel sizes onto pages.
///
/// Each image takes the full content width at its own aspect ratio,
/// shrinking to the page's content height when it is taller. An image that
/// does not fit below the previous one starts a new page; on a page with
/// nothing placed yet it is shrunk into the remaining space instead.
pub fn layout(sizes: &[(u32, u32)], options: &PdfOptions) -> Result<DocumentLayout, PdfError> {
    if sizes.is_empty() {
        return Err(PdfError::NoImages);
    }

    let (page_width, page_height) = options.page_dimensions_mm();
    let content_width = page_width - MARGIN_MM * 2.0;
    let content_bottom = page_height - MARGIN_MM;
    let title = options.title().map(str::to_string);

    let mut pages = vec![PageLayout::default()];
    let mut cursor = if title.is_some() {
        TITLED_CONTENT_TOP_MM
    } else {
        MARGIN_MM
    };

    for (index, &(px_width, px_height)) in sizes.iter().enumerate() {
        if px_width == 0 || px_height == 0 {
            return Err(PdfError::InvalidImage {
                index,
                width: px_width,
                height: px_height,
            });
        }
        let ratio = px_width as f64 / px_height as f64;

        let (mut width, mut height) = fit(ratio, content_width, content_bottom - MARGIN_MM);

        if cursor + height > content_bottom {
            let page_is_empty = pages.last().is_some_and(|p| p.placements.is_empty());
            if page_is_empty {
                (width, height) = fit(ratio, content_width, content_bottom - cursor);
            } else {
                pages.push(PageLayout::default());
                cursor = MARGIN_MM;
            }
        }

        let placement = Placement {
            image: index,
            x: MARGIN_MM + (content_width - width) / 2.0,
            y: cursor,
            width,
            height,
        };

        if let Some(page) = pages.last_mut() {
            page.placements.push(placement);
        }
        cursor += height + IMAGE_GAP_MM;
    }

    Ok(DocumentLayout {
        page_width,
        page_height,
        title,
        pages,
    })
}

/// Largest `(width, height)` with the given aspect ratio inside the box.
fn fit(ratio: f64, max_width: f64, max_height: f64) -> (f64, f64) {
    let height = max_width / ratio;
    if height > max_height {
        (max_height * ratio, max_height)
    } else {
        (max_width, height)
    }
}
