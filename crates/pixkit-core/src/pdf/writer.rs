//! PDF serialization with `lopdf`.
//!
//! Images are embedded as baseline JPEG (`DCTDecode`) XObjects; the title
//! uses the standard Helvetica font so no font data is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use log::debug;

use super::layout::{layout, DocumentLayout, PdfOptions, TITLE_BASELINE_MM, TITLE_FONT_SIZE};
use super::PdfError;
use crate::decode::DecodedImage;
use crate::encode::encode_jpeg;

/// JPEG quality for embedded pages.
pub const PDF_JPEG_QUALITY: u8 = 92;

const PT_PER_MM: f64 = 72.0 / 25.4;

/// Average Helvetica advance as a fraction of the font size.
const HELVETICA_AVG_ADVANCE: f64 = 0.52;

fn pt(mm: f64) -> f32 {
    (mm * PT_PER_MM) as f32
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

/// Lay out `images` and write them as a PDF document.
pub fn write_pdf(images: &[DecodedImage], options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    let sizes: Vec<(u32, u32)> = images.iter().map(|i| (i.width, i.height)).collect();
    let doc_layout = layout(&sizes, options)?;
    write_layout(images, &doc_layout)
}

/// Write an already computed layout.
pub fn write_layout(
    images: &[DecodedImage],
    doc_layout: &DocumentLayout,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let page_height_pt = pt(doc_layout.page_height);
    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        real(pt(doc_layout.page_width)),
        real(page_height_pt),
    ];

    let mut kids = Vec::with_capacity(doc_layout.pages.len());

    for (page_index, page) in doc_layout.pages.iter().enumerate() {
        let mut operations = Vec::new();
        let mut xobjects = Dictionary::new();

        if page_index == 0 {
            if let Some(title) = doc_layout.title.as_deref() {
                operations.extend(title_operations(title, doc_layout));
            }
        }

        for placement in &page.placements {
            let image = images.get(placement.image).ok_or(PdfError::MissingImage(placement.image))?;
            let name = format!("Im{}", placement.image);
            xobjects.set(name.as_bytes().to_vec(), image_xobject(&mut doc, image)?);

            let bottom = doc_layout.page_height - placement.y - placement.height;
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new(
                "cm",
                vec![
                    real(pt(placement.width)),
                    real(0.0),
                    real(0.0),
                    real(pt(placement.height)),
                    real(pt(placement.x)),
                    real(pt(bottom)),
                ],
            ));
            operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
            operations.push(Operation::new("Q", vec![]));
        }

        let content = Content { operations }
            .encode()
            .map_err(|e| PdfError::Write(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => xobjects,
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Write(e.to_string()))?;

    debug!(
        "wrote {} page PDF with {} images ({} bytes)",
        page_count,
        images.len(),
        bytes.len()
    );

    Ok(bytes)
}

fn title_operations(title: &str, doc_layout: &DocumentLayout) -> Vec<Operation> {
    let size_pt = TITLE_FONT_SIZE;
    let width_pt = title.chars().count() as f64 * size_pt * HELVETICA_AVG_ADVANCE;
    let x = (pt(doc_layout.page_width) as f64 - width_pt) / 2.0;
    let y = pt(doc_layout.page_height - TITLE_BASELINE_MM);

    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), real(size_pt as f32)]),
        Operation::new("Td", vec![real(x.max(0.0) as f32), real(y)]),
        Operation::new("Tj", vec![Object::string_literal(title)]),
        Operation::new("ET", vec![]),
    ]
}

fn image_xobject(doc: &mut Document, image: &DecodedImage) -> Result<ObjectId, PdfError> {
    let jpeg = encode_jpeg(&image.pixels, image.width, image.height, PDF_JPEG_QUALITY)?;

    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width as i64,
            "Height" => image.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    )
    .with_compression(false);

    Ok(doc.add_object(stream))
}
