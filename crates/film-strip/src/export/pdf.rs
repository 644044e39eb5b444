//! PDF assembly
//!
//! Each page becomes one PDF page holding a single full-bleed image XObject.
//! The MediaBox is derived from the raster size and its dpi, so a page
//! rendered from A4 prints at A4.

use crate::constants::px_to_pt;
use crate::layout::Page;
use crate::types::*;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::Write;

/// Name of the page image inside each page's resources
const PAGE_IMAGE: &str = "Im0";

/// Build a PDF document with one page per packed page, in order.
///
/// All pages must share one dpi.
pub fn build_pdf(pages: &[Page]) -> Result<Document> {
    let first = pages.first().ok_or(FilmError::NoPages)?;
    let dpi = first.dpi;
    if let Some((index, page)) = pages.iter().enumerate().find(|(_, p)| p.dpi != dpi) {
        return Err(FilmError::ResolutionMismatch {
            index,
            expected: dpi,
            found: page.dpi,
        });
    }

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let width_pt = px_to_pt(page.width(), dpi) as f32;
        let height_pt = px_to_pt(page.height(), dpi) as f32;

        let image_id = doc.add_object(image_xobject(&page.image)?);

        let content = format!(
            "q\n{} 0 0 {} 0 0 cm\n/{} Do\nQ\n",
            width_pt, height_pt, PAGE_IMAGE
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let resources = Dictionary::from_iter(vec![(
            "XObject",
            Object::Dictionary(Dictionary::from_iter(vec![(
                PAGE_IMAGE,
                Object::Reference(image_id),
            )])),
        )]);

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width_pt),
                    Object::Real(height_pt),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(pages.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

/// Serialize pages to PDF bytes
pub fn pdf_bytes(pages: &[Page]) -> Result<Vec<u8>> {
    let mut doc = build_pdf(pages)?;
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    Ok(writer)
}

/// Flate-compressed 8-bit DeviceRGB image
fn image_xobject(image: &RgbImage) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(image.as_raw())?;
    let data = encoder.finish()?;

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(image.width() as i64)),
        ("Height", Object::Integer(image.height() as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ]);

    Ok(Stream::new(dict, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;
    use flate2::read::ZlibDecoder;
    use image::Rgb;
    use std::io::Read;

    fn page(width: u32, height: u32, dpi: u32) -> Page {
        Page {
            image: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
            placements: Vec::new(),
            orientation: Orientation::Portrait,
            dpi,
        }
    }

    #[test]
    fn test_no_pages() {
        assert!(matches!(build_pdf(&[]), Err(FilmError::NoPages)));
    }

    #[test]
    fn test_mixed_dpi_rejected() {
        let pages = [page(10, 10, 72), page(20, 20, 144)];
        assert!(matches!(
            build_pdf(&pages),
            Err(FilmError::ResolutionMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn test_page_count_and_order() {
        let pages = [page(72, 144, 72), page(144, 72, 72)];
        let doc = build_pdf(&pages).unwrap();
        let ids: Vec<_> = doc.get_pages().values().copied().collect();
        assert_eq!(ids.len(), 2);

        let media_box = |id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .clone()
        };
        assert_eq!(media_box(ids[0])[2].as_float().unwrap(), 72.0);
        assert_eq!(media_box(ids[0])[3].as_float().unwrap(), 144.0);
        assert_eq!(media_box(ids[1])[2].as_float().unwrap(), 144.0);
    }

    #[test]
    fn test_image_stream_decodes_to_raster() {
        let mut raster = RgbImage::new(3, 2);
        raster.put_pixel(1, 1, Rgb([10, 20, 30]));
        let stream = image_xobject(&raster).unwrap();

        let mut decoded = Vec::new();
        ZlibDecoder::new(stream.content.as_slice())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, raster.into_raw());
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
    }
}
