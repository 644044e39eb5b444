use film_strip::*;
use image::{Rgb, RgbImage};
use lopdf::Document;
use tempfile::TempDir;

fn project(dir: &TempDir, count: usize, dpi: u32) -> FilmProject {
    let path = dir.path().join("photo.png");
    RgbImage::from_pixel(30, 20, Rgb([90, 160, 40]))
        .save(&path)
        .unwrap();
    FilmProject {
        photos: (0..count).map(|_| FrameSettings::new(&path)).collect(),
        layout: LayoutOptions {
            dpi,
            ..Default::default()
        },
    }
}

fn media_box(doc: &Document, page_number: u32) -> Vec<f32> {
    let id = doc.get_pages()[&page_number];
    doc.get_dictionary(id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

#[tokio::test]
async fn test_export_pdf_one_page_per_sheet() {
    let dir = TempDir::new().unwrap();
    let pages = compose(&project(&dir, 40, 72)).unwrap();
    assert_eq!(pages.len(), 2);

    let path = dir.path().join("sheet.pdf");
    export_pdf(pages, &path).await.unwrap();

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_a4_pages_print_at_a4() {
    let dir = TempDir::new().unwrap();
    let pages = compose(&project(&dir, 1, 300)).unwrap();
    let bytes = pdf_bytes(&pages).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();

    // 2480 x 3507 px at 300 dpi
    let mb = media_box(&doc, 1);
    assert!((mb[2] - 595.2).abs() < 0.01, "width {}", mb[2]);
    assert!((mb[3] - 841.68).abs() < 0.01, "height {}", mb[3]);
}

#[tokio::test]
async fn test_landscape_page_keeps_landscape_media_box() {
    let dir = TempDir::new().unwrap();
    let mut project = project(&dir, 1, 72);
    project.layout.orientation = PageOrientation::Landscape;

    let bytes = pdf_bytes(&compose(&project).unwrap()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    let mb = media_box(&doc, 1);
    assert!(mb[2] > mb[3]);
}

#[test]
fn test_preview_and_export_render_independently() {
    let dir = TempDir::new().unwrap();
    let project = project(&dir, 3, 300);

    let preview = generate_preview(&project, 72, 1).unwrap();
    let full = compose(&project).unwrap();
    assert_eq!(preview[0].dpi, 72);
    assert_eq!(full[0].dpi, 300);
    assert!(full[0].width() > preview[0].width() * 4);
}

#[tokio::test]
async fn test_save_preview_pngs() {
    let dir = TempDir::new().unwrap();
    let project = project(&dir, 2, 300);
    let pages = generate_preview(&project, 50, 1).unwrap();
    let (width, height) = (pages[0].width(), pages[0].height());

    let written = save_pages_png(pages, dir.path().join("out"), "preview")
        .await
        .unwrap();
    assert_eq!(written.len(), 1);
    let image = image::open(&written[0]).unwrap();
    assert_eq!((image.width(), image.height()), (width, height));
}
