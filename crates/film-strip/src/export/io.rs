//! Writing pages to disk

use super::pdf::pdf_bytes;
use crate::layout::Page;
use crate::types::*;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Save pages as a multi-page PDF
pub async fn export_pdf(pages: Vec<Page>, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let page_count = pages.len();
    let bytes = tokio::task::spawn_blocking(move || pdf_bytes(&pages)).await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Wrote {} page(s) to {}", page_count, path.display());
    Ok(())
}

/// Save a single raster as PNG
pub async fn save_png(image: RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Cursor::new(Vec::new());
        image.write_to(&mut writer, ImageFormat::Png)?;
        Ok::<_, FilmError>(writer.into_inner())
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Save each page as `<stem>-<n>.png` in `dir`, numbered from 1.
///
/// Returns the written paths in page order.
pub async fn save_pages_png(
    pages: Vec<Page>,
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(pages.len());
    for (i, page) in pages.into_iter().enumerate() {
        let path = dir.join(format!("{}-{}.png", stem, i + 1));
        save_png(page.image, &path).await?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
