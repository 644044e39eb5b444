use crate::frame::render_frames;
use crate::layout::{Page, pack_pages, plan_grid};
use crate::options::FilmProject;
use crate::types::*;

/// Generate a low-resolution preview of the first pages of a project.
///
/// Only the photos that land on those pages are rendered. The preview is an
/// independent render from source; exporting at a higher dpi does not reuse it.
pub fn generate_preview(
    project: &FilmProject,
    preview_dpi: u32,
    max_pages: usize,
) -> Result<Vec<Page>> {
    let options = project.layout.at_dpi(preview_dpi);
    options.validate()?;

    let grid = plan_grid(&options);
    let needed = grid
        .capacity()
        .saturating_mul(max_pages)
        .min(project.photos.len());

    let frames = render_frames(&project.photos[..needed], false, preview_dpi);
    pack_pages(&frames, &options)
}
