use crate::frame::render_frames;
use crate::layout::{Page, pack_pages};
use crate::options::FilmProject;
use crate::types::Result;

/// Render every photo of a project and pack the frames onto pages.
///
/// Frames are rendered without their own holes; the packer punches one
/// continuous run per row.
pub fn compose(project: &FilmProject) -> Result<Vec<Page>> {
    project.validate()?;

    let frames = render_frames(&project.photos, false, project.layout.dpi);
    pack_pages(&frames, &project.layout)
}
