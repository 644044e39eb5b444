//! Packing rendered frames onto pages
//!
//! Frames fill each page row-major. Every row is drawn as one continuous
//! strip: a black band under the whole row (gaps included), the frames pasted
//! on top, then a single run of sprocket holes across the band.

use crate::frame::RenderedFrame;
use crate::options::LayoutOptions;
use crate::sprocket::draw_sprocket_holes;
use crate::types::{FilmError, Result};
use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::{GridCapacity, Page, PagePlacement, PixelRect, plan_grid};

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const FILM_BASE: Rgb<u8> = Rgb([0, 0, 0]);

/// Pack frames onto as many pages as needed.
///
/// Every frame must have been rendered at `options.dpi`. Returns no pages
/// when a single frame does not fit inside the margins; that is a valid
/// outcome, not an error.
pub fn pack_pages(frames: &[RenderedFrame], options: &LayoutOptions) -> Result<Vec<Page>> {
    options.validate()?;

    let dpi = options.dpi;
    if let Some((index, frame)) = frames.iter().enumerate().find(|(_, f)| f.dpi() != dpi) {
        return Err(FilmError::ResolutionMismatch {
            index,
            expected: dpi,
            found: frame.dpi(),
        });
    }

    let grid = plan_grid(options);
    let per_page = grid.capacity();
    if per_page == 0 {
        log::warn!(
            "No frame fits on {} with a {} mm margin",
            options.paper_size.name(),
            options.margin_mm
        );
        return Ok(Vec::new());
    }

    let geometry = RowGeometry {
        grid,
        margin: options.margin_px(),
        gap: options.gap_px(),
        dpi,
    };

    let pages: Vec<Page> = frames
        .chunks(per_page)
        .enumerate()
        .map(|(page_index, batch)| geometry.render_page(batch, page_index * per_page))
        .collect();

    log::debug!(
        "Packed {} frames onto {} {:?} pages ({} per page)",
        frames.len(),
        pages.len(),
        grid.orientation,
        per_page
    );

    Ok(pages)
}

/// Pixel geometry shared by every page of one packing pass
struct RowGeometry {
    grid: GridCapacity,
    margin: u32,
    gap: u32,
    dpi: u32,
}

impl RowGeometry {
    /// Lay out one batch; `first_index` is the batch's offset in the input
    fn render_page(&self, batch: &[RenderedFrame], first_index: usize) -> Page {
        let (frame_w, frame_h) = RenderedFrame::size_at(self.dpi);
        let mut image = RgbImage::from_pixel(
            self.grid.page_width_px,
            self.grid.page_height_px,
            PAPER,
        );
        let mut placements = Vec::with_capacity(batch.len());

        for (row, row_frames) in batch.chunks(self.grid.columns).enumerate() {
            let count = row_frames.len() as u32;
            let row_width = count * frame_w + (count - 1) * self.gap;
            let x0 = self.margin;
            let y0 = self.margin + row as u32 * (frame_h + self.gap);

            draw_filled_rect_mut(
                &mut image,
                Rect::at(x0 as i32, y0 as i32).of_size(row_width, frame_h),
                FILM_BASE,
            );

            for (col, frame) in row_frames.iter().enumerate() {
                let x = x0 + col as u32 * (frame_w + self.gap);
                imageops::replace(&mut image, frame.image(), x as i64, y0 as i64);
                placements.push(PagePlacement {
                    rect: PixelRect::new(x, y0, x + frame_w, y0 + frame_h),
                    source_index: first_index + row * self.grid.columns + col,
                });
            }

            draw_sprocket_holes(&mut image, x0, y0, row_width, self.dpi);
        }

        Page {
            image,
            placements,
            orientation: self.grid.orientation,
            dpi: self.dpi,
        }
    }
}
