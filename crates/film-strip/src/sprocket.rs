//! Sprocket hole drawing
//!
//! Holes are drawn once per contiguous strip. A standalone frame is its own
//! strip; on a packed page a whole row of frames (gaps included) is one strip,
//! so the perforation pitch runs on uninterrupted across frame boundaries.

use crate::constants::*;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

/// Fill color of the perforations
pub const HOLE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Pixel geometry of the perforations at one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleGeometry {
    pub width: u32,
    pub height: u32,
    pub pitch: u32,
    pub radius: u32,
    /// Offset of the first hole from the strip's left edge
    pub inset: u32,
    /// Offset of the top row from the strip's top edge
    pub top_y: u32,
    /// Offset of the bottom row from the strip's top edge
    pub bottom_y: u32,
}

impl HoleGeometry {
    pub fn at_dpi(dpi: u32) -> Self {
        let band_offset = (MARGIN_BAND_MM - SPROCKET_HOLE_HEIGHT_MM) / 2.0;
        Self {
            width: mm_to_px(SPROCKET_HOLE_WIDTH_MM, dpi),
            height: mm_to_px(SPROCKET_HOLE_HEIGHT_MM, dpi),
            pitch: mm_to_px(SPROCKET_HOLE_PITCH_MM, dpi),
            radius: mm_to_px(SPROCKET_HOLE_RADIUS_MM, dpi),
            inset: mm_to_px(SPROCKET_ROW_INSET_MM, dpi),
            top_y: mm_to_px(band_offset, dpi),
            bottom_y: mm_to_px(FRAME_HEIGHT_MM - MARGIN_BAND_MM + band_offset, dpi),
        }
    }

    /// Left edges of every hole in a strip of `row_width` pixels, relative to
    /// the strip start. Stops before a hole would run past the strip end.
    pub fn hole_offsets(&self, row_width: u32) -> Vec<u32> {
        // Degenerate at very low resolutions
        if self.width == 0 || self.height == 0 || self.pitch == 0 {
            return Vec::new();
        }

        let row_width = row_width as u64;
        let mut offsets = Vec::new();
        let mut x = self.inset as u64;
        while x + self.width as u64 <= row_width {
            offsets.push(x as u32);
            x += self.pitch as u64;
        }
        offsets
    }
}

/// Draw both rows of sprocket holes across a strip.
///
/// # Arguments
/// * `canvas` - Image to draw on; pixels outside it are clipped
/// * `row_start_x` - Left edge of the strip in pixels
/// * `row_start_y` - Top edge of the strip (the frame's top edge) in pixels
/// * `row_width` - Width of the strip in pixels
/// * `dpi` - Resolution the canvas was laid out at
pub fn draw_sprocket_holes(
    canvas: &mut RgbImage,
    row_start_x: u32,
    row_start_y: u32,
    row_width: u32,
    dpi: u32,
) {
    let geometry = HoleGeometry::at_dpi(dpi);
    let top = row_start_y as i64 + geometry.top_y as i64;
    let bottom = row_start_y as i64 + geometry.bottom_y as i64;

    for offset in geometry.hole_offsets(row_width) {
        let x = row_start_x as i64 + offset as i64;
        for y in [top, bottom] {
            draw_rounded_rect(
                canvas,
                x as i32,
                y as i32,
                geometry.width,
                geometry.height,
                geometry.radius,
                HOLE_COLOR,
            );
        }
    }
}

/// Fill a `width × height` rounded rectangle whose top-left pixel is `(x, y)`.
///
/// Two crossed bars trimmed by the radius cover everything but the corners,
/// which are filled with discs.
pub fn draw_rounded_rect(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    radius: u32,
    color: Rgb<u8>,
) {
    if width == 0 || height == 0 {
        return;
    }

    // Discs are 2r+1 pixels across and must stay inside the rectangle
    let r = radius.min((width - 1) / 2).min((height - 1) / 2);

    if width > 2 * r {
        draw_filled_rect_mut(
            canvas,
            Rect::at(x + r as i32, y).of_size(width - 2 * r, height),
            color,
        );
    }
    if height > 2 * r {
        draw_filled_rect_mut(
            canvas,
            Rect::at(x, y + r as i32).of_size(width, height - 2 * r),
            color,
        );
    }

    if r == 0 {
        return;
    }

    let r_i = r as i32;
    let left = x + r_i;
    let right = x + width as i32 - 1 - r_i;
    let top = y + r_i;
    let bottom = y + height as i32 - 1 - r_i;
    for center in [(left, top), (right, top), (left, bottom), (right, bottom)] {
        draw_filled_circle_mut(canvas, center, r_i, color);
    }
}
