//! Film frame rendering
//!
//! Turns one photo and its [`FrameStyle`] into a fixed-size 36×35mm frame:
//! 1. Start from a black strip cell
//! 2. Rotate, tone and invert the photo
//! 3. Crop or letterbox it into the 36×24mm image area
//! 4. Paste the image area between the perforation bands
//! 5. Optionally punch the frame's own sprocket holes
//!
//! A photo that cannot be read or decoded yields a black frame; the failure
//! is logged and never aborts a batch.

mod transform;

use crate::constants::*;
use crate::sprocket::draw_sprocket_holes;
use crate::types::{FrameSettings, FrameStyle};
use image::{DynamicImage, Rgb, RgbImage, imageops};
use transform::{apply_tone, fit_to_area, rotate};

const FILM_BASE: Rgb<u8> = Rgb([0, 0, 0]);

/// Log target of the warning emitted once per photo left black because it
/// could not be read or decoded
pub const DEGRADED_FRAME_TARGET: &str = "film_strip::degraded_frame";

/// A rendered frame and the resolution it was rendered at
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    image: RgbImage,
    dpi: u32,
}

impl RenderedFrame {
    /// Pixel size of every frame rendered at `dpi`
    pub fn size_at(dpi: u32) -> (u32, u32) {
        (
            mm_to_px(FRAME_WIDTH_MM, dpi),
            mm_to_px(FRAME_HEIGHT_MM, dpi),
        )
    }

    /// An unexposed frame: solid film base, no holes
    pub fn blank(dpi: u32) -> Self {
        let (width, height) = Self::size_at(dpi);
        Self {
            image: RgbImage::from_pixel(width, height, FILM_BASE),
            dpi,
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Pixel rectangle of the image area inside a frame: (x, y, width, height)
pub fn image_area_at(dpi: u32) -> (u32, u32, u32, u32) {
    (
        0,
        mm_to_px(MARGIN_BAND_MM, dpi),
        mm_to_px(IMAGE_WIDTH_MM, dpi),
        mm_to_px(IMAGE_HEIGHT_MM, dpi),
    )
}

/// Render encoded photo bytes into a frame.
///
/// Undecodable bytes produce a black frame (with holes if requested).
pub fn render_frame(
    photo: &[u8],
    style: &FrameStyle,
    draw_own_holes: bool,
    dpi: u32,
) -> RenderedFrame {
    match image::load_from_memory(photo) {
        Ok(decoded) => render_image(&decoded, style, draw_own_holes, dpi),
        Err(e) => {
            log::warn!(
                target: DEGRADED_FRAME_TARGET,
                "Failed to decode photo, leaving frame black: {}",
                e
            );
            finish(RenderedFrame::blank(dpi), draw_own_holes)
        }
    }
}

/// Render an already decoded photo into a frame
pub fn render_image(
    photo: &DynamicImage,
    style: &FrameStyle,
    draw_own_holes: bool,
    dpi: u32,
) -> RenderedFrame {
    let mut frame = RenderedFrame::blank(dpi);
    let (_, area_y, area_w, area_h) = image_area_at(dpi);

    if area_w == 0 || area_h == 0 || photo.width() == 0 || photo.height() == 0 {
        log::warn!(
            "Nothing to render for a {}x{} photo at {} dpi",
            photo.width(),
            photo.height(),
            dpi
        );
        return finish(frame, draw_own_holes);
    }

    let oriented = rotate(photo, style.rotation);
    let toned = apply_tone(&oriented, style.color_mode, style.polarity);
    let area = fit_to_area(&toned, (area_w, area_h), style.crop_mode);

    imageops::replace(&mut frame.image, &area, 0, area_y as i64);

    finish(frame, draw_own_holes)
}

/// Read a photo from disk and render it.
///
/// Read failures are treated like decode failures.
pub fn render_frame_from_path(
    settings: &FrameSettings,
    draw_own_holes: bool,
    dpi: u32,
) -> RenderedFrame {
    match std::fs::read(&settings.source) {
        Ok(bytes) => render_frame(&bytes, &settings.style, draw_own_holes, dpi),
        Err(e) => {
            log::warn!(
                target: DEGRADED_FRAME_TARGET,
                "Failed to read photo {}, leaving frame black: {}",
                settings.source.display(),
                e
            );
            finish(RenderedFrame::blank(dpi), draw_own_holes)
        }
    }
}

/// Render every photo in order. Frames meant for page packing should pass
/// `draw_own_holes = false` so the packer can punch continuous rows.
pub fn render_frames(
    photos: &[FrameSettings],
    draw_own_holes: bool,
    dpi: u32,
) -> Vec<RenderedFrame> {
    photos
        .iter()
        .map(|settings| render_frame_from_path(settings, draw_own_holes, dpi))
        .collect()
}

fn finish(mut frame: RenderedFrame, draw_own_holes: bool) -> RenderedFrame {
    if draw_own_holes {
        let width = frame.width();
        draw_sprocket_holes(&mut frame.image, 0, 0, width, frame.dpi);
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprocket::{HOLE_COLOR, HoleGeometry};
    use crate::types::{ColorMode, CropMode, Polarity, Rotation};
    use image::ImageFormat;
    use std::io::Cursor;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    fn encode_png(photo: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(photo)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn solid(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
        encode_png(RgbImage::from_pixel(width, height, color))
    }

    fn is_black(pixel: &Rgb<u8>) -> bool {
        pixel.0.iter().all(|&c| c < 16)
    }

    fn is_red(pixel: &Rgb<u8>) -> bool {
        pixel.0[0] > 200 && pixel.0[1] < 56 && pixel.0[2] < 56
    }

    #[test]
    fn test_output_size_is_fixed() {
        let photos = [solid(1000, 1000, RED), solid(4000, 300, RED), solid(1, 1, RED), solid(90, 1600, RED)];
        for dpi in [72, 150, 300] {
            for photo in &photos {
                for crop_mode in [CropMode::Fill, CropMode::Fit] {
                    let style = FrameStyle {
                        crop_mode,
                        ..Default::default()
                    };
                    let frame = render_frame(photo, &style, true, dpi);
                    assert_eq!(
                        (frame.width(), frame.height()),
                        RenderedFrame::size_at(dpi)
                    );
                    assert_eq!(frame.dpi(), dpi);
                }
            }
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let photo = solid(640, 480, Rgb([40, 120, 200]));
        let style = FrameStyle {
            crop_mode: CropMode::Fit,
            color_mode: ColorMode::Monochrome,
            polarity: Polarity::Negative,
            rotation: Rotation::Ccw90,
        };
        let a = render_frame(&photo, &style, true, 150);
        let b = render_frame(&photo, &style, true, 150);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fill_covers_image_area() {
        let dpi = 300;
        let frame = render_frame(&solid(1000, 1000, RED), &FrameStyle::default(), false, dpi);
        let (x0, y0, w, h) = image_area_at(dpi);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                assert!(is_red(frame.image().get_pixel(x, y)), "black at ({}, {})", x, y);
            }
        }
        // Perforation bands stay film base
        assert!(is_black(frame.image().get_pixel(10, y0 - 1)));
        assert!(is_black(frame.image().get_pixel(10, y0 + h)));
    }

    #[test]
    fn test_fit_letterbox_is_symmetric() {
        let dpi = 300;
        let style = FrameStyle {
            crop_mode: CropMode::Fit,
            ..Default::default()
        };
        let frame = render_frame(&solid(1000, 1000, RED), &style, false, dpi);
        let (_, y0, w, h) = image_area_at(dpi);
        let row = y0 + h / 2;

        let left = (0..w)
            .take_while(|&x| is_black(frame.image().get_pixel(x, row)))
            .count() as i64;
        let right = (0..w)
            .rev()
            .take_while(|&x| is_black(frame.image().get_pixel(x, row)))
            .count() as i64;

        assert!(left > 0);
        assert!((left - right).abs() <= 1, "left {} right {}", left, right);
        assert!(is_red(frame.image().get_pixel(w / 2, row)));
    }

    #[test]
    fn test_fit_top_and_bottom_bands_are_symmetric() {
        let dpi = 300;
        let style = FrameStyle {
            crop_mode: CropMode::Fit,
            ..Default::default()
        };
        let frame = render_frame(&solid(4000, 1000, RED), &style, false, dpi);
        let (_, y0, w, h) = image_area_at(dpi);
        let column = w / 2;

        let top = (y0..y0 + h)
            .take_while(|&y| is_black(frame.image().get_pixel(column, y)))
            .count() as i64;
        let bottom = (y0..y0 + h)
            .rev()
            .take_while(|&y| is_black(frame.image().get_pixel(column, y)))
            .count() as i64;

        assert!(top > 0);
        assert!((top - bottom).abs() <= 1, "top {} bottom {}", top, bottom);
        assert!(is_red(frame.image().get_pixel(column, y0 + h / 2)));
    }

    #[test]
    fn test_negative_inverts_photo() {
        let dpi = 150;
        let style = FrameStyle {
            polarity: Polarity::Negative,
            ..Default::default()
        };
        let frame = render_frame(&solid(300, 200, Rgb([255, 255, 255])), &style, false, dpi);
        let (_, y0, w, h) = image_area_at(dpi);
        assert!(is_black(frame.image().get_pixel(w / 2, y0 + h / 2)));

        let frame = render_frame(&solid(300, 200, RED), &style, false, dpi);
        let pixel = frame.image().get_pixel(w / 2, y0 + h / 2);
        assert!(pixel.0[0] < 56 && pixel.0[1] > 200 && pixel.0[2] > 200);
    }

    #[test]
    fn test_rotation_applies_before_crop() {
        // Left half red, right half blue; 90° CCW puts blue on top
        let mut photo = RgbImage::from_pixel(200, 100, RED);
        for y in 0..100 {
            for x in 100..200 {
                photo.put_pixel(x, y, BLUE);
            }
        }
        let style = FrameStyle {
            rotation: Rotation::Ccw90,
            ..Default::default()
        };
        let dpi = 300;
        let frame = render_frame(&encode_png(photo), &style, false, dpi);
        let (_, y0, w, h) = image_area_at(dpi);

        let top = frame.image().get_pixel(w / 2, y0 + 5);
        let bottom = frame.image().get_pixel(w / 2, y0 + h - 5);
        assert!(top.0[2] > 200 && top.0[0] < 56, "top {:?}", top);
        assert!(is_red(bottom), "bottom {:?}", bottom);
    }

    #[test]
    fn test_rotated_photo_gets_pillarboxed() {
        let dpi = 300;
        let photo = solid(300, 200, RED);
        let (_, y0, _, h) = image_area_at(dpi);
        let row = y0 + h / 2;

        let upright = FrameStyle {
            crop_mode: CropMode::Fit,
            ..Default::default()
        };
        let frame = render_frame(&photo, &upright, false, dpi);
        assert!(is_red(frame.image().get_pixel(0, row)));

        let turned = FrameStyle {
            rotation: Rotation::Ccw270,
            ..upright
        };
        let frame = render_frame(&photo, &turned, false, dpi);
        assert!(is_black(frame.image().get_pixel(0, row)));
    }

    #[test]
    fn test_undecodable_photo_renders_black() {
        let dpi = 300;
        let frame = render_frame(b"not an image", &FrameStyle::default(), false, dpi);
        assert_eq!((frame.width(), frame.height()), RenderedFrame::size_at(dpi));
        assert!(frame.image().pixels().all(is_black));
    }

    #[test]
    fn test_undecodable_photo_still_gets_holes() {
        let dpi = 300;
        let g = HoleGeometry::at_dpi(dpi);
        let frame = render_frame(b"", &FrameStyle::default(), true, dpi);
        let hole = frame
            .image()
            .get_pixel(g.inset + g.width / 2, g.top_y + g.height / 2);
        assert_eq!(*hole, HOLE_COLOR);
    }

    #[test]
    fn test_missing_file_renders_black() {
        let settings = FrameSettings::new("/definitely/not/here.jpg");
        let frame = render_frame_from_path(&settings, false, 72);
        assert_eq!((frame.width(), frame.height()), RenderedFrame::size_at(72));
        assert!(frame.image().pixels().all(is_black));
    }

    #[test]
    fn test_holes_only_when_requested() {
        let dpi = 300;
        let g = HoleGeometry::at_dpi(dpi);
        let photo = solid(400, 300, RED);
        let at = (g.inset + g.width / 2, g.top_y + g.height / 2);

        let without = render_frame(&photo, &FrameStyle::default(), false, dpi);
        assert!(is_black(without.image().get_pixel(at.0, at.1)));

        let with = render_frame(&photo, &FrameStyle::default(), true, dpi);
        assert_eq!(*with.image().get_pixel(at.0, at.1), HOLE_COLOR);
    }
}
