//! Pixel transforms applied to a photo before it is placed in a frame

use crate::types::{ColorMode, CropMode, Polarity, Rotation};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use std::borrow::Cow;

const LETTERBOX: Rgb<u8> = Rgb([0, 0, 0]);

/// Rotate counter-clockwise; the bounds grow to hold the whole photo.
pub(crate) fn rotate(image: &DynamicImage, rotation: Rotation) -> Cow<'_, DynamicImage> {
    match rotation {
        Rotation::None => Cow::Borrowed(image),
        Rotation::Ccw90 => Cow::Owned(image.rotate270()),
        Rotation::Ccw180 => Cow::Owned(image.rotate180()),
        Rotation::Ccw270 => Cow::Owned(image.rotate90()),
    }
}

/// Reduce to 8-bit RGB, optionally through luminance, then apply polarity.
///
/// Monochrome goes through `to_luma8`, which weights channels with the
/// Rec. 709 coefficients rather than the Rec. 601 ones used by many photo
/// tools, so greys can differ slightly for saturated colours.
pub(crate) fn apply_tone(image: &DynamicImage, color: ColorMode, polarity: Polarity) -> RgbImage {
    let mut rgb = match color {
        ColorMode::Color => image.to_rgb8(),
        ColorMode::Monochrome => DynamicImage::ImageLuma8(image.to_luma8()).to_rgb8(),
    };

    if polarity == Polarity::Negative {
        imageops::invert(&mut rgb);
    }

    rgb
}

/// How a photo is cut and resampled into the image area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resample {
    /// Region of the source kept: (left, top, width, height)
    pub crop: (u32, u32, u32, u32),
    /// Size the kept region is resampled to; never larger than the target
    pub size: (u32, u32),
    /// Position of the resampled region inside the image area
    pub offset: (u32, u32),
}

/// Plan the crop and resample of a `source` photo into `target`.
///
/// Aspect ratios are compared by cross-multiplication and derived sides are
/// truncated, then clamped to at least 1px. Fill crops the source to the
/// target aspect before resampling, so the resampled raster is exactly the
/// target. Fit resamples the whole photo to fit inside the target.
/// Offsets floor-halve the leftover.
pub(crate) fn plan_resample(source: (u32, u32), target: (u32, u32), mode: CropMode) -> Resample {
    let (sw, sh) = (source.0 as u64, source.1 as u64);
    let (tw, th) = (target.0 as u64, target.1 as u64);
    let wider_than_target = sw * th > tw * sh;

    match mode {
        CropMode::Fill => {
            // Keep the full short side, cut the long one to the target aspect
            let (cw, ch) = if wider_than_target {
                ((tw * sh / th).clamp(1, sw), sh)
            } else {
                (sw, (th * sw / tw).clamp(1, sh))
            };
            Resample {
                crop: (((sw - cw) / 2) as u32, ((sh - ch) / 2) as u32, cw as u32, ch as u32),
                size: target,
                offset: (0, 0),
            }
        }
        CropMode::Fit => {
            // Match the long side, leave bands on the short one
            let (w, h) = if wider_than_target {
                (tw, tw * sh / sw)
            } else {
                (th * sw / sh, th)
            };
            let (w, h) = (w.clamp(1, tw), h.clamp(1, th));
            Resample {
                crop: (0, 0, source.0, source.1),
                size: (w as u32, h as u32),
                offset: (((tw - w) / 2) as u32, ((th - h) / 2) as u32),
            }
        }
    }
}

/// Map a photo onto an image area of exactly `target` pixels.
///
/// `target` must be non-empty and the photo must have non-zero dimensions.
pub(crate) fn fit_to_area(photo: &RgbImage, target: (u32, u32), mode: CropMode) -> RgbImage {
    let plan = plan_resample(photo.dimensions(), target, mode);
    let (left, top, cw, ch) = plan.crop;
    let (nw, nh) = plan.size;

    let cropped = imageops::crop_imm(photo, left, top, cw, ch).to_image();
    let resized = imageops::resize(&cropped, nw, nh, FilterType::Lanczos3);
    if plan.size == target {
        return resized;
    }

    let mut area = RgbImage::from_pixel(target.0, target.1, LETTERBOX);
    imageops::replace(&mut area, &resized, plan.offset.0 as i64, plan.offset.1 as i64);
    area
}
