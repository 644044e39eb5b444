//! Physical film and paper geometry
//!
//! Every measurement here is in millimeters. Pixel values are always derived
//! through [`mm_to_px`] at a single resolution so that frames, holes, margins
//! and pages line up with each other.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Points per inch (PDF user space)
pub const POINTS_PER_INCH: f64 = 72.0;

/// Resolution used when nothing else is requested
pub const DEFAULT_DPI: u32 = 300;

/// Convert millimeters to whole pixels at `dpi`, truncating toward zero.
///
/// Negative lengths saturate to 0.
#[inline]
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (mm * dpi as f64 / MM_PER_INCH) as u32
}

/// Convert a pixel count at `dpi` to PDF points
#[inline]
pub fn px_to_pt(px: u32, dpi: u32) -> f64 {
    px as f64 * POINTS_PER_INCH / dpi as f64
}

// =============================================================================
// 135 Film Frame
// =============================================================================

/// Width of one frame cell, including its share of the strip
pub const FRAME_WIDTH_MM: f64 = 36.0;

/// Height of the strip (image area plus both perforation bands)
pub const FRAME_HEIGHT_MM: f64 = 35.0;

/// Exposed image width
pub const IMAGE_WIDTH_MM: f64 = 36.0;

/// Exposed image height
pub const IMAGE_HEIGHT_MM: f64 = 24.0;

/// Height of each perforation band above and below the image area
pub const MARGIN_BAND_MM: f64 = (FRAME_HEIGHT_MM - IMAGE_HEIGHT_MM) / 2.0;

// =============================================================================
// Sprocket Holes
// =============================================================================

pub const SPROCKET_HOLE_WIDTH_MM: f64 = 2.8;

pub const SPROCKET_HOLE_HEIGHT_MM: f64 = 1.98;

/// Distance from one hole's left edge to the next
pub const SPROCKET_HOLE_PITCH_MM: f64 = 4.75;

pub const SPROCKET_HOLE_RADIUS_MM: f64 = 0.5;

/// Inset of the first hole from the start of a strip. Keeps hole spacing
/// continuous across frames separated by the default 2mm gap.
pub const SPROCKET_ROW_INSET_MM: f64 = 0.5;

// =============================================================================
// Option Ranges
// =============================================================================

pub const DEFAULT_MARGIN_MM: f64 = 10.0;

pub const DEFAULT_GAP_MM: f64 = 2.0;

pub const MAX_MARGIN_MM: f64 = 50.0;

pub const MAX_GAP_MM: f64 = 20.0;
