//! Layout data types for page packing
//!
//! All coordinates are pixels on the page raster, origin top-left.

use crate::types::Orientation;
use image::RgbImage;

/// A half-open pixel rectangle: `x1 <= x < x2`, `y1 <= y < y2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl PixelRect {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Whether the two rectangles share at least one pixel
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

/// Where one frame landed on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlacement {
    /// Frame bounds on the page
    pub rect: PixelRect,
    /// Position of the frame in the original, unpaginated input list
    pub source_index: usize,
}

/// Grid chosen for one paper size, orientation, margin and gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCapacity {
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    pub page_width_px: u32,
    pub page_height_px: u32,
}

impl GridCapacity {
    /// Frames per page
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Number of pages needed for `frame_count` frames; 0 if nothing fits
    pub fn pages_for(&self, frame_count: usize) -> usize {
        match self.capacity() {
            0 => 0,
            per_page => frame_count.div_ceil(per_page),
        }
    }
}

/// One packed output page
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// White page raster with the packed strips
    pub image: RgbImage,
    /// Frames on this page in placement order (row-major)
    pub placements: Vec<PagePlacement>,
    pub orientation: Orientation,
    pub dpi: u32,
}

impl Page {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Map a click on a scaled rendering of this page back to a source index
    pub fn hit_test(&self, click: (f64, f64), display_size: (f64, f64)) -> Option<usize> {
        super::hit_test(
            &self.placements,
            click,
            display_size,
            (self.width(), self.height()),
        )
    }
}
