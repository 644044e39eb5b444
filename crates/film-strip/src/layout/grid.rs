//! Grid capacity and orientation choice
//!
//! Frames are fixed-size cells separated by a constant gap inside the page
//! margins. Capacity along one axis is
//! `floor((extent - 2*margin + gap) / (cell + gap))`.

use crate::frame::RenderedFrame;
use crate::options::LayoutOptions;
use crate::types::{Orientation, PaperSize};

use super::GridCapacity;

// =============================================================================
// Capacity
// =============================================================================

/// Number of cells that fit along one page axis.
///
/// A negative usable extent (margins alone exceed the page) means zero.
pub fn cells_along(extent: u32, cell: u32, margin: u32, gap: u32) -> usize {
    let usable = extent as i64 - 2 * margin as i64 + gap as i64;
    let pitch = cell as i64 + gap as i64;
    if usable < 0 || pitch <= 0 {
        return 0;
    }
    (usable / pitch) as usize
}

/// Grid for one concrete orientation
pub fn grid_for_orientation(
    paper_size: PaperSize,
    orientation: Orientation,
    margin: u32,
    gap: u32,
    dpi: u32,
) -> GridCapacity {
    let (page_width_px, page_height_px) = paper_size
        .dimensions_with_orientation(orientation)
        .to_px(dpi);
    let (frame_w, frame_h) = RenderedFrame::size_at(dpi);

    GridCapacity {
        orientation,
        columns: cells_along(page_width_px, frame_w, margin, gap),
        rows: cells_along(page_height_px, frame_h, margin, gap),
        page_width_px,
        page_height_px,
    }
}

// =============================================================================
// Orientation Choice
// =============================================================================

/// Pick the grid for the requested orientation.
///
/// Under `Auto` both orientations are evaluated and Landscape wins only with
/// strictly greater capacity.
pub fn plan_grid(options: &LayoutOptions) -> GridCapacity {
    let margin = options.margin_px();
    let gap = options.gap_px();

    let mut best: Option<GridCapacity> = None;
    for &orientation in options.orientation.candidates() {
        let grid = grid_for_orientation(options.paper_size, orientation, margin, gap, options.dpi);
        log::debug!(
            "{} {:?}: {} x {} = {} frames per page",
            options.paper_size.name(),
            orientation,
            grid.columns,
            grid.rows,
            grid.capacity()
        );
        best = match best {
            Some(current) if current.capacity() >= grid.capacity() => Some(current),
            _ => Some(grid),
        };
    }

    // candidates() is never empty
    best.unwrap_or_else(|| {
        grid_for_orientation(
            options.paper_size,
            Orientation::Portrait,
            margin,
            gap,
            options.dpi,
        )
    })
}

// =============================================================================
// Tests
// =============================================================================
