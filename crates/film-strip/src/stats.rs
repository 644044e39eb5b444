use crate::layout::plan_grid;
use crate::options::LayoutOptions;
use crate::types::*;

/// Calculate how `frame_count` frames will be laid out, without rendering
pub fn calculate_statistics(
    frame_count: usize,
    options: &LayoutOptions,
) -> Result<LayoutStatistics> {
    options.validate()?;

    let grid = plan_grid(options);

    Ok(LayoutStatistics {
        frame_count,
        orientation: grid.orientation,
        columns: grid.columns,
        rows: grid.rows,
        frames_per_page: grid.capacity(),
        page_count: grid.pages_for(frame_count),
        page_width_px: grid.page_width_px,
        page_height_px: grid.page_height_px,
    })
}
