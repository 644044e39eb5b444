//! Contact sheets that look like 35mm film strips
//!
//! Photos are rendered into 36×35mm frames (a 36×24mm image between two
//! perforated bands), then packed row by row onto A4/A5/A6 pages with a
//! continuous run of sprocket holes along each row. Pages can be exported as
//! a multi-page PDF or as PNG previews.

pub mod constants;
mod compose;
mod export;
pub mod frame;
pub mod layout;
mod options;
mod preview;
pub mod sprocket;
mod stats;
mod types;

pub use compose::compose;
pub use constants::{DEFAULT_DPI, mm_to_px};
pub use export::{build_pdf, export_pdf, pdf_bytes, save_pages_png, save_png};
pub use frame::{
    DEGRADED_FRAME_TARGET, RenderedFrame, image_area_at, render_frame, render_frame_from_path,
    render_frames, render_image,
};
pub use layout::*;
pub use options::*;
pub use preview::generate_preview;
pub use stats::calculate_statistics;
pub use types::*;
