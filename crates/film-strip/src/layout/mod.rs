//! Page layout for rendered frames
//!
//! This module handles the geometry of putting frames on paper:
//! - Grid capacity per orientation and the Auto tie-break
//! - Row-major packing with continuous sprocket strips
//! - Mapping clicks on a page back to the photo that produced a frame

mod grid;
mod pack;
mod types;

pub use grid::*;
pub use hit_test::*;
pub use pack::*;
pub use types::*;
