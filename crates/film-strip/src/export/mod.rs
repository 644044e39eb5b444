mod io;
mod pdf;

pub use io::{export_pdf, save_pages_png, save_png};
pub use pdf::{build_pdf, pdf_bytes};
