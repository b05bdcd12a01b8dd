//! # Export Pipeline
//!
//! The two ways a receipt leaves the program:
//!
//! - **PDF**: capture the document as a raster, embed it as the only content
//!   of a single 80mm-wide page, and persist it as `receipt-<id>.pdf`.
//! - **Print**: wrap the document markup in a standalone print document with
//!   print-media rules. This path never touches the raster.

pub mod pdf;
pub mod print;

pub use pdf::{build_pdf, export_pdf, export_pdf_blocking, pdf_filename, receipt_stem, render_pdf};
pub use print::PrintDocument;

use crate::capture::CaptureError;
use thiserror::Error;

/// Errors from the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}
