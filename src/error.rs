//! # Error Types
//!
//! This module defines the crate-level error type. Layers that can fail on
//! their own (QR rasterization, raster capture, PDF export) carry their own
//! error enums, which convert into [`BoletaError`] at the session boundary.

use thiserror::Error;

use crate::capture::CaptureError;
use crate::export::ExportError;
use crate::qr::QrError;

/// Main error type for boleta operations
#[derive(Debug, Error)]
pub enum BoletaError {
    /// A field name passed to the field-change notifier is not a receipt field
    #[error("Unknown receipt field: {0}")]
    UnknownField(String),

    /// An option name passed to the toggle setter is not one of the four options
    #[error("Unknown receipt option: {0}")]
    UnknownOption(String),

    /// A style name that is not one of the ten variants
    #[error("Unknown receipt style: {0}")]
    UnknownStyle(String),

    /// QR rasterization error
    #[error("QR error: {0}")]
    Qr(#[from] QrError),

    /// Raster capture error
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// PDF export error
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Print surface error (spool or system printer)
    #[error("Print error: {0}")]
    Print(String),

    /// Receipt JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
