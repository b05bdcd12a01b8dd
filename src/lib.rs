//! # Boleta - Styleable Sales Receipts
//!
//! Boleta turns a sales record into a styled receipt and exports it. It
//! provides:
//!
//! - **Receipt record**: the editable data model and item-line parsing
//! - **Styles**: ten visual presets resolved from one table
//! - **Layout**: a declarative renderer producing an ordered region tree
//! - **QR payloads**: the transaction summary as a QR image
//! - **Export**: 80mm single-page PDF and a standalone print document
//!
//! ## Quick Start
//!
//! ```no_run
//! use boleta::{ReceiptSession, receipt::sample_receipt, transport::SpoolDirectory};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), boleta::BoletaError> {
//! let mut session = ReceiptSession::with_data(sample_receipt());
//! session.add_items("Croissant - 3.75");
//! session.refresh_qr().await;
//!
//! // 80mm PDF named after the transaction
//! let path = session.export_pdf("out".as_ref()).await?;
//! println!("Saved {}", path.display());
//!
//! // HTML print document into a spool directory
//! session.print(&mut SpoolDirectory::new("spool"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`receipt`] | Receipt record, options, item parsing |
//! | [`style`] | Style table and resolver |
//! | [`components`] | Declarative components and the receipt layout |
//! | [`ir`] | Region/op tree and HTML markup |
//! | [`qr`] | QR payload and rasterization |
//! | [`capture`] | Document to RGB raster / PNG |
//! | [`export`] | PDF and print document |
//! | [`transport`] | Print surfaces |
//! | [`session`] | Editable state and collaborator operations |
//! | [`config`] | Page dimensions |
//! | [`error`] | Error types |

pub mod capture;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod ir;
pub mod qr;
pub mod receipt;
pub mod session;
pub mod style;
pub mod transport;

// Re-exports for convenience
pub use config::PageConfig;
pub use error::BoletaError;
pub use receipt::{ReceiptData, ReceiptOptions};
pub use session::ReceiptSession;
