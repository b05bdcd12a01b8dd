//! # Receipt Session
//!
//! The editable state behind one receipt: the record, the four toggles and the
//! current QR image, plus the collaborator operations that change them.
//!
//! ## QR Generations
//!
//! Every mutation bumps a generation counter. QR rasterization runs on the
//! blocking pool and its result carries the generation it was requested at;
//! [`ReceiptSession::apply_qr`] drops results that are older than the session.
//!
//! ```text
//! set_field ─► gen 1 ─► request_qr ─────────────┐ (rasterizing)
//! set_field ─► gen 2 ─► request_qr ──────┐      │
//!                                        ▼      ▼
//!                          apply_qr(gen 2) ✓   apply_qr(gen 1) ✗ stale
//! ```
//!
//! ## Example
//!
//! ```
//! use boleta::ReceiptSession;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut session = ReceiptSession::new();
//! session.set_field_by_name("storeName", "Corner Bakery").unwrap();
//! session.add_items("Coffee - 4.50\nBagel - 3.25");
//! session.refresh_qr().await;
//! let document = session.render();
//! # assert!(document.text_lines().contains(&"Corner Bakery".to_string()));
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::components;
use crate::config::PageConfig;
use crate::error::BoletaError;
use crate::export::{self, ExportError, PrintDocument};
use crate::ir::Document;
use crate::qr::{self, QrConfig, QrError, QrImage};
use crate::receipt::{ReceiptData, ReceiptField, ReceiptOption, ReceiptOptions, parse_items};
use crate::transport::PrintSurface;

// ============================================================================
// QR STATE
// ============================================================================

/// What the QR region currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrSlot {
    /// QR code switched off
    Off,
    /// Waiting for a rasterization result
    Pending,
    Ready(Arc<QrImage>),
    /// Last rasterization failed; the caption renders without an image
    Failed,
}

impl QrSlot {
    pub fn image(&self) -> Option<Arc<QrImage>> {
        match self {
            QrSlot::Ready(image) => Some(image.clone()),
            _ => None,
        }
    }
}

/// An in-flight QR rasterization.
#[derive(Debug)]
pub struct QrTask {
    generation: u64,
    handle: JoinHandle<Result<QrImage, QrError>>,
}

impl QrTask {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the rasterizer.
    pub async fn finish(self) -> QrOutcome {
        let result = match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(QrError::Task(e.to_string())),
        };
        QrOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// A finished rasterization, tagged with the generation it was requested at.
#[derive(Debug)]
pub struct QrOutcome {
    pub generation: u64,
    pub result: Result<QrImage, QrError>,
}

// ============================================================================
// NOTIFICATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short user-facing message about a finished action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: NoticeKind,
}

impl Notification {
    pub const PRINTED: Self = Self {
        title: "Printing Receipt",
        description: "Receipt sent to printer",
        kind: NoticeKind::Info,
    };

    pub const PRINT_FAILED: Self = Self {
        title: "Error",
        description: "Failed to print receipt",
        kind: NoticeKind::Error,
    };

    pub const PDF_SAVED: Self = Self {
        title: "PDF Downloaded",
        description: "Receipt saved as PDF",
        kind: NoticeKind::Info,
    };

    pub const PDF_FAILED: Self = Self {
        title: "Error",
        description: "Failed to generate PDF",
        kind: NoticeKind::Error,
    };

    pub fn for_print<T>(result: &Result<T, BoletaError>) -> Self {
        if result.is_ok() { Self::PRINTED } else { Self::PRINT_FAILED }
    }

    pub fn for_export<T>(result: &Result<T, ExportError>) -> Self {
        if result.is_ok() { Self::PDF_SAVED } else { Self::PDF_FAILED }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// One receipt being edited.
#[derive(Debug, Clone)]
pub struct ReceiptSession {
    data: ReceiptData,
    options: ReceiptOptions,
    page: PageConfig,
    qr_config: QrConfig,
    generation: u64,
    qr: QrSlot,
}

impl Default for ReceiptSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptSession {
    /// A fresh form: current date, new transaction id, default toggles.
    pub fn new() -> Self {
        Self::with_data(ReceiptData::new())
    }

    pub fn with_data(data: ReceiptData) -> Self {
        let options = ReceiptOptions::default();
        Self {
            data,
            options,
            page: PageConfig::default(),
            qr_config: QrConfig::default(),
            generation: 0,
            qr: if options.include_qr { QrSlot::Pending } else { QrSlot::Off },
        }
    }

    pub fn with_options(mut self, options: ReceiptOptions) -> Self {
        self.options = options;
        self.bump();
        self
    }

    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    pub fn with_qr_config(mut self, config: QrConfig) -> Self {
        self.qr_config = config;
        self.bump();
        self
    }

    pub fn data(&self) -> &ReceiptData {
        &self.data
    }

    pub fn options(&self) -> &ReceiptOptions {
        &self.options
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn qr_slot(&self) -> &QrSlot {
        &self.qr
    }

    // ===== MUTATIONS =====

    /// Field-change notifier.
    pub fn set_field(&mut self, field: ReceiptField, value: &str) {
        self.data.set_field(field, value);
        self.bump();
    }

    /// Field-change notifier keyed by the camelCase field name.
    pub fn set_field_by_name(&mut self, name: &str, value: &str) -> Result<(), BoletaError> {
        let field = name.parse::<ReceiptField>()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Append items parsed from raw `name - price` lines. Returns how many were added.
    pub fn add_items(&mut self, raw: &str) -> usize {
        let items = parse_items(raw);
        let added = items.len();
        if added > 0 {
            self.data.items.extend(items);
            self.bump();
        }
        added
    }

    /// Remove the item at `index`. Out of range is a no-op.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.data.items.len() {
            self.data.items.remove(index);
            self.bump();
        }
    }

    pub fn set_option(&mut self, option: ReceiptOption, enabled: bool) {
        self.options.set(option, enabled);
        self.bump();
    }

    pub fn set_option_by_name(&mut self, name: &str, enabled: bool) -> Result<(), BoletaError> {
        let option = name.parse::<ReceiptOption>()?;
        self.set_option(option, enabled);
        Ok(())
    }

    /// New generation; the QR slot keeps its image only if the payload is unchanged.
    fn bump(&mut self) {
        self.generation += 1;
        self.qr = if !self.options.include_qr {
            QrSlot::Off
        } else {
            match (&self.qr, qr::payload(&self.data, self.qr_config.payload)) {
                (QrSlot::Ready(image), Ok(payload)) if image.payload == payload => {
                    QrSlot::Ready(image.clone())
                }
                _ => QrSlot::Pending,
            }
        };
    }

    // ===== QR =====

    /// Start rasterizing the QR code for the current generation.
    ///
    /// Returns `None` when the QR code is switched off. Must be called from
    /// within a tokio runtime.
    pub fn request_qr(&self) -> Option<QrTask> {
        if !self.options.include_qr {
            return None;
        }
        let data = self.data.clone();
        let config = self.qr_config;
        let handle = tokio::task::spawn_blocking(move || {
            let payload = qr::payload(&data, config.payload)?;
            qr::rasterize(&payload, &config)
        });
        Some(QrTask {
            generation: self.generation,
            handle,
        })
    }

    /// Apply a finished rasterization. Returns whether it was applied.
    pub fn apply_qr(&mut self, outcome: QrOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                requested = outcome.generation,
                current = self.generation,
                "discarding stale QR result"
            );
            return false;
        }
        if !self.options.include_qr {
            return false;
        }

        self.qr = match outcome.result {
            Ok(image) => QrSlot::Ready(Arc::new(image)),
            Err(e) => {
                tracing::warn!(error = %e, "QR rasterization failed");
                QrSlot::Failed
            }
        };
        true
    }

    /// Request and apply in one step.
    pub async fn refresh_qr(&mut self) {
        if let Some(task) = self.request_qr() {
            let outcome = task.finish().await;
            self.apply_qr(outcome);
        }
    }

    // ===== OUTPUT =====

    /// Render the current state.
    pub fn render(&self) -> Document {
        components::render_receipt(&self.data, &self.options, self.qr.image())
    }

    /// HTML markup of the current state.
    pub fn markup(&self) -> String {
        self.render().to_markup()
    }

    /// PNG preview of the current state.
    pub fn png(&self) -> Result<Vec<u8>, BoletaError> {
        Ok(crate::capture::render_png(&self.render(), &self.page)?)
    }

    /// Print document for the current state.
    pub fn print_document(&self) -> PrintDocument {
        PrintDocument::new(&self.render(), &self.data.transaction_id)
    }

    /// Send the current state to a print surface.
    pub fn print(&self, surface: &mut dyn PrintSurface) -> Result<(), BoletaError> {
        let result = surface.submit(&self.print_document());
        if let Err(e) = &result {
            tracing::error!(error = %e, "print failed");
        }
        result
    }

    /// Export the current state as `receipt-<id>.pdf` in `dir`.
    pub async fn export_pdf(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let result = export::export_pdf(
            self.render(),
            self.data.transaction_id.clone(),
            self.page,
            dir.to_path_buf(),
        )
        .await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "PDF export failed");
        }
        result
    }
}
