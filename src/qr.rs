//! # QR Payload Encoder
//!
//! Builds the text payload embedded in a receipt's QR code and rasterizes it
//! into a fixed-size grayscale image.
//!
//! ## Payload
//!
//! The default ([`PayloadKind::Minimal`]) identifies the transaction:
//!
//! ```text
//! {storeName}
//! {storeAddress}
//! {date}
//! Transaction: {transactionId}
//! Total: ${total}
//! ```
//!
//! [`PayloadKind::Full`] serializes the whole record as compact JSON instead.
//!
//! ## Example
//!
//! ```
//! use boleta::qr::{self, QrConfig};
//! use boleta::receipt::ReceiptData;
//!
//! let data = ReceiptData { transaction_id: "TXN1".into(), ..Default::default() };
//! let payload = qr::payload(&data, QrConfig::DEFAULT.payload).unwrap();
//! let image = qr::rasterize(&payload, &QrConfig::DEFAULT).unwrap();
//! assert_eq!(image.size(), 80);
//! ```

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

use crate::receipt::ReceiptData;

/// QR Code error correction level
///
/// Higher levels allow more damage recovery but reduce data capacity.
///
/// | Level | Recovery |
/// |-------|----------|
/// | L | ~7% |
/// | M | ~15% |
/// | Q | ~25% |
/// | H | ~30% |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorLevel {
    /// Level L: ~7% error recovery
    L,
    /// Level M: ~15% error recovery (default)
    #[default]
    M,
    /// Level Q: ~25% error recovery
    Q,
    /// Level H: ~30% error recovery
    H,
}

impl From<QrErrorLevel> for EcLevel {
    fn from(level: QrErrorLevel) -> Self {
        match level {
            QrErrorLevel::L => EcLevel::L,
            QrErrorLevel::M => EcLevel::M,
            QrErrorLevel::Q => EcLevel::Q,
            QrErrorLevel::H => EcLevel::H,
        }
    }
}

/// Which receipt fields go into the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadKind {
    /// Store name, address, date, transaction id and total.
    #[default]
    Minimal,
    /// The full record as JSON.
    Full,
}

/// QR rasterization constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrConfig {
    /// Side of the output image in pixels.
    pub size_px: u32,
    /// Largest side a dense symbol may grow to. Matches the receipt content width.
    pub max_px: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    pub error_level: QrErrorLevel,
    pub payload: PayloadKind,
}

impl QrConfig {
    pub const DEFAULT: Self = Self {
        size_px: 80,
        max_px: 270,
        margin: 1,
        error_level: QrErrorLevel::M,
        payload: PayloadKind::Minimal,
    };
}

impl Default for QrConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors from payload construction or rasterization.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR code generation failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("QR payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("QR task failed: {0}")]
    Task(String),
}

/// A rasterized QR code. Dark modules are black, everything else white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    /// The payload this image encodes.
    pub payload: String,
    pub pixels: GrayImage,
}

impl QrImage {
    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    /// Whether the pixel at `(x, y)` is dark.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y).0[0] < 128
    }
}

/// Build the payload text for a receipt.
pub fn payload(data: &ReceiptData, kind: PayloadKind) -> Result<String, QrError> {
    match kind {
        PayloadKind::Minimal => Ok(format!(
            "{}\n{}\n{}\nTransaction: {}\nTotal: ${}",
            data.store_name, data.store_address, data.date, data.transaction_id, data.total
        )),
        PayloadKind::Full => Ok(serde_json::to_string(data)?),
    }
}

/// The payload to rasterize, or `None` when the QR code is switched off.
pub fn request(
    data: &ReceiptData,
    include_qr: bool,
    config: &QrConfig,
) -> Option<Result<String, QrError>> {
    include_qr.then(|| payload(data, config.payload))
}

/// Rasterize a payload into a square image.
///
/// The symbol plus its quiet zone is stretched over `size_px` pixels. When the
/// symbol has more modules than that, the image grows instead: each module
/// gets a whole number of pixels (up to 4) without exceeding `max_px`, and
/// never less than one.
pub fn rasterize(payload: &str, config: &QrConfig) -> Result<QrImage, QrError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), config.error_level.into())?;

    let modules = code.width() as u32;
    let total = modules + config.margin * 2;
    let side = if total <= config.size_px {
        config.size_px
    } else {
        total * (config.max_px / total).clamp(1, 4)
    };

    let mut pixels = GrayImage::from_pixel(side, side, Luma([255]));
    for y in 0..side {
        let my = y * total / side;
        for x in 0..side {
            let mx = x * total / side;
            if mx < config.margin || my < config.margin {
                continue;
            }
            let (qx, qy) = ((mx - config.margin) as usize, (my - config.margin) as usize);
            if qx < modules as usize
                && qy < modules as usize
                && code[(qx, qy)] == qrcode::Color::Dark
            {
                pixels.put_pixel(x, y, Luma([0]));
            }
        }
    }

    Ok(QrImage {
        payload: payload.to_string(),
        pixels,
    })
}

/// Payload and rasterization in one step.
pub fn encode(data: &ReceiptData, include_qr: bool, config: &QrConfig) -> Option<Result<QrImage, QrError>> {
    request(data, include_qr, config).map(|payload| rasterize(&payload?, config))
}
