//! # QR Component
//!
//! The QR slot with its caption.

use std::sync::Arc;

use super::{Component, Text};
use crate::ir::Op;
use crate::qr::QrImage;

/// Caption printed under the QR code.
pub const QR_CAPTION: &str = "Scan for details";

/// A QR image slot plus caption.
///
/// The caption renders whether or not an image is available, so a pending or
/// failed rasterization leaves the layout unchanged apart from the image.
///
/// ## Example
///
/// ```
/// use boleta::components::QrBlock;
///
/// let pending = QrBlock::new(None);
/// ```
#[derive(Debug, Clone)]
pub struct QrBlock {
    image: Option<Arc<QrImage>>,
}

impl QrBlock {
    pub fn new(image: Option<Arc<QrImage>>) -> Self {
        Self { image }
    }
}

impl Component for QrBlock {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::QrCode {
            image: self.image.clone(),
        });
        Text::new(QR_CAPTION).center().muted().emit(ops);
    }
}
