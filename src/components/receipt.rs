//! # Receipt Layout
//!
//! Turns a receipt record into the ordered [`Document`] every backend consumes.
//!
//! Regions always appear in [`RegionKind::ORDER`]; a region that has nothing
//! to show is left out rather than emitted empty, except the store info and
//! transaction regions whose separators are always drawn.

use std::sync::Arc;

use super::{Banner, Heading, LineItem, QrBlock, Row, Separator, Text};
use crate::ir::{Document, Region, RegionKind, RuleKind};
use crate::qr::QrImage;
use crate::receipt::{ReceiptData, ReceiptOptions, present};
use crate::style::{self, ResolvedStyle};

/// Layout for a single receipt.
///
/// ## Example
///
/// ```
/// use boleta::components::ReceiptLayout;
/// use boleta::receipt::{ReceiptOptions, sample_receipt};
/// use boleta::style;
///
/// let data = sample_receipt();
/// let options = ReceiptOptions::default();
/// let resolved = style::resolve(data.style, options.include_logo);
/// let document = ReceiptLayout::new(&data, &options, &resolved).render();
/// assert!(document.text_lines().contains(&"Scan for details".to_string()));
/// ```
pub struct ReceiptLayout<'a> {
    data: &'a ReceiptData,
    options: &'a ReceiptOptions,
    style: &'a ResolvedStyle,
    qr: Option<Arc<QrImage>>,
}

impl<'a> ReceiptLayout<'a> {
    pub fn new(data: &'a ReceiptData, options: &'a ReceiptOptions, style: &'a ResolvedStyle) -> Self {
        Self {
            data,
            options,
            style,
            qr: None,
        }
    }

    /// Attach the rasterized QR image. Without one the QR slot stays empty.
    pub fn qr(mut self, image: Option<Arc<QrImage>>) -> Self {
        self.qr = image;
        self
    }

    /// Build the document.
    pub fn render(&self) -> Document {
        let regions = [
            self.brand(),
            Some(self.store_info()),
            Some(self.transaction()),
            self.items(),
            Some(self.totals()),
            self.footer_message(),
            self.terms(),
            self.qr_region(),
            self.style_footer(),
        ];

        Document {
            container: self.style.container,
            regions: regions.into_iter().flatten().collect(),
        }
    }

    // ===== REGIONS =====

    fn brand(&self) -> Option<Region> {
        if !self.options.include_logo {
            return None;
        }
        let name = present(&self.data.store_name)?;
        Some(
            Region::new(RegionKind::Brand)
                .child(Banner::new(name, self.style.header).label(self.style.brand_label)),
        )
    }

    fn store_info(&self) -> Region {
        let data = self.data;
        let heading = present(&data.store_name)
            .filter(|_| !self.options.include_logo)
            .map(Heading::new);

        let contact = |value: &str| {
            present(value)
                .filter(|_| self.options.include_contact)
                .map(|v| Text::new(v).center())
        };

        Region::new(RegionKind::StoreInfo)
            .child(heading)
            .child(present(&data.store_address).map(|a| Text::new(a).center()))
            .child(contact(&data.store_phone))
            .child(contact(&data.store_email))
            .child(Separator)
    }

    fn transaction(&self) -> Region {
        let data = self.data;
        Region::new(RegionKind::Transaction)
            .child(Row::plain("Date:", data.date.as_str()))
            .child(Row::plain("Transaction ID:", data.transaction_id.as_str()))
            .child(present(&data.cashier).map(|c| Row::plain("Cashier:", c)))
            .child(Separator)
    }

    fn items(&self) -> Option<Region> {
        if self.data.items.is_empty() {
            return None;
        }
        Some(
            Region::new(RegionKind::Items)
                .children(self.data.items.iter().map(LineItem::from))
                .child(Separator),
        )
    }

    fn totals(&self) -> Region {
        let data = self.data;
        Region::new(RegionKind::Totals)
            .child(present(&data.subtotal).map(|s| Row::money("Subtotal:", s)))
            .child(present(&data.tax).map(|t| Row::money("Tax:", t)))
            .child(Row::money("TOTAL:", data.display_total()).emphasis())
            .child(Row::plain("Payment:", data.payment_method.as_str()))
            .child(Separator)
    }

    fn footer_message(&self) -> Option<Region> {
        let message = present(&self.data.footer_message)?;
        Some(Region::new(RegionKind::FooterMessage).child(Text::new(message).center()))
    }

    fn terms(&self) -> Option<Region> {
        if !self.options.include_terms {
            return None;
        }
        let terms = present(&self.data.terms)?;
        Some(
            Region::new(RegionKind::Terms)
                .child(
                    Text::new("Terms & Conditions:")
                        .semibold()
                        .muted()
                        .rule_above(RuleKind::Solid),
                )
                .child(Text::new(terms).muted()),
        )
    }

    fn qr_region(&self) -> Option<Region> {
        self.options
            .include_qr
            .then(|| Region::new(RegionKind::Qr).child(QrBlock::new(self.qr.clone())))
    }

    fn style_footer(&self) -> Option<Region> {
        let marker = self.style.footer_marker?;
        let mut text = Text::new(marker.text).center();
        if marker.dashed_rule {
            text = text.rule_above(RuleKind::Dashed);
        }
        Some(Region::new(RegionKind::StyleFooter).child(text))
    }
}

/// Render with an already-resolved style.
pub fn render(
    data: &ReceiptData,
    options: &ReceiptOptions,
    style: &ResolvedStyle,
    qr: Option<Arc<QrImage>>,
) -> Document {
    ReceiptLayout::new(data, options, style).qr(qr).render()
}

/// Resolve the record's style and render.
pub fn render_receipt(data: &ReceiptData, options: &ReceiptOptions, qr: Option<Arc<QrImage>>) -> Document {
    let resolved = style::resolve(data.style, options.include_logo);
    render(data, options, &resolved, qr)
}
