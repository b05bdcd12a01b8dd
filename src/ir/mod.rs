//! # Intermediate Representation (IR)
//!
//! The rendered receipt as a tree: a [`Document`] holds the container rules
//! and an ordered list of [`Region`]s, each a sequence of [`Op`]s.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌────────────────────┐
//! │ Components  │ ──► │     IR      │ ──► │ markup  (print)    │
//! │(declarative)│     │ (Document)  │     │ capture (PNG, PDF) │
//! └─────────────┘     └─────────────┘     └────────────────────┘
//! ```
//!
//! The document is transient: it is derived from the receipt record on every
//! change and never stored.
//!
//! ## Example
//!
//! ```
//! use boleta::ir::{Document, Op, Region, RegionKind};
//! use boleta::style::FALLBACK;
//!
//! let mut region = Region::new(RegionKind::Totals);
//! region.push(Op::Separator);
//! let document = Document { container: FALLBACK.container, regions: vec![region] };
//! assert!(document.to_markup().contains("data-region=\"totals\""));
//! ```

mod markup;
mod ops;

pub use markup::escape_html;
pub use ops::*;

use crate::style::ContainerRules;

/// The nine regions of a receipt, in the only order they ever appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionKind {
    Brand,
    StoreInfo,
    Transaction,
    Items,
    Totals,
    FooterMessage,
    Terms,
    Qr,
    StyleFooter,
}

impl RegionKind {
    pub const ORDER: [RegionKind; 9] = [
        RegionKind::Brand,
        RegionKind::StoreInfo,
        RegionKind::Transaction,
        RegionKind::Items,
        RegionKind::Totals,
        RegionKind::FooterMessage,
        RegionKind::Terms,
        RegionKind::Qr,
        RegionKind::StyleFooter,
    ];

    /// Name used in markup (`data-region`).
    pub fn name(self) -> &'static str {
        match self {
            RegionKind::Brand => "brand",
            RegionKind::StoreInfo => "store-info",
            RegionKind::Transaction => "transaction",
            RegionKind::Items => "items",
            RegionKind::Totals => "totals",
            RegionKind::FooterMessage => "footer-message",
            RegionKind::Terms => "terms",
            RegionKind::Qr => "qr",
            RegionKind::StyleFooter => "style-footer",
        }
    }
}

/// One region of the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub kind: RegionKind,
    pub ops: Vec<Op>,
}

impl Region {
    pub fn new(kind: RegionKind) -> Self {
        Self {
            kind,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// A rendered receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub container: ContainerRules,
    pub regions: Vec<Region>,
}

impl Document {
    /// The region of a given kind, if it was rendered.
    pub fn region(&self, kind: RegionKind) -> Option<&Region> {
        self.regions.iter().find(|region| region.kind == kind)
    }

    /// Kinds of the rendered regions, in order.
    pub fn kinds(&self) -> Vec<RegionKind> {
        self.regions.iter().map(|region| region.kind).collect()
    }

    /// Every op of every region, in order.
    pub fn ops(&self) -> impl Iterator<Item = &Op> {
        self.regions.iter().flat_map(|region| region.ops.iter())
    }

    /// All visible text, one entry per line.
    pub fn text_lines(&self) -> Vec<String> {
        self.ops().flat_map(Op::text_lines).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FALLBACK;

    #[test]
    fn test_region_order_is_sorted() {
        let mut sorted = RegionKind::ORDER;
        sorted.sort();
        assert_eq!(sorted, RegionKind::ORDER);
    }

    #[test]
    fn test_document_lookup() {
        let mut totals = Region::new(RegionKind::Totals);
        totals.push(Op::Row {
            label: "TOTAL:".into(),
            value: Value::Money("1.00".into()),
            emphasis: true,
        });
        let document = Document {
            container: FALLBACK.container,
            regions: vec![Region::new(RegionKind::StoreInfo), totals],
        };
        assert_eq!(document.kinds(), vec![RegionKind::StoreInfo, RegionKind::Totals]);
        assert!(document.region(RegionKind::Items).is_none());
        assert_eq!(document.region(RegionKind::Totals).unwrap().len(), 1);
        assert_eq!(document.text_lines(), vec!["TOTAL: $1.00"]);
    }
}
