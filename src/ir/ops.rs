//! # IR Opcodes
//!
//! The visual operations a receipt region is made of. Each op is one block
//! stacked vertically inside its region; backends (markup, raster capture)
//! walk the ops in order and never reorder them.

use std::sync::Arc;

use crate::qr::QrImage;
use crate::style::{BrandLabel, HeaderRules, TextSize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Font weight steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Weight {
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
    Black,
}

impl Weight {
    pub fn css(self) -> u16 {
        match self {
            Weight::Normal => 400,
            Weight::Medium => 500,
            Weight::Semibold => 600,
            Weight::Bold => 700,
            Weight::Black => 900,
        }
    }

    /// Whether the raster backend should embolden glyphs.
    pub fn is_heavy(self) -> bool {
        self >= Weight::Semibold
    }
}

/// Text color role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    /// Inherits the receipt's text color.
    #[default]
    Default,
    /// Secondary gray.
    Muted,
}

/// Horizontal rule drawn above a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Solid,
    Dashed,
}

/// Visual treatment of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub align: Align,
    pub size: TextSize,
    pub weight: Weight,
    pub tone: Tone,
    pub rule_above: Option<RuleKind>,
}

/// Right-hand side of a label/value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Rendered as typed.
    Plain(String),
    /// A user-typed amount, rendered with a `$` prefix and otherwise verbatim.
    Money(String),
}

impl Value {
    /// Text as it appears on the receipt.
    pub fn display(&self) -> String {
        match self {
            Value::Plain(text) => text.clone(),
            Value::Money(amount) => format!("${}", amount),
        }
    }

    /// Amounts are set in a monospace face.
    pub fn is_money(&self) -> bool {
        matches!(self, Value::Money(_))
    }
}

/// A single visual operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Brand banner: store name in heavy type plus an optional brand label.
    Banner {
        title: String,
        label: Option<BrandLabel>,
        rules: HeaderRules,
    },

    /// A paragraph of text. Wraps within the content box.
    Text { content: String, style: TextStyle },

    /// Label on the left, value on the right.
    ///
    /// Emphasized rows are bold, one size up and carry a thin rule above.
    Row {
        label: String,
        value: Value,
        emphasis: bool,
    },

    /// A purchased line: name (with quantity annotation) against its price.
    Item {
        name: String,
        /// Present only for quantities above one.
        quantity: Option<u32>,
        price: Value,
    },

    /// Thin full-width separator between regions.
    Separator,

    /// QR image slot. `None` while the image is pending or after a failure.
    QrCode { image: Option<Arc<QrImage>> },
}

impl Op {
    /// Plain-text lines this op shows, in reading order.
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            Op::Banner { title, label, .. } => {
                let mut lines = vec![title.clone()];
                if let Some(label) = label {
                    lines.push(label.text.to_string());
                }
                lines
            }
            Op::Text { content, .. } => content.lines().map(str::to_string).collect(),
            Op::Row { label, value, .. } => vec![format!("{} {}", label, value.display())],
            Op::Item {
                name,
                quantity,
                price,
            } => {
                let mut lines = vec![format!("{} {}", name, price.display())];
                if let Some(qty) = quantity {
                    lines.push(format!("Qty: {}", qty));
                }
                lines
            }
            Op::Separator | Op::QrCode { .. } => Vec::new(),
        }
    }
}
