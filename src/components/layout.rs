//! # Layout Components
//!
//! Separators, label/value rows, item lines and the brand banner.

use super::Component;
use crate::ir::{Op, Value};
use crate::receipt::ReceiptItem;
use crate::style::{BrandLabel, HeaderRules};

/// A thin full-width separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Separator;

impl Component for Separator {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Separator);
    }
}

/// A label/value row (`Date:  1/20/2026`).
///
/// ## Example
///
/// ```
/// use boleta::components::Row;
///
/// let date = Row::plain("Date:", "1/20/2026");
/// let total = Row::money("TOTAL:", "7.75").emphasis();
/// ```
#[derive(Debug, Clone)]
pub struct Row {
    label: String,
    value: Value,
    emphasis: bool,
}

impl Row {
    /// Value shown as typed.
    pub fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Value::Plain(value.into()),
            emphasis: false,
        }
    }

    /// Amount shown with a `$` prefix.
    pub fn money(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Value::Money(amount.into()),
            emphasis: false,
        }
    }

    /// Bold, larger, with a rule above.
    pub fn emphasis(mut self) -> Self {
        self.emphasis = true;
        self
    }
}

impl Component for Row {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Row {
            label: self.label.clone(),
            value: self.value.clone(),
            emphasis: self.emphasis,
        });
    }
}

/// One purchased item.
///
/// The quantity annotation only appears for quantities above one.
#[derive(Debug, Clone)]
pub struct LineItem {
    name: String,
    price: String,
    quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: 1,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

impl From<&ReceiptItem> for LineItem {
    fn from(item: &ReceiptItem) -> Self {
        LineItem::new(item.name.clone(), item.price.clone()).quantity(item.quantity)
    }
}

impl Component for LineItem {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Item {
            name: self.name.clone(),
            quantity: (self.quantity > 1).then_some(self.quantity),
            price: Value::Money(self.price.clone()),
        });
    }
}

/// Brand banner at the top of the receipt.
#[derive(Debug, Clone)]
pub struct Banner {
    title: String,
    label: Option<BrandLabel>,
    rules: HeaderRules,
}

impl Banner {
    pub fn new(title: impl Into<String>, rules: HeaderRules) -> Self {
        Self {
            title: title.into(),
            label: None,
            rules,
        }
    }

    pub fn label(mut self, label: Option<BrandLabel>) -> Self {
        self.label = label;
        self
    }
}

impl Component for Banner {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Banner {
            title: self.title.clone(),
            label: self.label,
            rules: self.rules,
        });
    }
}
