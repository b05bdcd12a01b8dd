//! # Declarative Components
//!
//! Small builders that emit IR ops, and the receipt layout built from them.
//!
//! ## Design Philosophy
//!
//! Instead of assembling ops by hand, you describe *what* goes in a region:
//!
//! ```
//! use boleta::components::*;
//! use boleta::ir::{Region, RegionKind};
//!
//! let totals = Region::new(RegionKind::Totals)
//!     .child(Row::money("Subtotal:", "7.00"))
//!     .child(Row::money("TOTAL:", "7.75").emphasis())
//!     .child(Row::plain("Payment:", "Cash"))
//!     .child(Separator);
//!
//! assert_eq!(totals.len(), 4);
//! ```
//!
//! ## Component Trait
//!
//! All components implement [`Component`], which appends ops to a region.

mod barcode;
mod layout;
mod receipt;
mod text;

pub use barcode::*;
pub use layout::*;
pub use receipt::*;
pub use text::*;

use crate::ir::{Op, Region};

/// Trait for declarative components.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

// Allow boxed components
impl Component for Box<dyn Component> {
    fn emit(&self, ops: &mut Vec<Op>) {
        self.as_ref().emit(ops);
    }
}

// Allow references to components
impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}

// Optional components emit nothing when absent
impl<T: Component> Component for Option<T> {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(component) = self {
            component.emit(ops);
        }
    }
}

impl Region {
    /// Append a child component.
    pub fn child<C: Component>(mut self, component: C) -> Self {
        component.emit(&mut self.ops);
        self
    }

    /// Append several child components.
    pub fn children<I, C>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Component,
    {
        for c in components {
            c.emit(&mut self.ops);
        }
        self
    }
}
