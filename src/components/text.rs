//! # Text Components
//!
//! Paragraphs of styled text.

use super::Component;
use crate::ir::{Align, Op, RuleKind, TextStyle, Tone, Weight};
use crate::style::TextSize;

/// A styled text block.
///
/// ## Example
///
/// ```
/// use boleta::components::Text;
///
/// let caption = Text::new("Scan for details").center().muted();
/// let title = Text::new("Terms & Conditions:").semibold();
/// ```
#[derive(Debug, Clone)]
pub struct Text {
    content: String,
    style: TextStyle,
}

impl Text {
    /// Left-aligned, extra-small, normal weight.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: TextStyle::default(),
        }
    }

    pub fn center(mut self) -> Self {
        self.style.align = Align::Center;
        self
    }

    pub fn size(mut self, size: TextSize) -> Self {
        self.style.size = size;
        self
    }

    pub fn semibold(mut self) -> Self {
        self.style.weight = Weight::Semibold;
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.weight = Weight::Bold;
        self
    }

    /// Secondary gray text.
    pub fn muted(mut self) -> Self {
        self.style.tone = Tone::Muted;
        self
    }

    /// Draw a rule above the text.
    pub fn rule_above(mut self, rule: RuleKind) -> Self {
        self.style.rule_above = Some(rule);
        self
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Text {
            content: self.content.clone(),
            style: self.style,
        });
    }
}

/// The store name as a plain centered heading (used when the banner is off).
pub struct Heading {
    title: String,
}

impl Heading {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Component for Heading {
    fn emit(&self, ops: &mut Vec<Op>) {
        Text::new(self.title.clone())
            .center()
            .bold()
            .size(TextSize::Sm)
            .emit(ops);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let mut ops = Vec::new();
        Text::new("hi").emit(&mut ops);
        assert_eq!(
            ops,
            vec![Op::Text {
                content: "hi".into(),
                style: TextStyle {
                    align: Align::Left,
                    size: TextSize::Xs,
                    weight: Weight::Normal,
                    tone: Tone::Default,
                    rule_above: None,
                },
            }]
        );
    }

    #[test]
    fn test_text_builders() {
        let mut ops = Vec::new();
        Text::new("x")
            .center()
            .semibold()
            .muted()
            .rule_above(RuleKind::Dashed)
            .emit(&mut ops);
        match &ops[0] {
            Op::Text { style, .. } => {
                assert_eq!(style.align, Align::Center);
                assert_eq!(style.weight, Weight::Semibold);
                assert_eq!(style.tone, Tone::Muted);
                assert_eq!(style.rule_above, Some(RuleKind::Dashed));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_bold_and_size_override() {
        let mut ops = Vec::new();
        Text::new("TOTAL").semibold().bold().size(TextSize::Base).emit(&mut ops);
        match &ops[0] {
            Op::Text { style, .. } => {
                assert_eq!(style.weight, Weight::Bold);
                assert_eq!(style.size, TextSize::Base);
                assert_eq!(style.align, Align::Left);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_heading() {
        let mut ops = Vec::new();
        Heading::new("Shop").emit(&mut ops);
        match &ops[0] {
            Op::Text { content, style } => {
                assert_eq!(content, "Shop");
                assert_eq!(style.align, Align::Center);
                assert_eq!(style.weight, Weight::Bold);
                assert_eq!(style.size, TextSize::Sm);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }
}
