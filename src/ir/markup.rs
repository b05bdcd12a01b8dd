//! Markup generation: IR document → standalone HTML fragment.
//!
//! Styles are inlined so the fragment renders the same when copied into a
//! print document with no stylesheet of its own.

use std::fmt::Write;

use super::{Document, Op, Region, RuleKind, TextStyle, Tone, Value};
use crate::qr::QrImage;
use crate::style::{ContainerRules, FontFamily, HeaderRules, palette};

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text and keep its line breaks.
fn escape_multiline(text: &str) -> String {
    text.lines().map(escape_html).collect::<Vec<_>>().join("<br>")
}

impl Document {
    /// Render the document as an HTML fragment rooted at the receipt container.
    pub fn to_markup(&self) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            "<div class=\"receipt-container {}\" style=\"{}\">",
            self.container.class,
            container_css(&self.container)
        );
        for region in &self.regions {
            write_region(&mut html, region);
        }
        html.push_str("</div>");
        html
    }
}

fn container_css(rules: &ContainerRules) -> String {
    let mut css = format!(
        "box-sizing:border-box;width:80mm;min-height:200px;margin:0 auto;padding:16px;\
         font-size:12px;line-height:1.25;color:#000000;background:{};font-family:{};",
        rules.background.css(),
        rules.font.css()
    );
    if let Some(border) = rules.border {
        let _ = write!(css, "border:{}px solid {};", border.width, border.color.css());
    }
    if rules.rounded {
        css.push_str("border-radius:8px;");
    }
    if rules.shadow {
        css.push_str("box-shadow:0 4px 12px rgba(0,0,0,0.12);");
    }
    css
}

fn write_region(html: &mut String, region: &Region) {
    let _ = write!(html, "<div data-region=\"{}\">", region.kind.name());
    for op in &region.ops {
        write_op(html, op);
    }
    html.push_str("</div>");
}

fn write_op(html: &mut String, op: &Op) {
    match op {
        Op::Banner {
            title,
            label,
            rules,
        } => {
            let _ = write!(
                html,
                "<div class=\"receipt-banner\" style=\"{}\"><div style=\"font-size:18px;font-weight:900\">{}</div>",
                banner_css(rules),
                escape_html(title)
            );
            if let Some(label) = label {
                let _ = write!(
                    html,
                    "<div style=\"font-size:12px;margin-top:4px\">{} {}</div>",
                    label.icon,
                    escape_html(label.text)
                );
            }
            html.push_str("</div>");
        }

        Op::Text { content, style } => {
            let _ = write!(
                html,
                "<div style=\"{}\">{}</div>",
                text_css(style),
                escape_multiline(content)
            );
        }

        Op::Row {
            label,
            value,
            emphasis,
        } => {
            let mut css = String::from("display:flex;justify-content:space-between;margin:2px 0;");
            if *emphasis {
                let _ = write!(
                    css,
                    "font-weight:700;font-size:14px;border-top:1px solid {};padding-top:4px;",
                    palette::GRAY_200.css()
                );
            }
            let _ = write!(
                html,
                "<div style=\"{}\"><span>{}</span>{}</div>",
                css,
                escape_html(label),
                value_span(value)
            );
        }

        Op::Item {
            name,
            quantity,
            price,
        } => {
            html.push_str(
                "<div style=\"display:flex;justify-content:space-between;align-items:flex-start;padding:4px 0\">\
                 <div style=\"flex:1;padding-right:8px\">",
            );
            let _ = write!(html, "<div style=\"font-weight:500\">{}</div>", escape_html(name));
            if let Some(qty) = quantity {
                let _ = write!(
                    html,
                    "<div style=\"font-size:12px;color:{}\">Qty: {}</div>",
                    palette::GRAY_600.css(),
                    qty
                );
            }
            let _ = write!(html, "</div>{}</div>", value_span(price));
        }

        Op::Separator => {
            let _ = write!(
                html,
                "<hr style=\"border:0;border-top:1px solid {};margin:8px 0\">",
                palette::GRAY_200.css()
            );
        }

        Op::QrCode { image } => {
            html.push_str("<div style=\"text-align:center;margin-top:12px\"><div style=\"display:inline-block\">");
            if let Some(image) = image {
                html.push_str(&qr_svg(image));
            }
            html.push_str("</div></div>");
        }
    }
}

fn banner_css(rules: &HeaderRules) -> String {
    let mut css = format!(
        "text-align:center;font-weight:700;margin-bottom:8px;color:{};font-size:{}px;",
        rules.text_color.css(),
        rules.size.px()
    );
    if let Some(border) = rules.border_bottom {
        let _ = write!(
            css,
            "padding-bottom:8px;border-bottom:{}px solid {};",
            border.width,
            border.color.css()
        );
    }
    if let Some(fill) = rules.fill {
        let _ = write!(
            css,
            "background:{};margin-left:-16px;margin-right:-16px;padding-left:16px;padding-right:16px;",
            fill.css()
        );
    }
    css
}

fn text_css(style: &TextStyle) -> String {
    let mut css = format!(
        "text-align:{};font-size:{}px;font-weight:{};margin:2px 0;",
        style.align.css(),
        style.size.px(),
        style.weight.css()
    );
    if style.tone == Tone::Muted {
        let _ = write!(css, "color:{};", palette::GRAY_600.css());
    }
    if let Some(rule) = style.rule_above {
        let line = match rule {
            RuleKind::Solid => "solid",
            RuleKind::Dashed => "dashed",
        };
        let _ = write!(
            css,
            "border-top:1px {} {};padding-top:8px;margin-top:12px;",
            line,
            palette::GRAY_300.css()
        );
    }
    css
}

fn value_span(value: &Value) -> String {
    if value.is_money() {
        format!(
            "<span style=\"font-family:{}\">{}</span>",
            FontFamily::Mono.css(),
            escape_html(&value.display())
        )
    } else {
        format!("<span>{}</span>", escape_html(&value.display()))
    }
}

/// Inline SVG for a QR image, one path segment per horizontal run of dark pixels.
fn qr_svg(image: &QrImage) -> String {
    let size = image.size();
    let mut path = String::new();
    for y in 0..size {
        let mut x = 0;
        while x < size {
            if image.is_dark(x, y) {
                let start = x;
                while x < size && image.is_dark(x, y) {
                    x += 1;
                }
                let _ = write!(path, "M{} {}h{}v1h-{}z", start, y, x - start, x - start);
            } else {
                x += 1;
            }
        }
    }
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\" \
         style=\"max-width:100%;height:auto\" shape-rendering=\"crispEdges\"><rect width=\"{0}\" height=\"{0}\" fill=\"#ffffff\"/>\
         <path fill=\"#000000\" d=\"{1}\"/></svg>",
        size, path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{RegionKind, Weight};
    use crate::qr::{self, QrConfig};
    use crate::style::{self, TextSize};
    use crate::receipt::ReceiptStyle;
    use std::sync::Arc;

    fn document(ops: Vec<Op>) -> Document {
        let mut region = Region::new(RegionKind::FooterMessage);
        region.ops = ops;
        Document {
            container: style::resolve(ReceiptStyle::Pharmacy, true).container,
            regions: vec![region],
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Fish & \"Chips\"</b>"),
            "&lt;b&gt;Fish &amp; &quot;Chips&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_container_rules_in_markup() {
        let html = document(Vec::new()).to_markup();
        assert!(html.starts_with("<div class=\"receipt-container receipt-pharmacy\""));
        assert!(html.contains("background:#eff6ff"));
        assert!(html.contains("border:2px solid #3b82f6"));
        assert!(html.contains("data-region=\"footer-message\""));
    }

    #[test]
    fn test_text_is_escaped_and_multiline() {
        let html = document(vec![Op::Text {
            content: "Line <1>\nLine 2".into(),
            style: TextStyle {
                size: TextSize::Xs,
                weight: Weight::Semibold,
                ..Default::default()
            },
        }])
        .to_markup();
        assert!(html.contains("Line &lt;1&gt;<br>Line 2"));
        assert!(html.contains("font-weight:600"));
    }

    #[test]
    fn test_money_is_verbatim() {
        let html = document(vec![Op::Row {
            label: "TOTAL:".into(),
            value: Value::Money("12.34".into()),
            emphasis: true,
        }])
        .to_markup();
        assert!(html.contains(">$12.34</span>"));
    }

    #[test]
    fn test_dense_qr_svg_fits_receipt() {
        let payload = qr::payload(&crate::receipt::sample_receipt(), qr::PayloadKind::Full).unwrap();
        let image = qr::rasterize(&payload, &QrConfig::DEFAULT).unwrap();
        let side = image.size();
        assert!(side <= 270);

        let html = document(vec![Op::QrCode {
            image: Some(Arc::new(image)),
        }])
        .to_markup();
        assert!(html.contains(&format!("width=\"{0}\" height=\"{0}\"", side)));
    }

    #[test]
    fn test_qr_svg() {
        let image = qr::rasterize("hello", &QrConfig::DEFAULT).unwrap();
        let html = document(vec![Op::QrCode {
            image: Some(Arc::new(image)),
        }])
        .to_markup();
        assert!(html.contains("<svg"));
        assert!(html.contains("viewBox=\"0 0 80 80\""));

        assert!(html.contains("max-width:100%"));

        let empty = document(vec![Op::QrCode { image: None }]).to_markup();
        assert!(!empty.contains("<svg"));
    }
}
