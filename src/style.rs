//! # Style Resolver
//!
//! Maps a receipt style to the concrete visual rules the renderer and the
//! capture/markup backends consume.
//!
//! Every style is one row in [`STYLE_TABLE`]; unknown names resolve to
//! [`FALLBACK`]. Adding a style means adding a row, not a branch.
//!
//! ```
//! use boleta::receipt::ReceiptStyle;
//! use boleta::style;
//!
//! let rules = style::resolve(ReceiptStyle::Pharmacy, true);
//! assert_eq!(rules.brand_label.unwrap().text, "PHARMACY & MEDICAL");
//!
//! let unknown = style::resolve_name("neon", true);
//! assert_eq!(unknown, style::FALLBACK.resolved(true));
//! ```

use crate::receipt::ReceiptStyle;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build a color from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// CSS notation (`#rrggbb`).
    pub fn css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Palette used by the style table.
pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::hex(0xffffff);
    pub const BLACK: Color = Color::hex(0x000000);
    pub const GRAY_200: Color = Color::hex(0xe5e7eb);
    pub const GRAY_300: Color = Color::hex(0xd1d5db);
    pub const GRAY_400: Color = Color::hex(0x9ca3af);
    pub const GRAY_600: Color = Color::hex(0x4b5563);
    pub const GRAY_800: Color = Color::hex(0x1f2937);
    pub const GRAY_900: Color = Color::hex(0x111827);
    pub const BLUE_50: Color = Color::hex(0xeff6ff);
    pub const BLUE_500: Color = Color::hex(0x3b82f6);
    pub const BLUE_800: Color = Color::hex(0x1e40af);
    pub const GREEN_50: Color = Color::hex(0xf0fdf4);
    pub const GREEN_500: Color = Color::hex(0x22c55e);
    pub const GREEN_800: Color = Color::hex(0x166534);
    pub const YELLOW_50: Color = Color::hex(0xfefce8);
    pub const YELLOW_200: Color = Color::hex(0xfef08a);
    pub const YELLOW_500: Color = Color::hex(0xeab308);
    pub const YELLOW_800: Color = Color::hex(0x854d0e);
    pub const AMBER_50: Color = Color::hex(0xfffbeb);
    pub const AMBER_200: Color = Color::hex(0xfde68a);
    pub const AMBER_600: Color = Color::hex(0xd97706);
    pub const AMBER_800: Color = Color::hex(0x92400e);
    pub const PURPLE_50: Color = Color::hex(0xfaf5ff);
    pub const PURPLE_200: Color = Color::hex(0xe9d5ff);
    pub const PURPLE_500: Color = Color::hex(0xa855f7);
    pub const PURPLE_800: Color = Color::hex(0x6b21a8);
}

use palette::*;

/// Font family class of the whole receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    /// CSS `font-family` stack.
    pub fn css(self) -> &'static str {
        match self {
            FontFamily::Sans => "ui-sans-serif, system-ui, sans-serif",
            FontFamily::Serif => "ui-serif, Georgia, serif",
            FontFamily::Mono => "ui-monospace, Menlo, monospace",
        }
    }
}

/// Text size steps, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextSize {
    /// 12px
    #[default]
    Xs,
    /// 14px
    Sm,
    /// 16px
    Base,
    /// 18px
    Lg,
}

impl TextSize {
    pub fn px(self) -> u32 {
        match self {
            TextSize::Xs => 12,
            TextSize::Sm => 14,
            TextSize::Base => 16,
            TextSize::Lg => 18,
        }
    }
}

/// A solid or dashed border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    /// Width in CSS pixels.
    pub width: u32,
    pub color: Color,
}

impl Border {
    pub const fn new(width: u32, color: Color) -> Self {
        Self { width, color }
    }
}

// ============================================================================
// RULE SETS
// ============================================================================

/// Rules for the outer receipt container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerRules {
    /// Style class carried into markup output.
    pub class: &'static str,
    pub font: FontFamily,
    pub border: Option<Border>,
    pub background: Color,
    pub rounded: bool,
    pub shadow: bool,
}

/// Rules for the brand banner at the top of the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderRules {
    pub text_color: Color,
    pub size: TextSize,
    pub border_bottom: Option<Border>,
    /// Full-bleed fill behind the banner.
    pub fill: Option<Color>,
}

/// Label printed under the store name in the brand banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrandLabel {
    /// Emoji shown in markup output only.
    pub icon: &'static str,
    pub text: &'static str,
}

/// Marker appended after every other region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FooterMarker {
    pub text: &'static str,
    /// Draw a dashed rule above the marker.
    pub dashed_rule: bool,
}

/// One row of the style table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleRules {
    pub container: ContainerRules,
    pub header: HeaderRules,
    pub brand_label: Option<BrandLabel>,
    pub footer_marker: Option<FooterMarker>,
}

impl StyleRules {
    /// Apply the logo toggle: brand labels only appear with the logo on.
    pub fn resolved(&self, include_logo: bool) -> ResolvedStyle {
        ResolvedStyle {
            container: self.container,
            header: self.header,
            brand_label: self.brand_label.filter(|_| include_logo),
            footer_marker: self.footer_marker,
        }
    }
}

/// Output of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedStyle {
    pub container: ContainerRules,
    pub header: HeaderRules,
    pub brand_label: Option<BrandLabel>,
    pub footer_marker: Option<FooterMarker>,
}

// ============================================================================
// TABLE
// ============================================================================

const PLAIN_HEADER: HeaderRules = HeaderRules {
    text_color: GRAY_900,
    size: TextSize::Sm,
    border_bottom: None,
    fill: None,
};

const fn container(
    class: &'static str,
    font: FontFamily,
    border: Option<Border>,
    background: Color,
) -> ContainerRules {
    ContainerRules {
        class,
        font,
        border,
        background,
        rounded: false,
        shadow: false,
    }
}

const fn header(text_color: Color, size: TextSize, border: Border, fill: Option<Color>) -> HeaderRules {
    HeaderRules {
        text_color,
        size,
        border_bottom: Some(border),
        fill,
    }
}

const fn label(icon: &'static str, text: &'static str) -> Option<BrandLabel> {
    Some(BrandLabel { icon, text })
}

/// Rules for style names outside the table.
pub static FALLBACK: StyleRules = StyleRules {
    container: container("receipt-modern", FontFamily::Sans, None, WHITE),
    header: PLAIN_HEADER,
    brand_label: None,
    footer_marker: None,
};

/// One entry per style variant.
pub static STYLE_TABLE: [(ReceiptStyle, StyleRules); 10] = [
    (
        ReceiptStyle::Modern,
        StyleRules {
            container: ContainerRules {
                rounded: true,
                shadow: true,
                ..container("receipt-modern", FontFamily::Sans, None, WHITE)
            },
            header: PLAIN_HEADER,
            brand_label: None,
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Thermal,
        StyleRules {
            container: container(
                "receipt-thermal",
                FontFamily::Mono,
                Some(Border::new(1, GRAY_300)),
                WHITE,
            ),
            header: PLAIN_HEADER,
            brand_label: None,
            footer_marker: Some(FooterMarker {
                text: "** CUSTOMER COPY **",
                dashed_rule: true,
            }),
        },
    ),
    (
        ReceiptStyle::Corporate,
        StyleRules {
            container: container(
                "receipt-corporate",
                FontFamily::Sans,
                Some(Border::new(2, GRAY_800)),
                WHITE,
            ),
            header: header(GRAY_900, TextSize::Sm, Border::new(2, GRAY_800), None),
            brand_label: None,
            footer_marker: Some(FooterMarker {
                text: "CORPORATE RECEIPT",
                dashed_rule: false,
            }),
        },
    ),
    (
        ReceiptStyle::Retail,
        StyleRules {
            container: container(
                "receipt-retail",
                FontFamily::Sans,
                Some(Border::new(1, GRAY_400)),
                WHITE,
            ),
            header: PLAIN_HEADER,
            brand_label: None,
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Restaurant,
        StyleRules {
            container: container(
                "receipt-restaurant",
                FontFamily::Serif,
                Some(Border::new(1, GRAY_600)),
                WHITE,
            ),
            header: header(GRAY_800, TextSize::Base, Border::new(2, GRAY_800), None),
            brand_label: label("🍽️", "FINE DINING"),
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Pharmacy,
        StyleRules {
            container: container(
                "receipt-pharmacy",
                FontFamily::Sans,
                Some(Border::new(2, BLUE_500)),
                BLUE_50,
            ),
            header: header(BLUE_800, TextSize::Sm, Border::new(2, BLUE_500), None),
            brand_label: label("🏥", "PHARMACY & MEDICAL"),
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Grocery,
        StyleRules {
            container: container(
                "receipt-grocery",
                FontFamily::Sans,
                Some(Border::new(1, GREEN_500)),
                GREEN_50,
            ),
            header: header(GREEN_800, TextSize::Sm, Border::new(2, GREEN_500), None),
            brand_label: label("🛒", "FRESH GROCERIES"),
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Gas,
        StyleRules {
            container: container(
                "receipt-gas",
                FontFamily::Mono,
                Some(Border::new(2, YELLOW_500)),
                YELLOW_50,
            ),
            header: header(
                YELLOW_800,
                TextSize::Sm,
                Border::new(2, YELLOW_500),
                Some(YELLOW_200),
            ),
            brand_label: label("⛽", "FUEL & CONVENIENCE"),
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Coffee,
        StyleRules {
            container: container(
                "receipt-coffee",
                FontFamily::Sans,
                Some(Border::new(2, AMBER_600)),
                AMBER_50,
            ),
            header: header(
                AMBER_800,
                TextSize::Sm,
                Border::new(2, AMBER_600),
                Some(AMBER_200),
            ),
            brand_label: label("☕", "ARTISAN COFFEE"),
            footer_marker: None,
        },
    ),
    (
        ReceiptStyle::Tech,
        StyleRules {
            container: container(
                "receipt-tech",
                FontFamily::Sans,
                Some(Border::new(2, PURPLE_500)),
                PURPLE_50,
            ),
            header: header(
                PURPLE_800,
                TextSize::Sm,
                Border::new(2, PURPLE_500),
                Some(PURPLE_200),
            ),
            brand_label: label("📱", "ELECTRONICS & TECH"),
            footer_marker: None,
        },
    ),
];

/// Table row for a style.
pub fn rules(style: ReceiptStyle) -> &'static StyleRules {
    STYLE_TABLE
        .iter()
        .find(|(key, _)| *key == style)
        .map(|(_, rules)| rules)
        .unwrap_or(&FALLBACK)
}

/// Resolve a style variant.
pub fn resolve(style: ReceiptStyle, include_logo: bool) -> ResolvedStyle {
    rules(style).resolved(include_logo)
}

/// Resolve a style by name. Unknown names get [`FALLBACK`].
pub fn resolve_name(name: &str, include_logo: bool) -> ResolvedStyle {
    match name.parse::<ReceiptStyle>() {
        Ok(style) => resolve(style, include_logo),
        Err(_) => FALLBACK.resolved(include_logo),
    }
}
