//! # Raster Capture
//!
//! Renders an IR [`Document`] to an RGB raster, the image that ends up inside
//! the exported PDF (and in PNG previews).
//!
//! ## Architecture
//!
//! ```text
//! Document (IR) → Capturer → RgbImage → PNG bytes / PDF page
//!                     ↓
//!               Process each Op:
//!               - Track the vertical cursor
//!               - Render text with Spleen bitmap fonts
//!               - Blit the QR image
//!               - Paint container border and corners last
//! ```
//!
//! All measurements are taken in CSS pixels and multiplied by the page's
//! oversampling factor, so a 2× capture of an 80mm receipt is 604 px wide.
//!
//! ## Example
//!
//! ```
//! use boleta::capture;
//! use boleta::components::render_receipt;
//! use boleta::config::PageConfig;
//! use boleta::receipt::{ReceiptOptions, sample_receipt};
//!
//! let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
//! let image = capture::capture(&document, &PageConfig::RECEIPT_80MM).unwrap();
//! assert_eq!(image.width(), 604);
//! ```

mod font;
mod text;

pub use font::{FontMetrics, generate_glyph};

use std::collections::HashMap;

use crate::config::PageConfig;
use crate::ir::{Align, Document, Op, RuleKind, TextStyle, Tone, Weight};
use crate::qr::QrImage;
use crate::style::{Color, ContainerRules, HeaderRules, TextSize, palette};
use image::RgbImage;
use thiserror::Error;

use text::Pen;

/// Errors that can occur while capturing a raster.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Page has no drawable area ({width}x{height} px)")]
    EmptyPage { width: usize, height: usize },

    #[error("Image encoding error: {0}")]
    ImageEncode(String),
}

/// Text color for default-tone text.
const INK: Color = palette::BLACK;

/// Raster renderer for IR documents.
pub struct Capturer {
    /// Oversampling factor
    scale: usize,
    /// Full raster width in pixels
    width: usize,
    /// Left edge of the content box
    left: usize,
    /// Width of the content box
    content_width: usize,
    padding: usize,
    min_height: usize,
    /// Container tint; new rows start with it
    fill: Color,
    /// Page color outside rounded corners
    page_background: Color,
    buffer: Vec<u8>,
    height: usize,
    /// Vertical cursor
    y: usize,
    glyph_cache: HashMap<(TextSize, char), Vec<u8>>,
}

impl Capturer {
    /// Create a capturer for the given page and container tint.
    pub fn new(page: &PageConfig, fill: Color) -> Result<Self, CaptureError> {
        let scale = page.scale as usize;
        let width = page.capture_width_px() as usize;
        let content_width = page.content_width_px as usize * scale;
        if scale == 0 || content_width == 0 {
            return Err(CaptureError::EmptyPage {
                width,
                height: page.min_height_px as usize * scale,
            });
        }

        let padding = page.padding_px as usize * scale;
        let initial_height = 100;
        let mut capturer = Self {
            scale,
            width,
            left: padding,
            content_width,
            padding,
            min_height: page.min_height_px as usize * scale,
            fill,
            page_background: page.background,
            buffer: Vec::new(),
            height: 0,
            y: padding,
            glyph_cache: HashMap::new(),
        };
        capturer.ensure_height(initial_height);
        Ok(capturer)
    }

    /// CSS pixels to device pixels.
    fn px(&self, css: usize) -> usize {
        css * self.scale
    }

    /// Ensure buffer has room for the given y position.
    fn ensure_height(&mut self, y: usize) {
        let needed_height = y + 1;
        if needed_height > self.height {
            // Grow by at least 100 rows or to needed height
            let new_height = needed_height.max(self.height + 100);
            let [r, g, b] = self.fill.rgb();
            self.buffer.reserve((new_height - self.height) * self.width * 3);
            for _ in 0..(new_height - self.height) * self.width {
                self.buffer.extend_from_slice(&[r, g, b]);
            }
            self.height = new_height;
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width {
            return;
        }
        self.ensure_height(y);
        let idx = (y * self.width + x) * 3;
        self.buffer[idx..idx + 3].copy_from_slice(&color.rgb());
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        for py in y..y + h {
            for px in x..(x + w).min(self.width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// One CSS pixel thick line across the content box.
    fn rule(&mut self, kind: RuleKind, color: Color) {
        let thickness = self.px(1);
        let dash = self.px(4);
        for x in 0..self.content_width {
            // Dashed pattern: 4 on, 4 off
            if kind == RuleKind::Dashed && (x / dash) % 2 == 1 {
                continue;
            }
            for t in 0..thickness {
                self.set_pixel(self.left + x, self.y + t, color);
            }
        }
        self.y += thickness;
    }

    /// Cached glyph bitmap.
    fn glyph(&mut self, size: TextSize, ch: char) -> Vec<u8> {
        let scale = self.scale;
        self.glyph_cache
            .entry((size, ch))
            .or_insert_with(|| generate_glyph(size, scale, ch))
            .clone()
    }

    /// Render the document to an RGB image.
    pub fn render(mut self, document: &Document) -> Result<RgbImage, CaptureError> {
        for op in document.ops() {
            self.process_op(op);
        }
        self.finish(&document.container)
    }

    /// Process a single IR operation.
    fn process_op(&mut self, op: &Op) {
        match op {
            Op::Banner {
                title,
                label,
                rules,
            } => self.render_banner(title, label.map(|l| l.text), rules),

            Op::Text { content, style } => self.render_text(content, style),

            Op::Row {
                label,
                value,
                emphasis,
            } => {
                let (size, weight) = if *emphasis {
                    self.rule(RuleKind::Solid, palette::GRAY_200);
                    self.y += self.px(4);
                    (TextSize::Sm, Weight::Bold)
                } else {
                    (TextSize::Xs, Weight::Normal)
                };
                self.y += self.px(2);
                self.render_pair(label, &value.display(), size, weight);
                self.y += self.px(2);
            }

            Op::Item {
                name,
                quantity,
                price,
            } => {
                self.y += self.px(4);
                let top = self.y;
                let pen = Pen {
                    size: TextSize::Xs,
                    weight: Weight::Medium,
                    color: INK,
                };

                // Price pinned to the top right
                let price = price.display();
                let price_width = self.text_width(&price, TextSize::Xs);
                let price_x = self.left + self.content_width.saturating_sub(price_width);
                self.draw_line(&price, price_x, top, pen);

                // Name wraps in the space left of the price
                let saved = self.content_width;
                self.content_width = saved.saturating_sub(price_width + self.px(8));
                self.draw_paragraph(name, Align::Left, pen);
                if let Some(qty) = quantity {
                    let muted = Pen {
                        weight: Weight::Normal,
                        color: palette::GRAY_600,
                        ..pen
                    };
                    self.draw_paragraph(&format!("Qty: {}", qty), Align::Left, muted);
                }
                self.content_width = saved;

                let line = FontMetrics::for_size(TextSize::Xs, self.scale).line_height();
                self.y = self.y.max(top + line) + self.px(4);
            }

            Op::Separator => {
                self.y += self.px(8);
                self.rule(RuleKind::Solid, palette::GRAY_200);
                self.y += self.px(8);
            }

            Op::QrCode { image } => {
                self.y += self.px(12);
                if let Some(image) = image {
                    self.render_qr(image);
                }
            }
        }
    }

    fn render_banner(&mut self, title: &str, label: Option<&str>, rules: &HeaderRules) {
        let top = self.y;
        let title_pen = Pen {
            size: TextSize::Lg,
            weight: Weight::Black,
            color: rules.text_color,
        };
        let label_pen = Pen {
            size: TextSize::Xs,
            weight: Weight::Bold,
            color: rules.text_color,
        };

        // Measure first so a banner fill can go underneath
        let title_lines = text::wrap(title, self.chars_fitting(self.content_width, TextSize::Lg)).len();
        let mut height = title_lines * FontMetrics::for_size(TextSize::Lg, self.scale).line_height();
        if label.is_some() {
            height += self.px(4) + FontMetrics::for_size(TextSize::Xs, self.scale).line_height();
        }
        let pad = if rules.border_bottom.is_some() { self.px(8) } else { 0 };

        if let Some(fill) = rules.fill {
            self.fill_rect(0, top, self.width, height + pad, fill);
        }

        self.draw_paragraph(title, Align::Center, title_pen);
        if let Some(label) = label {
            self.y += self.px(4);
            self.draw_paragraph(label, Align::Center, label_pen);
        }
        self.y += pad;

        if let Some(border) = rules.border_bottom {
            let thickness = self.px(border.width as usize);
            self.fill_rect(self.left, self.y, self.content_width, thickness, border.color);
            self.y += thickness;
        }
        self.y += self.px(8);
    }

    fn render_text(&mut self, content: &str, style: &TextStyle) {
        self.y += self.px(2);
        if let Some(kind) = style.rule_above {
            self.y += self.px(10);
            self.rule(kind, palette::GRAY_300);
            self.y += self.px(8);
        }
        let color = match style.tone {
            Tone::Default => INK,
            Tone::Muted => palette::GRAY_600,
        };
        let pen = Pen {
            size: style.size,
            weight: style.weight,
            color,
        };
        self.draw_paragraph(content, style.align, pen);
        self.y += self.px(2);
    }

    /// Label on the left, value on the right; value drops a line when both don't fit.
    fn render_pair(&mut self, label: &str, value: &str, size: TextSize, weight: Weight) {
        let pen = Pen {
            size,
            weight,
            color: INK,
        };
        let label_width = self.text_width(label, size);
        let value_width = self.text_width(value, size);
        let gap = self.px(8);

        if label_width + gap + value_width <= self.content_width {
            let y = self.y;
            self.draw_line(label, self.left, y, pen);
            self.draw_line(value, self.left + self.content_width - value_width, y, pen);
            self.y += FontMetrics::for_size(size, self.scale).line_height();
        } else {
            self.draw_paragraph(label, Align::Left, pen);
            self.draw_paragraph(value, Align::Right, pen);
        }
    }

    /// Blit the QR image centered, scaled by the oversampling factor and
    /// never wider than the content box.
    fn render_qr(&mut self, image: &QrImage) {
        let size = image.size() as usize;
        let side = (size * self.scale).min(self.content_width);
        if side == 0 {
            return;
        }
        let start_x = self.left + (self.content_width - side) / 2;
        let top = self.y;
        self.ensure_height(top + side);

        for dy in 0..side {
            let qy = (dy * size / side) as u32;
            for dx in 0..side {
                let qx = (dx * size / side) as u32;
                let color = if image.is_dark(qx, qy) {
                    palette::BLACK
                } else {
                    palette::WHITE
                };
                self.set_pixel(start_x + dx, top + dy, color);
            }
        }
        self.y += side;
    }

    /// Crop to content, then paint border and rounded corners.
    fn finish(mut self, container: &ContainerRules) -> Result<RgbImage, CaptureError> {
        let height = (self.y + self.padding).max(self.min_height);
        self.ensure_height(height);
        self.buffer.truncate(height * self.width * 3);
        self.height = height;

        if let Some(border) = container.border {
            let bw = self.px(border.width as usize);
            let (w, h) = (self.width, self.height);
            self.fill_rect(0, 0, w, bw, border.color);
            self.fill_rect(0, h.saturating_sub(bw), w, bw, border.color);
            self.fill_rect(0, 0, bw, h, border.color);
            self.fill_rect(w.saturating_sub(bw), 0, bw, h, border.color);
        }
        if container.rounded {
            let radius = self.px(8);
            let border = container.border.map(|b| (b.width as usize * self.scale, b.color));
            self.round_corners(radius, border);
        }

        tracing::debug!(width = self.width, height = self.height, "captured raster");

        let (width, height) = (self.width as u32, self.height as u32);
        RgbImage::from_raw(width, height, self.buffer).ok_or(CaptureError::EmptyPage {
            width: width as usize,
            height: height as usize,
        })
    }

    /// Mask the four corners to the page background, following the border around the arc.
    fn round_corners(&mut self, radius: usize, border: Option<(usize, Color)>) {
        if radius == 0 || self.width < radius * 2 || self.height < radius * 2 {
            return;
        }
        let r = radius as f32;
        for dy in 0..radius {
            for dx in 0..radius {
                let (fx, fy) = (r - dx as f32 - 0.5, r - dy as f32 - 0.5);
                let dist = (fx * fx + fy * fy).sqrt();
                let color = if dist > r {
                    self.page_background
                } else if let Some((bw, color)) = border
                    && dist > r - bw as f32
                {
                    color
                } else {
                    continue;
                };
                let (right, bottom) = (self.width - 1 - dx, self.height - 1 - dy);
                self.set_pixel(dx, dy, color);
                self.set_pixel(right, dy, color);
                self.set_pixel(dx, bottom, color);
                self.set_pixel(right, bottom, color);
            }
        }
    }
}

/// Capture a document as an RGB raster.
pub fn capture(document: &Document, page: &PageConfig) -> Result<RgbImage, CaptureError> {
    Capturer::new(page, document.container.background)?.render(document)
}

/// Encode a raster as PNG bytes.
pub fn to_png(image: &RgbImage) -> Result<Vec<u8>, CaptureError> {
    use image::ImageEncoder;

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e: image::ImageError| CaptureError::ImageEncode(e.to_string()))?;

    Ok(png_bytes)
}

/// Capture a document straight to PNG bytes.
pub fn render_png(document: &Document, page: &PageConfig) -> Result<Vec<u8>, CaptureError> {
    to_png(&capture(document, page)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_receipt;
    use crate::ir::{Region, RegionKind};
    use crate::qr::{self, QrConfig};
    use crate::receipt::{ReceiptData, ReceiptOptions, ReceiptStyle, sample_receipt};
    use crate::style::{FALLBACK, resolve};
    use std::sync::Arc;

    fn empty_document() -> Document {
        Document {
            container: FALLBACK.container,
            regions: Vec::new(),
        }
    }

    #[test]
    fn test_empty_document_uses_min_height() {
        let image = capture(&empty_document(), &PageConfig::RECEIPT_80MM).unwrap();
        assert_eq!(image.width(), 604);
        assert_eq!(image.height(), 400);
        // white container on a white page
        assert_eq!(image.get_pixel(300, 200).0, [255, 255, 255]);
    }

    #[test]
    fn test_scale_changes_width() {
        let page = PageConfig::RECEIPT_80MM.with_scale(1);
        let image = capture(&empty_document(), &page).unwrap();
        assert_eq!((image.width(), image.height()), (302, 200));
    }

    #[test]
    fn test_zero_content_width_fails() {
        let page = PageConfig {
            content_width_px: 0,
            ..PageConfig::RECEIPT_80MM
        };
        assert!(matches!(
            capture(&empty_document(), &page),
            Err(CaptureError::EmptyPage { .. })
        ));
    }

    #[test]
    fn test_sample_receipt_grows_and_has_ink() {
        let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
        let image = capture(&document, &PageConfig::RECEIPT_80MM).unwrap();
        assert!(image.height() > 400);
        assert!(image.pixels().any(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_container_tint_and_border() {
        let document = Document {
            container: resolve(ReceiptStyle::Pharmacy, true).container,
            regions: vec![Region::new(RegionKind::Totals)],
        };
        let image = capture(&document, &PageConfig::RECEIPT_80MM).unwrap();
        // 2px blue border at 2x
        assert_eq!(image.get_pixel(0, 100).0, palette::BLUE_500.rgb());
        assert_eq!(image.get_pixel(3, 100).0, palette::BLUE_500.rgb());
        assert_eq!(image.get_pixel(300, 100).0, palette::BLUE_50.rgb());
    }

    #[test]
    fn test_rounded_corners_show_page() {
        let document = Document {
            container: resolve(ReceiptStyle::Modern, true).container,
            regions: Vec::new(),
        };
        let page = PageConfig {
            background: palette::GRAY_900,
            ..PageConfig::RECEIPT_80MM
        };
        let image = capture(&document, &page).unwrap();
        assert_eq!(image.get_pixel(0, 0).0, palette::GRAY_900.rgb());
        assert_ne!(image.get_pixel(300, 200).0, palette::GRAY_900.rgb());
    }

    #[test]
    fn test_qr_image_adds_height() {
        let data = ReceiptData {
            store_name: "Shop".into(),
            ..Default::default()
        };
        let image = Arc::new(qr::encode(&data, true, &QrConfig::DEFAULT).unwrap().unwrap());
        let with = render_receipt(&data, &ReceiptOptions::default(), Some(image));
        let without = render_receipt(&data, &ReceiptOptions::default(), None);
        let page = PageConfig::RECEIPT_80MM;
        let with_height = capture(&with, &page).unwrap().height();
        let without_height = capture(&without, &page).unwrap().height();
        assert_eq!(with_height, without_height + 160);
    }

    #[test]
    fn test_dense_qr_stays_inside_content_box() {
        let data = sample_receipt();
        let config = QrConfig {
            payload: qr::PayloadKind::Full,
            ..QrConfig::DEFAULT
        };
        let image = Arc::new(qr::encode(&data, true, &config).unwrap().unwrap());
        assert!(image.size() > config.size_px);

        let document = Document {
            container: FALLBACK.container,
            regions: vec![Region {
                kind: RegionKind::Qr,
                ops: vec![Op::QrCode { image: Some(image) }],
            }],
        };
        let page = PageConfig::RECEIPT_80MM;
        let raster = capture(&document, &page).unwrap();

        let left = page.padding_px * page.scale;
        let right = left + page.content_width_px * page.scale;
        let dark: Vec<u32> = raster
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == [0, 0, 0])
            .map(|(x, _, _)| x)
            .collect();
        assert!(!dark.is_empty());
        assert!(dark.iter().all(|x| (left..right).contains(x)));
    }

    #[test]
    fn test_oversized_qr_image_is_scaled_down() {
        let config = QrConfig {
            max_px: 400,
            ..QrConfig::DEFAULT
        };
        let image = Arc::new(qr::rasterize(&"x".repeat(600), &config).unwrap());
        assert!(image.size() * 2 > 540);

        let document = Document {
            container: FALLBACK.container,
            regions: vec![Region {
                kind: RegionKind::Qr,
                ops: vec![Op::QrCode { image: Some(image) }],
            }],
        };
        let raster = capture(&document, &PageConfig::RECEIPT_80MM).unwrap();
        // padding + 12px gap + 540px symbol + padding, at 2x
        assert_eq!(raster.height(), 32 + 24 + 540 + 32);
        for x in [0, 31, 572, 603] {
            assert_ne!(raster.get_pixel(x, 200).0, [0, 0, 0]);
        }
    }

    #[test]
    fn test_png_signature() {
        let png = render_png(&empty_document(), &PageConfig::RECEIPT_80MM).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
