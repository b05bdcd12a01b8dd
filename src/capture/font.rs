//! Glyph generation for raster capture.
//!
//! Uses the Spleen bitmap font family, picking the source size closest to the
//! requested text size and scaling it to the cell with nearest neighbor.

use crate::style::TextSize;
use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

/// Cell dimensions of a glyph in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub char_width: usize,
    pub char_height: usize,
}

impl FontMetrics {
    /// Cells are half as wide as they are tall.
    pub fn for_size(size: TextSize, scale: usize) -> Self {
        let char_height = size.px() as usize * scale;
        Self {
            char_width: char_height / 2,
            char_height,
        }
    }

    /// Line box height: 1.25 × the font size.
    pub fn line_height(&self) -> usize {
        self.char_height * 5 / 4
    }
}

/// Generate a glyph bitmap sized for `size` at `scale`.
/// Returns a Vec<u8> where each byte is 0 (background) or 1 (ink).
pub fn generate_glyph(size: TextSize, scale: usize, ch: char) -> Vec<u8> {
    let metrics = FontMetrics::for_size(size, scale);
    let mut glyph = vec![0u8; metrics.char_width * metrics.char_height];

    let source = match size {
        TextSize::Xs => read_glyph(FONT_6X12, 6, 12, ch),
        TextSize::Sm | TextSize::Base => read_glyph(FONT_8X16, 8, 16, ch),
        TextSize::Lg => read_glyph(FONT_12X24, 12, 24, ch),
    };

    match source {
        Some((bitmap, src_w, src_h)) => scale_bitmap(
            &bitmap,
            src_w,
            src_h,
            &mut glyph,
            metrics.char_width,
            metrics.char_height,
        ),
        None if ch.is_whitespace() => {}
        // Unknown chars render as a box
        None => draw_box(&mut glyph, metrics.char_width, metrics.char_height),
    }

    glyph
}

fn read_glyph(
    data: &'static [u8],
    width: usize,
    height: usize,
    ch: char,
) -> Option<(Vec<u8>, usize, usize)> {
    let mut font = PSF2Font::new(data).ok()?;
    let utf8_bytes = ch.to_string();
    let rows = font.glyph_for_utf8(utf8_bytes.as_bytes())?;

    let mut bitmap = vec![0u8; width * height];
    for (row_y, row) in rows.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < height && col_x < width {
                bitmap[row_y * width + col_x] = if on { 1 } else { 0 };
            }
        }
    }
    Some((bitmap, width, height))
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest neighbor.
fn scale_bitmap(src: &[u8], src_w: usize, src_h: usize, dst: &mut [u8], dst_w: usize, dst_h: usize) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            let src_idx = sy * src_w + sx;
            let dst_idx = dy * dst_w + dx;
            if src_idx < src.len() && dst_idx < dst.len() {
                dst[dst_idx] = src[src_idx];
            }
        }
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    if width < 2 || height < 2 {
        return;
    }
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}
