//! Text drawing for raster capture.
//!
//! Word-wrapping, alignment within the content box, and faux bold.

use super::Capturer;
use super::font::FontMetrics;
use crate::ir::{Align, Weight};
use crate::style::{Color, TextSize};

/// Style of one drawn line.
#[derive(Debug, Clone, Copy)]
pub(super) struct Pen {
    pub size: TextSize,
    pub weight: Weight,
    pub color: Color,
}

/// Greedy word wrap to at most `max_chars` per line.
///
/// Explicit newlines are kept; words longer than a line are broken hard.
pub(super) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            // Break words that cannot fit on any line
            while chars.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = chars.split_off(max_chars);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            let needed = if line_len == 0 { chars.len() } else { line_len + 1 + chars.len() };
            if needed > max_chars && line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(chars.iter());
            line_len += chars.len();
        }

        lines.push(line);
    }

    lines
}

impl Capturer {
    /// Width in device pixels of `text` set at `size`.
    pub(super) fn text_width(&self, text: &str, size: TextSize) -> usize {
        text.chars().count() * FontMetrics::for_size(size, self.scale).char_width
    }

    /// How many characters of `size` fit in `width` device pixels.
    pub(super) fn chars_fitting(&self, width: usize, size: TextSize) -> usize {
        width / FontMetrics::for_size(size, self.scale).char_width.max(1)
    }

    /// Draw wrapped, aligned text at the cursor and advance it.
    pub(super) fn draw_paragraph(&mut self, text: &str, align: Align, pen: Pen) {
        let max_chars = self.chars_fitting(self.content_width, pen.size);
        let line_height = FontMetrics::for_size(pen.size, self.scale).line_height();

        for line in wrap(text, max_chars) {
            let width = self.text_width(&line, pen.size);
            let slack = self.content_width.saturating_sub(width);
            let x = self.left
                + match align {
                    Align::Left => 0,
                    Align::Center => slack / 2,
                    Align::Right => slack,
                };
            let y = self.y;
            self.draw_line(&line, x, y, pen);
            self.y += line_height;
        }
    }

    /// Draw a single line with its line box starting at `y`. Does not move the cursor.
    pub(super) fn draw_line(&mut self, text: &str, x: usize, y: usize, pen: Pen) {
        let metrics = FontMetrics::for_size(pen.size, self.scale);
        let top = y + (metrics.line_height() - metrics.char_height) / 2;
        self.ensure_height(y + metrics.line_height());

        // Faux bold: draw again shifted right
        let bold_offset = if pen.weight.is_heavy() {
            (metrics.char_width / 8).max(1)
        } else {
            0
        };

        for (i, ch) in text.chars().enumerate() {
            let glyph = self.glyph(pen.size, ch);
            let base_x = x + i * metrics.char_width;
            for gy in 0..metrics.char_height {
                for gx in 0..metrics.char_width {
                    if glyph.get(gy * metrics.char_width + gx).copied().unwrap_or(0) == 0 {
                        continue;
                    }
                    self.set_pixel(base_x + gx, top + gy, pen.color);
                    if bold_offset > 0 {
                        self.set_pixel(base_x + gx + bold_offset, top + gy, pen.color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
    }

    #[test]
    fn test_wrap_keeps_newlines() {
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap("abcdefgh xy", 3), vec!["abc", "def", "gh", "xy"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("", 10).is_empty());
    }
}
