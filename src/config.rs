//! # Page Configuration
//!
//! Physical and raster dimensions of the receipt page.
//!
//! ## Usage
//!
//! ```
//! use boleta::config::PageConfig;
//!
//! let config = PageConfig::RECEIPT_80MM;
//! println!("Capture width: {} px ({} mm)",
//!          config.capture_width_px(),
//!          config.width_mm);
//! ```

use crate::style::{Color, palette};

/// # Page Configuration
///
/// Describes the receipt page for both the on-screen layout (CSS pixels) and
/// the exported raster/PDF (millimeters).
///
/// ## Calculations
///
/// ```text
/// capture_width  = (content_width + 2 * padding) * scale
/// page_height_mm = raster_height * width_mm / raster_width
///
/// For RECEIPT_80MM:
///   capture_width = (270 + 2 * 16) * 2 = 604 px
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    /// Preset name
    pub name: &'static str,

    /// Page width of the exported PDF in millimeters
    pub width_mm: f32,

    /// Width of the receipt content box in CSS pixels
    pub content_width_px: u32,

    /// Inner padding of the receipt container in CSS pixels
    pub padding_px: u32,

    /// Minimum container height in CSS pixels
    pub min_height_px: u32,

    /// Oversampling factor applied when capturing the raster
    pub scale: u32,

    /// Fill behind anything the container does not paint
    pub background: Color,
}

impl PageConfig {
    /// # 80mm Receipt
    ///
    /// 80mm is ~302 CSS pixels at 96 DPI. With 16px padding on each side the
    /// content box is 270px wide.
    ///
    /// ```text
    /// ├─ 16px ─┼──── 270px content ────┼─ 16px ─┤
    /// └────────┴───────────────────────┴────────┘
    ///                302px total
    /// ```
    pub const RECEIPT_80MM: Self = Self {
        name: "80mm receipt",
        width_mm: 80.0,
        content_width_px: 270,
        padding_px: 16,
        min_height_px: 200,
        scale: 2,
        background: palette::WHITE,
    };

    /// Same page with a different oversampling factor (clamped to 1..=8).
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Full container width in CSS pixels.
    #[inline]
    pub fn width_px(&self) -> u32 {
        self.content_width_px + self.padding_px * 2
    }

    /// Width of the captured raster in pixels.
    #[inline]
    pub fn capture_width_px(&self) -> u32 {
        self.width_px() * self.scale
    }

    /// PDF page size `[width, height]` in millimeters for a raster of the given size.
    ///
    /// ```
    /// use boleta::config::PageConfig;
    ///
    /// let (w, h) = PageConfig::RECEIPT_80MM.page_size_mm(604, 1208);
    /// assert_eq!((w, h), (80.0, 160.0));
    /// ```
    pub fn page_size_mm(&self, raster_width: u32, raster_height: u32) -> (f32, f32) {
        let height = raster_height as f32 * self.width_mm / raster_width.max(1) as f32;
        (self.width_mm, height)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::RECEIPT_80MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_80mm() {
        let config = PageConfig::RECEIPT_80MM;
        assert_eq!(config.width_px(), 302);
        assert_eq!(config.capture_width_px(), 604);
    }

    #[test]
    fn test_page_size_follows_aspect_ratio() {
        let config = PageConfig::RECEIPT_80MM;
        let (w, h) = config.page_size_mm(600, 900);
        assert_eq!(w, 80.0);
        assert!((h - 120.0).abs() < 1e-4);

        let (_, h) = config.page_size_mm(604, 1510);
        assert!((h - 1510.0 * 80.0 / 604.0).abs() < 1e-4);
    }

    #[test]
    fn test_with_scale_clamps() {
        assert_eq!(PageConfig::RECEIPT_80MM.with_scale(0).scale, 1);
        assert_eq!(PageConfig::RECEIPT_80MM.with_scale(3).capture_width_px(), 906);
        assert_eq!(PageConfig::RECEIPT_80MM.with_scale(99).scale, 8);
    }
}
