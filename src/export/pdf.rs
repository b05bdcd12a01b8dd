//! PDF export.
//!
//! ```text
//! Document ──capture──► RgbImage (W×H px)
//!                          │
//!                          ▼
//!              page [80mm, H*80/W mm], image at full bounds
//!                          │
//!                          ▼
//!              receipt-<transactionId>.pdf
//! ```

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};
use tempfile::NamedTempFile;

use super::ExportError;
use crate::capture;
use crate::config::PageConfig;
use crate::ir::Document;

const MM_PER_INCH: f32 = 25.4;

/// `receipt-<id>`, with path separators in the id replaced by `_`.
pub fn receipt_stem(transaction_id: &str) -> String {
    let safe: String = transaction_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("receipt-{}", safe)
}

/// File name for a receipt's PDF.
pub fn pdf_filename(transaction_id: &str) -> String {
    format!("{}.pdf", receipt_stem(transaction_id))
}

/// Build a single-page PDF holding `image` at full page bounds.
pub fn build_pdf(image: &RgbImage, page: &PageConfig, title: &str) -> Result<Vec<u8>, ExportError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::Pdf(format!("empty raster ({}x{})", width, height)));
    }

    let (page_w, page_h) = page.page_size_mm(width, height);
    let (doc, page_index, layer_index) = PdfDocument::new(title, Mm(page_w), Mm(page_h), "Layer 1");
    let layer = doc.get_page(page_index).get_layer(layer_index);

    let image = Image::from(ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: image.as_raw().clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI that stretches the raster width over the page width
    let dpi = width as f32 / (page_w / MM_PER_INCH);

    image.add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        writer.flush()?;
    }
    Ok(bytes)
}

/// Capture and build in one step.
pub fn render_pdf(document: &Document, page: &PageConfig, title: &str) -> Result<Vec<u8>, ExportError> {
    let image = capture::capture(document, page)?;
    build_pdf(&image, page, title)
}

/// Render and write `receipt-<id>.pdf` into `dir`.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// failure at any step leaves nothing behind.
pub fn export_pdf_blocking(
    document: &Document,
    transaction_id: &str,
    page: &PageConfig,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let filename = pdf_filename(transaction_id);
    let bytes = render_pdf(document, page, &filename)?;

    let path = dir.join(&filename);
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.flush()?;
    file.persist(&path).map_err(|e| ExportError::Io(e.error))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "exported PDF");
    Ok(path)
}

/// [`export_pdf_blocking`] on the runtime's blocking pool.
pub async fn export_pdf(
    document: Document,
    transaction_id: String,
    page: PageConfig,
    dir: PathBuf,
) -> Result<PathBuf, ExportError> {
    tokio::task::spawn_blocking(move || export_pdf_blocking(&document, &transaction_id, &page, &dir))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_receipt;
    use crate::receipt::{ReceiptOptions, sample_receipt};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pdf_filename() {
        assert_eq!(pdf_filename("TXN123"), "receipt-TXN123.pdf");
        assert_eq!(pdf_filename("a/b\\c"), "receipt-a_b_c.pdf");
        assert_eq!(pdf_filename(""), "receipt-.pdf");
    }

    #[test]
    fn test_build_pdf_header() {
        let image = RgbImage::from_pixel(604, 1208, image::Rgb([255, 255, 255]));
        let bytes = build_pdf(&image, &PageConfig::RECEIPT_80MM, "test").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    const PT_PER_MM: f32 = 72.0 / 25.4;

    /// `cm` operand `m` concatenated onto `ctm`.
    fn concat(m: &[f32], ctm: [f32; 6]) -> [f32; 6] {
        [
            m[0] * ctm[0] + m[1] * ctm[2],
            m[0] * ctm[1] + m[1] * ctm[3],
            m[2] * ctm[0] + m[3] * ctm[2],
            m[2] * ctm[1] + m[3] * ctm[3],
            m[4] * ctm[0] + m[5] * ctm[2] + ctm[4],
            m[4] * ctm[1] + m[5] * ctm[3] + ctm[5],
        ]
    }

    /// MediaBox of the only page and the transform in effect when the image is drawn.
    fn page_and_image_transform(bytes: &[u8]) -> (Vec<f32>, [f32; 6]) {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().unwrap();

        let media_box: Vec<f32> = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();

        let content = lopdf::content::Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let mut ctm = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        let mut drawn = None;
        for op in &content.operations {
            match op.operator.as_str() {
                "cm" => {
                    let m: Vec<f32> = op.operands.iter().map(|o| o.as_float().unwrap()).collect();
                    ctm = concat(&m, ctm);
                }
                "Do" => {
                    assert!(drawn.is_none(), "more than one image drawn");
                    drawn = Some(ctm);
                }
                _ => {}
            }
        }
        (media_box, drawn.expect("no image drawn"))
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 0.05, "{} != {}", actual, expected);
    }

    #[test]
    fn test_page_is_80mm_and_image_fills_it() {
        for (w, h) in [(604, 1208), (604, 917), (302, 200)] {
            let image = RgbImage::from_pixel(w, h, image::Rgb([255, 255, 255]));
            let bytes = build_pdf(&image, &PageConfig::RECEIPT_80MM, "test").unwrap();
            let (media_box, ctm) = page_and_image_transform(&bytes);

            let page_w = 80.0 * PT_PER_MM;
            let page_h = h as f32 * 80.0 / w as f32 * PT_PER_MM;
            assert_eq!(media_box.len(), 4);
            assert_close(media_box[0], 0.0);
            assert_close(media_box[1], 0.0);
            assert_close(media_box[2], page_w);
            assert_close(media_box[3], page_h);

            // unit image square mapped onto the full page
            assert_close(ctm[0], page_w);
            assert_close(ctm[3], page_h);
            assert_close(ctm[1], 0.0);
            assert_close(ctm[2], 0.0);
            assert_close(ctm[4], 0.0);
            assert_close(ctm[5], 0.0);
        }
    }

    #[test]
    fn test_rendered_receipt_page_follows_capture() {
        let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
        let page = PageConfig::RECEIPT_80MM;
        let raster = capture::capture(&document, &page).unwrap();
        let bytes = render_pdf(&document, &page, "receipt").unwrap();

        let (media_box, ctm) = page_and_image_transform(&bytes);
        let page_h = raster.height() as f32 * 80.0 / raster.width() as f32 * PT_PER_MM;
        assert_close(media_box[3], page_h);
        assert_close(ctm[3], page_h);
    }

    #[test]
    fn test_build_pdf_rejects_empty_raster() {
        let image = RgbImage::new(0, 0);
        assert!(matches!(
            build_pdf(&image, &PageConfig::RECEIPT_80MM, "test"),
            Err(ExportError::Pdf(_))
        ));
    }

    #[test]
    fn test_export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_receipt();
        let document = render_receipt(&data, &ReceiptOptions::default(), None);
        let path = export_pdf_blocking(&document, &data.transaction_id, &PageConfig::RECEIPT_80MM, dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("receipt-TXNDEMO00042.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // only the final file remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
        let page = PageConfig {
            content_width_px: 0,
            ..PageConfig::RECEIPT_80MM
        };
        let result = export_pdf_blocking(&document, "TXN1", &page, dir.path());
        assert!(matches!(result, Err(ExportError::Capture(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_export_async() {
        let dir = tempfile::tempdir().unwrap();
        let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
        let path = export_pdf(
            document,
            "TXN9".to_string(),
            PageConfig::RECEIPT_80MM,
            dir.path().to_path_buf(),
        )
        .await
        .unwrap();
        assert!(path.exists());
    }
}
