//! # Pipeline Tests
//!
//! End-to-end checks through the public API: record → layout → markup,
//! raster, PDF and print document.

use boleta::capture;
use boleta::components::{QR_CAPTION, render_receipt};
use boleta::config::PageConfig;
use boleta::export::{self, PrintDocument};
use boleta::ir::{Op, RegionKind};
use boleta::receipt::{ReceiptData, ReceiptOptions, ReceiptStyle, parse_items, sample_receipt};
use boleta::session::{Notification, QrSlot};
use boleta::style::{self, FALLBACK, STYLE_TABLE};
use boleta::transport::SpoolDirectory;
use boleta::{BoletaError, ReceiptSession};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

// ============================================================================
// Styles
// ============================================================================

#[test]
fn test_every_style_resolves_distinctly() {
    let resolved: HashSet<_> = ReceiptStyle::ALL
        .iter()
        .map(|s| style::resolve(*s, true))
        .collect();
    assert_eq!(resolved.len(), 10);
    assert_eq!(STYLE_TABLE.len(), 10);

    // stable across calls
    for s in ReceiptStyle::ALL {
        assert_eq!(style::resolve(s, true), style::resolve(s, true));
    }
}

#[test]
fn test_unknown_style_name_is_fallback() {
    let fallback = style::resolve_name("neon", true);
    assert_eq!(fallback, FALLBACK.resolved(true));
    for s in ReceiptStyle::ALL {
        assert_ne!(fallback, style::resolve(s, true));
    }
}

#[test]
fn test_unknown_style_in_json_renders_as_modern() {
    let data: ReceiptData = serde_json::from_str(r#"{"storeName":"Shop","style":"neon"}"#).unwrap();
    assert_eq!(data.style, ReceiptStyle::Modern);
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_sample_markup_contains_every_section() {
    let mut data = sample_receipt();
    data.style = ReceiptStyle::Corporate;
    let options = ReceiptOptions {
        include_terms: true,
        ..Default::default()
    };
    let html = render_receipt(&data, &options, None).to_markup();

    for region in [
        "brand",
        "store-info",
        "transaction",
        "items",
        "totals",
        "footer-message",
        "terms",
        "qr",
        "style-footer",
    ] {
        assert!(html.contains(&format!("data-region=\"{}\"", region)), "{}", region);
    }
    assert!(html.contains("CORPORATE RECEIPT"));
    assert!(html.contains("Terms &amp; Conditions:"));
    assert!(html.contains(QR_CAPTION));
}

#[test]
fn test_item_lines_parse_to_rows() {
    let data = ReceiptData {
        items: parse_items("Coffee - 4.50\nBagel - 3.25"),
        ..Default::default()
    };
    let document = render_receipt(&data, &ReceiptOptions::default(), None);
    let items = document.region(RegionKind::Items).unwrap();
    let lines: Vec<String> = items.ops.iter().flat_map(Op::text_lines).collect();
    assert_eq!(lines, vec!["Coffee $4.50", "Bagel $3.25"]);
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_page_height_follows_raster() {
    let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
    let page = PageConfig::RECEIPT_80MM;
    let image = capture::capture(&document, &page).unwrap();

    let (w, h) = page.page_size_mm(image.width(), image.height());
    assert_eq!(w, 80.0);
    let expected = image.height() as f32 * 80.0 / image.width() as f32;
    assert!((h - expected).abs() < 1e-3);
}

#[test]
fn test_pdf_export_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = sample_receipt();
    data.transaction_id = "TXN/2026/7".into();
    let document = render_receipt(&data, &ReceiptOptions::default(), None);

    let path =
        export::export_pdf_blocking(&document, &data.transaction_id, &PageConfig::RECEIPT_80MM, dir.path())
            .unwrap();
    assert_eq!(path.file_name().unwrap(), "receipt-TXN_2026_7.pdf");
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_print_document_skips_raster() {
    let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
    let print = PrintDocument::new(&document, "TXN1");
    let html = print.to_html();
    assert!(html.contains("@media print"));
    assert!(!html.contains("data:image/png"));
}

// ============================================================================
// Session
// ============================================================================

#[tokio::test]
async fn test_session_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = ReceiptSession::new();
    session.set_field_by_name("storeName", "Night Market").unwrap();
    session.set_field_by_name("total", "12.34").unwrap();
    session.add_items("Dumplings - 8.00\nTea");
    session.set_option_by_name("includeTerms", true).unwrap();
    session.refresh_qr().await;

    assert!(matches!(session.qr_slot(), QrSlot::Ready(_)));
    let lines = session.render().text_lines();
    assert!(lines.contains(&"TOTAL: $12.34".to_string()));
    assert!(lines.contains(&"Tea $0.00".to_string()));

    let result = session.export_pdf(dir.path()).await;
    assert_eq!(Notification::for_export(&result), Notification::PDF_SAVED);

    let mut spool = SpoolDirectory::new(dir.path());
    let printed = session.print(&mut spool);
    assert_eq!(Notification::for_print(&printed), Notification::PRINTED);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_unknown_names_are_errors() {
    let mut session = ReceiptSession::new();
    assert!(matches!(
        session.set_field_by_name("storeColour", "red"),
        Err(BoletaError::UnknownField(_))
    ));
    assert!(matches!(
        "neon".parse::<ReceiptStyle>(),
        Err(BoletaError::UnknownStyle(_))
    ));
}
