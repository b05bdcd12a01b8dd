//! Print document: the receipt markup wrapped for a print dialog or spooler.

use super::receipt_stem;
use crate::ir::{Document, escape_html};

/// Title of the print document.
pub const PRINT_TITLE: &str = "Print Receipt";

/// Page rules applied only when printing.
const PRINT_CSS: &str = "@media print {\n  \
    body { margin: 0; padding: 0; }\n  \
    .receipt-container { width: 80mm; max-width: 80mm; margin: 0; }\n\
}\n\
@page { margin: 0; }";

/// A standalone HTML document ready to hand to a print surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintDocument {
    /// Job name, `receipt-<transactionId>`
    pub job: String,
    pub title: String,
    /// Receipt markup, copied from the rendered document.
    pub markup: String,
}

impl PrintDocument {
    pub fn new(document: &Document, transaction_id: &str) -> Self {
        Self {
            job: receipt_stem(transaction_id),
            title: PRINT_TITLE.to_string(),
            markup: document.to_markup(),
        }
    }

    /// Full HTML text.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_html(&self.title),
            PRINT_CSS,
            self.markup
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_receipt;
    use crate::receipt::{ReceiptOptions, sample_receipt};

    #[test]
    fn test_print_document_wraps_markup() {
        let document = render_receipt(&sample_receipt(), &ReceiptOptions::default(), None);
        let print = PrintDocument::new(&document, "TXN/7");
        assert_eq!(print.job, "receipt-TXN_7");
        let html = print.to_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Print Receipt</title>"));
        assert!(html.contains("@media print"));
        assert!(html.contains("width: 80mm; max-width: 80mm; margin: 0;"));
        assert!(html.contains("body { margin: 0; padding: 0; }"));
        assert!(html.contains(&document.to_markup()));
    }
}
