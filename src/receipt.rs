//! # Receipt Record
//!
//! The plain data the rendering pipeline consumes: the receipt itself, its
//! line items, the four presentation toggles and the ten style variants.
//!
//! Field names serialize in camelCase so a receipt saved by a web form can be
//! fed straight back in:
//!
//! ```
//! use boleta::receipt::{ReceiptData, ReceiptStyle};
//!
//! let data: ReceiptData = serde_json::from_str(
//!     r#"{"storeName": "Corner Bakery", "total": "7.75", "style": "coffee"}"#,
//! ).unwrap();
//! assert_eq!(data.store_name, "Corner Bakery");
//! assert_eq!(data.style, ReceiptStyle::Coffee);
//! ```

use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoletaError;

/// Preset payment methods offered by the form. The field itself is free text.
pub const PAYMENT_METHODS: &[&str] = &["Cash", "Credit Card", "Debit Card", "Mobile Payment"];

/// Footer message of a fresh receipt.
pub const DEFAULT_FOOTER_MESSAGE: &str = "Thank you for your business!";

/// Price used when an item line has no price after the delimiter.
pub const DEFAULT_PRICE: &str = "0.00";

// ============================================================================
// STYLE
// ============================================================================

/// The ten presentation variants.
///
/// Deserializing an unknown name falls back to [`ReceiptStyle::Modern`], so a
/// record always holds one of the ten variants. Use [`str::parse`] when an
/// unknown name should be an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStyle {
    #[default]
    Modern,
    Thermal,
    Corporate,
    Retail,
    Restaurant,
    Pharmacy,
    Grocery,
    Gas,
    Coffee,
    Tech,
}

impl ReceiptStyle {
    /// All variants, in form order.
    pub const ALL: [ReceiptStyle; 10] = [
        ReceiptStyle::Modern,
        ReceiptStyle::Thermal,
        ReceiptStyle::Corporate,
        ReceiptStyle::Retail,
        ReceiptStyle::Restaurant,
        ReceiptStyle::Pharmacy,
        ReceiptStyle::Grocery,
        ReceiptStyle::Gas,
        ReceiptStyle::Coffee,
        ReceiptStyle::Tech,
    ];

    /// Wire name (`"modern"`, `"thermal"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiptStyle::Modern => "modern",
            ReceiptStyle::Thermal => "thermal",
            ReceiptStyle::Corporate => "corporate",
            ReceiptStyle::Retail => "retail",
            ReceiptStyle::Restaurant => "restaurant",
            ReceiptStyle::Pharmacy => "pharmacy",
            ReceiptStyle::Grocery => "grocery",
            ReceiptStyle::Gas => "gas",
            ReceiptStyle::Coffee => "coffee",
            ReceiptStyle::Tech => "tech",
        }
    }

    /// Human-readable label shown in style pickers.
    pub fn label(self) -> &'static str {
        match self {
            ReceiptStyle::Modern => "Modern Clean",
            ReceiptStyle::Thermal => "Thermal Printer",
            ReceiptStyle::Corporate => "Corporate Business",
            ReceiptStyle::Retail => "Retail Store",
            ReceiptStyle::Restaurant => "Restaurant",
            ReceiptStyle::Pharmacy => "Pharmacy",
            ReceiptStyle::Grocery => "Grocery Store",
            ReceiptStyle::Gas => "Gas Station",
            ReceiptStyle::Coffee => "Coffee Shop",
            ReceiptStyle::Tech => "Electronics Store",
        }
    }

    /// Parse a style name, falling back to `Modern` for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(style = name, "unknown receipt style, using modern");
            ReceiptStyle::Modern
        })
    }
}

impl FromStr for ReceiptStyle {
    type Err = BoletaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ReceiptStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == name)
            .ok_or_else(|| BoletaError::UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for ReceiptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReceiptStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(ReceiptStyle::parse_or_default(&name))
    }
}

// ============================================================================
// ITEMS
// ============================================================================

fn default_quantity() -> u32 {
    1
}

/// A single purchased line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    /// Price exactly as the user typed it.
    pub price: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl ReceiptItem {
    /// Create an item with quantity 1.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: 1,
        }
    }

    /// Set the quantity.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Parse raw item input, one `name - price` pair per line.
///
/// Blank lines are skipped. Each line is split on `-`: the first piece is the
/// name, the second the price, both trimmed. A missing or blank price becomes
/// `"0.00"`. Input is never rejected.
///
/// ```
/// use boleta::receipt::parse_items;
///
/// let items = parse_items("Coffee - 4.50\nMuffin");
/// assert_eq!(items[0].price, "4.50");
/// assert_eq!(items[1].price, "0.00");
/// ```
pub fn parse_items(raw: &str) -> Vec<ReceiptItem> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = line.split('-');
            let name = parts.next().map(str::trim).unwrap_or_default();
            let price = parts
                .next()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PRICE);
            ReceiptItem::new(name, price)
        })
        .collect()
}

// ============================================================================
// RECEIPT DATA
// ============================================================================

/// Everything needed to render one receipt.
///
/// `Default` is the blank record. [`ReceiptData::new`] is the state of a
/// freshly opened form (current date, random transaction id, cash payment).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptData {
    pub store_name: String,
    pub store_address: String,
    pub store_phone: String,
    pub store_email: String,
    pub date: String,
    pub transaction_id: String,
    pub items: Vec<ReceiptItem>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub payment_method: String,
    pub cashier: String,
    pub footer_message: String,
    pub terms: String,
    pub style: ReceiptStyle,
}

impl ReceiptData {
    /// A fresh record as the form presents it on open.
    pub fn new() -> Self {
        Self {
            date: current_datetime(),
            transaction_id: generate_transaction_id(),
            payment_method: PAYMENT_METHODS[0].to_string(),
            footer_message: DEFAULT_FOOTER_MESSAGE.to_string(),
            ..Default::default()
        }
    }

    /// Total as displayed: the user's string, or `"0.00"` when blank.
    pub fn display_total(&self) -> &str {
        present(&self.total).unwrap_or(DEFAULT_PRICE)
    }

    /// Read a field by its notifier key.
    pub fn field(&self, field: ReceiptField) -> &str {
        match field {
            ReceiptField::StoreName => &self.store_name,
            ReceiptField::StoreAddress => &self.store_address,
            ReceiptField::StorePhone => &self.store_phone,
            ReceiptField::StoreEmail => &self.store_email,
            ReceiptField::Date => &self.date,
            ReceiptField::TransactionId => &self.transaction_id,
            ReceiptField::Subtotal => &self.subtotal,
            ReceiptField::Tax => &self.tax,
            ReceiptField::Total => &self.total,
            ReceiptField::PaymentMethod => &self.payment_method,
            ReceiptField::Cashier => &self.cashier,
            ReceiptField::FooterMessage => &self.footer_message,
            ReceiptField::Terms => &self.terms,
            ReceiptField::Style => self.style.as_str(),
        }
    }

    /// Overwrite a field with a new string value.
    ///
    /// Setting `Style` to an unknown name keeps the record valid by falling
    /// back to `modern`.
    pub fn set_field(&mut self, field: ReceiptField, value: &str) {
        let slot = match field {
            ReceiptField::Style => {
                self.style = ReceiptStyle::parse_or_default(value);
                return;
            }
            ReceiptField::StoreName => &mut self.store_name,
            ReceiptField::StoreAddress => &mut self.store_address,
            ReceiptField::StorePhone => &mut self.store_phone,
            ReceiptField::StoreEmail => &mut self.store_email,
            ReceiptField::Date => &mut self.date,
            ReceiptField::TransactionId => &mut self.transaction_id,
            ReceiptField::Subtotal => &mut self.subtotal,
            ReceiptField::Tax => &mut self.tax,
            ReceiptField::Total => &mut self.total,
            ReceiptField::PaymentMethod => &mut self.payment_method,
            ReceiptField::Cashier => &mut self.cashier,
            ReceiptField::FooterMessage => &mut self.footer_message,
            ReceiptField::Terms => &mut self.terms,
        };
        *slot = value.to_string();
    }
}

/// `Some(value)` if the string has visible content. Whitespace-only input is
/// blank, for optional regions and amounts alike.
pub(crate) fn present(value: &str) -> Option<&str> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Keys accepted by the field-change notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptField {
    StoreName,
    StoreAddress,
    StorePhone,
    StoreEmail,
    Date,
    TransactionId,
    Subtotal,
    Tax,
    Total,
    PaymentMethod,
    Cashier,
    FooterMessage,
    Terms,
    Style,
}

impl ReceiptField {
    pub const ALL: [ReceiptField; 14] = [
        ReceiptField::StoreName,
        ReceiptField::StoreAddress,
        ReceiptField::StorePhone,
        ReceiptField::StoreEmail,
        ReceiptField::Date,
        ReceiptField::TransactionId,
        ReceiptField::Subtotal,
        ReceiptField::Tax,
        ReceiptField::Total,
        ReceiptField::PaymentMethod,
        ReceiptField::Cashier,
        ReceiptField::FooterMessage,
        ReceiptField::Terms,
        ReceiptField::Style,
    ];

    /// Key as used by the form (`storeName`, `transactionId`, ...).
    pub fn key(self) -> &'static str {
        match self {
            ReceiptField::StoreName => "storeName",
            ReceiptField::StoreAddress => "storeAddress",
            ReceiptField::StorePhone => "storePhone",
            ReceiptField::StoreEmail => "storeEmail",
            ReceiptField::Date => "date",
            ReceiptField::TransactionId => "transactionId",
            ReceiptField::Subtotal => "subtotal",
            ReceiptField::Tax => "tax",
            ReceiptField::Total => "total",
            ReceiptField::PaymentMethod => "paymentMethod",
            ReceiptField::Cashier => "cashier",
            ReceiptField::FooterMessage => "footerMessage",
            ReceiptField::Terms => "terms",
            ReceiptField::Style => "style",
        }
    }
}

impl FromStr for ReceiptField {
    type Err = BoletaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReceiptField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| BoletaError::UnknownField(s.to_string()))
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// The four independent presentation toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptOptions {
    #[serde(rename = "includeQR")]
    pub include_qr: bool,
    pub include_terms: bool,
    pub include_contact: bool,
    pub include_logo: bool,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        Self {
            include_qr: true,
            include_terms: false,
            include_contact: true,
            include_logo: true,
        }
    }
}

impl ReceiptOptions {
    /// Set one toggle.
    pub fn set(&mut self, option: ReceiptOption, enabled: bool) {
        match option {
            ReceiptOption::IncludeQr => self.include_qr = enabled,
            ReceiptOption::IncludeTerms => self.include_terms = enabled,
            ReceiptOption::IncludeContact => self.include_contact = enabled,
            ReceiptOption::IncludeLogo => self.include_logo = enabled,
        }
    }

    /// Read one toggle.
    pub fn get(&self, option: ReceiptOption) -> bool {
        match option {
            ReceiptOption::IncludeQr => self.include_qr,
            ReceiptOption::IncludeTerms => self.include_terms,
            ReceiptOption::IncludeContact => self.include_contact,
            ReceiptOption::IncludeLogo => self.include_logo,
        }
    }
}

/// Names accepted by the toggle setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiptOption {
    IncludeQr,
    IncludeTerms,
    IncludeContact,
    IncludeLogo,
}

impl FromStr for ReceiptOption {
    type Err = BoletaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "includeQR" => Ok(ReceiptOption::IncludeQr),
            "includeTerms" => Ok(ReceiptOption::IncludeTerms),
            "includeContact" => Ok(ReceiptOption::IncludeContact),
            "includeLogo" => Ok(ReceiptOption::IncludeLogo),
            _ => Err(BoletaError::UnknownOption(s.to_string())),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Current local date and time, formatted like `1/20/2026, 12:00:00 PM`.
pub fn current_datetime() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// `TXN` followed by 9 random characters from `[0-9A-Z]`.
pub fn generate_transaction_id() -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();
    format!("TXN{}", suffix)
}

/// A filled-in demo receipt.
pub fn sample_receipt() -> ReceiptData {
    ReceiptData {
        store_name: "Corner Bakery".into(),
        store_address: "12 Harbour St, Halifax".into(),
        store_phone: "(902) 555-0199".into(),
        store_email: "hello@cornerbakery.example".into(),
        date: "1/20/2026, 12:00:00 PM".into(),
        transaction_id: "TXNDEMO00042".into(),
        items: vec![
            ReceiptItem::new("Flat White", "4.50"),
            ReceiptItem::new("Cardamom Bun", "3.25").quantity(2),
            ReceiptItem::new("Sourdough Loaf", "8.00"),
        ],
        subtotal: "19.00".into(),
        tax: "2.85".into(),
        total: "21.85".into(),
        payment_method: "Credit Card".into(),
        cashier: "Sam".into(),
        footer_message: DEFAULT_FOOTER_MESSAGE.into(),
        terms: "All sales final. Returns within 30 days.".into(),
        style: ReceiptStyle::Coffee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_items_round_trip() {
        let items = parse_items("Coffee - 4.50\nBagel - 3.25");
        assert_eq!(
            items,
            vec![
                ReceiptItem {
                    name: "Coffee".into(),
                    price: "4.50".into(),
                    quantity: 1
                },
                ReceiptItem {
                    name: "Bagel".into(),
                    price: "3.25".into(),
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn test_parse_items_missing_price() {
        let items = parse_items("Muffin\nScone -   \n\n   \n");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], ReceiptItem::new("Muffin", "0.00"));
        assert_eq!(items[1], ReceiptItem::new("Scone", "0.00"));
    }

    #[test]
    fn test_parse_items_extra_delimiters() {
        // Only the first two pieces are used.
        let items = parse_items("Coca-Cola - 2.00");
        assert_eq!(items, vec![ReceiptItem::new("Coca", "Cola")]);
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("pharmacy".parse::<ReceiptStyle>().unwrap(), ReceiptStyle::Pharmacy);
        assert_eq!(" GAS ".parse::<ReceiptStyle>().unwrap(), ReceiptStyle::Gas);
        assert!("neon".parse::<ReceiptStyle>().is_err());
        assert_eq!(ReceiptStyle::parse_or_default("neon"), ReceiptStyle::Modern);
    }

    #[test]
    fn test_style_unknown_json_falls_back() {
        let data: ReceiptData = serde_json::from_str(r#"{"style": "neon"}"#).unwrap();
        assert_eq!(data.style, ReceiptStyle::Modern);
    }

    #[test]
    fn test_json_field_names() {
        let data: ReceiptData = serde_json::from_str(
            r#"{
                "storeName": "Shop",
                "transactionId": "TXN1",
                "items": [{"name": "Tea", "price": "2.00"}],
                "footerMessage": "Bye"
            }"#,
        )
        .unwrap();
        assert_eq!(data.store_name, "Shop");
        assert_eq!(data.transaction_id, "TXN1");
        assert_eq!(data.items[0].quantity, 1);
        assert_eq!(data.footer_message, "Bye");

        let options: ReceiptOptions =
            serde_json::from_str(r#"{"includeQR": false, "includeTerms": true}"#).unwrap();
        assert!(!options.include_qr);
        assert!(options.include_terms);
        assert!(options.include_contact);
    }

    #[test]
    fn test_set_field() {
        let mut data = ReceiptData::default();
        for field in ReceiptField::ALL {
            assert_eq!(field.key().parse::<ReceiptField>().unwrap(), field);
        }
        data.set_field(ReceiptField::Total, "12.34");
        data.set_field(ReceiptField::Style, "tech");
        assert_eq!(data.field(ReceiptField::Total), "12.34");
        assert_eq!(data.style, ReceiptStyle::Tech);
        data.set_field(ReceiptField::Style, "neon");
        assert_eq!(data.style, ReceiptStyle::Modern);
        assert!("storename".parse::<ReceiptField>().is_err());
    }

    #[test]
    fn test_display_total() {
        let mut data = ReceiptData::default();
        assert_eq!(data.display_total(), "0.00");
        data.total = "12.34".into();
        assert_eq!(data.display_total(), "12.34");
    }

    #[test]
    fn test_fresh_record() {
        let data = ReceiptData::new();
        assert!(data.transaction_id.starts_with("TXN"));
        assert_eq!(data.transaction_id.len(), 12);
        assert!(
            data.transaction_id[3..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
        assert_eq!(data.payment_method, "Cash");
        assert_eq!(data.footer_message, DEFAULT_FOOTER_MESSAGE);
        assert!(!data.date.is_empty());
        assert!(data.items.is_empty());
    }

    #[test]
    fn test_options() {
        let mut options = ReceiptOptions::default();
        assert!(options.include_qr && options.include_contact && options.include_logo);
        assert!(!options.include_terms);
        let option: ReceiptOption = "includeTerms".parse().unwrap();
        options.set(option, true);
        assert!(options.get(ReceiptOption::IncludeTerms));
        assert!("includeQr".parse::<ReceiptOption>().is_err());
    }
}
