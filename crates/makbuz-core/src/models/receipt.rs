//! Receipt data models produced by the extraction pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency of the extracted total.
///
/// Receipts are single-currency; the pipeline never mixes currencies within
/// one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Turkish lira (TL / ₺ / TRY markers).
    Tl,
    /// US dollar ($ / USD markers).
    Usd,
    /// No currency marker was recognized.
    #[default]
    Unknown,
}

/// Spending category inferred from bilingual keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transportation,
    Office,
    Healthcare,
    Utilities,
    Maintenance,
}

/// A single purchased item parsed from a receipt row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as printed, with whitespace collapsed.
    pub name: String,

    /// Quantity; defaults to 1 when the row carries no quantity token.
    pub quantity: Decimal,

    /// Price per unit. When only a row total is found this is
    /// `total_price / quantity`.
    pub unit_price: Decimal,

    /// Total price for the row.
    pub total_price: Decimal,

    /// Zero-based index of the originating line in the normalized text.
    pub source_line: usize,
}

/// Structured facts extracted from one receipt's OCR text.
///
/// Every field except `raw_text` and `confidence` is optional or empty when
/// the corresponding cascade found no plausible candidate; unreadable input
/// yields a low-confidence result, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Merchant name, title-cased when recognized via layout heuristics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// The authoritative total amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    /// Currency of `total_amount`.
    pub currency: Currency,

    /// Purchase date, validated to a sane calendar range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,

    /// Parsed item rows, in receipt order.
    pub items: Vec<LineItem>,

    /// Spending category inferred from vendor and text keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Confidence in [0, 1]; monotone in the number of well-formed fields.
    pub confidence: f32,

    /// The input text, retained for audit.
    pub raw_text: String,
}

impl ExtractionResult {
    /// An empty result for the given input text.
    pub fn empty(raw_text: impl Into<String>) -> Self {
        Self {
            vendor: None,
            total_amount: None,
            currency: Currency::Unknown,
            purchase_date: None,
            items: Vec::new(),
            category: None,
            confidence: 0.0,
            raw_text: raw_text.into(),
        }
    }

    /// Sum of the item row totals.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|i| i.total_price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn empty_result_has_zero_confidence() {
        let r = ExtractionResult::empty("");
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.currency, Currency::Unknown);
        assert!(r.vendor.is_none());
        assert!(r.items.is_empty());
    }

    #[test]
    fn items_total_sums_rows() {
        let mut r = ExtractionResult::empty("x");
        r.items.push(LineItem {
            name: "Ekmek".to_string(),
            quantity: Decimal::from(2),
            unit_price: Decimal::from_str("8.50").unwrap(),
            total_price: Decimal::from_str("17.00").unwrap(),
            source_line: 0,
        });
        r.items.push(LineItem {
            name: "Süt".to_string(),
            quantity: Decimal::ONE,
            unit_price: Decimal::from_str("12.90").unwrap(),
            total_price: Decimal::from_str("12.90").unwrap(),
            source_line: 1,
        });
        assert_eq!(r.items_total(), Decimal::from_str("29.90").unwrap());
    }

    #[test]
    fn serializes_without_absent_fields() {
        let r = ExtractionResult::empty("fis");
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("vendor").is_none());
        assert!(json.get("total_amount").is_none());
        assert_eq!(json["currency"], "unknown");
        assert_eq!(json["raw_text"], "fis");
    }
}
