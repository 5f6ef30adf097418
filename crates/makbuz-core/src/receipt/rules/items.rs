//! Line-item row parsing.
//!
//! Four row grammars, tried in order of specificity: the Turkish
//! point-of-sale asterisk row, the quantity-prefixed row, the generic
//! name-then-price row, and finally any line carrying a currency-marked
//! amount. Header, footer, and metadata lines are skipped up front.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::parse_receipt_amount;
use super::patterns::*;
use crate::models::config::ExtractionConfig;
use crate::models::receipt::LineItem;
use crate::normalize::{NormalizedText, fold_turkish};

pub struct LineItemExtractor {
    config: ExtractionConfig,
}

impl LineItemExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Parse all item rows, in receipt order. Unparseable lines are skipped,
    /// never an error.
    pub fn extract(&self, text: &NormalizedText) -> Vec<LineItem> {
        let mut items = Vec::new();

        for (idx, line) in text.lines.iter().enumerate() {
            let folded_upper = fold_turkish(&line.to_uppercase());
            if CHANGE_LINE.is_match(&folded_upper)
                || ITEM_SKIP_KEYWORDS.iter().any(|k| folded_upper.contains(k))
            {
                continue;
            }

            if let Some(item) = self.parse_row(idx, line) {
                items.push(item);
            }
        }

        debug!(count = items.len(), "item rows parsed");
        items
    }

    fn parse_row(&self, idx: usize, line: &str) -> Option<LineItem> {
        if let Some(caps) = ITEM_ASTERISK.captures(line) {
            return self.build(idx, &caps["name"], None, &caps["amt"]);
        }
        if let Some(caps) = ITEM_QTY.captures(line) {
            let qty: u32 = caps["qty"].parse().ok()?;
            return self.build(idx, &caps["name"], Some(qty), &caps["amt"]);
        }
        if let Some(caps) = ITEM_GENERIC.captures(line) {
            return self.build(idx, &caps["name"], None, &caps["amt"]);
        }
        // Last resort: exactly one currency-marked amount in the line; the
        // rest of the line is the name. Two or more marked amounts means the
        // row structure was not understood, so guessing would be wrong.
        if ITEM_CURRENCY_ANY.find_iter(line).count() == 1 {
            let caps = ITEM_CURRENCY_ANY.captures(line)?;
            let m = caps.get(0)?;
            let amt = caps
                .name("amt1")
                .or_else(|| caps.name("amt2"))?
                .as_str()
                .to_string();
            let name = format!("{} {}", &line[..m.start()], &line[m.end()..]);
            return self.build(idx, &name, None, &amt);
        }
        None
    }

    fn build(&self, idx: usize, raw_name: &str, qty: Option<u32>, amt: &str) -> Option<LineItem> {
        let total_price = parse_receipt_amount(amt)?;
        if total_price <= Decimal::ZERO || total_price > self.config.max_item_price {
            return None;
        }

        let (name, quantity) = clean_name(raw_name, qty);
        if name.chars().count() < 2 || !name.chars().any(char::is_alphabetic) {
            return None;
        }

        let quantity = Decimal::from(quantity.max(1));
        let unit_price = (total_price / quantity).round_dp(2);

        Some(LineItem {
            name,
            quantity,
            unit_price,
            total_price,
            source_line: idx,
        })
    }
}

/// Strip quantity tokens out of a captured name. A leading "2 ADET" or "3x"
/// becomes the quantity; a trailing bare digit is dropped unless it belongs
/// to a unit suffix like "1L" or "500G".
fn clean_name(raw: &str, qty: Option<u32>) -> (String, u32) {
    let mut name = raw.trim().to_string();
    let mut quantity = qty.unwrap_or(1);

    if qty.is_none() {
        if let Some(caps) = QTY_PREFIX.captures(&name) {
            if let Ok(q) = caps["qty"].parse() {
                quantity = q;
                name = caps["rest"].trim().to_string();
            }
        }
    }

    if !UNIT_SUFFIX.is_match(&name) {
        name = TRAILING_QTY_DIGIT.replace(&name, "").into_owned();
    }

    (name.trim_matches([' ', '*', ':', '-', '.']).to_string(), quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn items(text: &str) -> Vec<LineItem> {
        LineItemExtractor::new(ExtractionConfig::default()).extract(&NormalizedText::new(text))
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn asterisk_row() {
        let got = items("EKMEK %01 *8,50");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "EKMEK");
        assert_eq!(got[0].quantity, dec("1"));
        assert_eq!(got[0].total_price, dec("8.50"));
    }

    #[test]
    fn quantity_prefixed_row() {
        let got = items("2 ADET Ekmek          17,00 TL");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Ekmek");
        assert_eq!(got[0].quantity, dec("2"));
        assert_eq!(got[0].unit_price, dec("8.50"));
        assert_eq!(got[0].total_price, dec("17.00"));
    }

    #[test]
    fn x_quantity_row() {
        let got = items("3x Burger 45.00");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Burger");
        assert_eq!(got[0].quantity, dec("3"));
        assert_eq!(got[0].unit_price, dec("15.00"));
    }

    #[test]
    fn generic_row_with_dollar_price() {
        let got = items("PENS BIC BLUE 12PK       $8.99");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "PENS BIC BLUE 12PK");
        assert_eq!(got[0].total_price, dec("8.99"));
    }

    #[test]
    fn quantity_inside_asterisk_name() {
        let got = items("2 ADET Süt 1L *25,80");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Süt 1L");
        assert_eq!(got[0].quantity, dec("2"));
        assert_eq!(got[0].unit_price, dec("12.90"));
    }

    #[test]
    fn trailing_digit_is_dropped_but_unit_suffix_kept() {
        let got = items("Peynir 500G 45,00 TL\nElma 2 12,00 TL");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "Peynir 500G");
        assert_eq!(got[1].name, "Elma");
    }

    #[test]
    fn metadata_lines_are_skipped() {
        let got = items("TOPLAM: 97,15 TL\nKDV (%18): 18,14 TL\nPARA ÜSTÜ: 2,85 TL\nSaat: 14:30");
        assert!(got.is_empty());
    }

    #[test]
    fn implausible_price_is_rejected() {
        assert!(items("Televizyon 99999,00 TL").is_empty());
    }

    #[test]
    fn nameless_row_is_rejected() {
        assert!(items("123 45,00 TL").is_empty());
    }

    #[test]
    fn source_line_points_at_the_row() {
        let got = items("ÖZGÜR MARKET\nEKMEK *8,50");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].source_line, 1);
    }

    #[test]
    fn rows_keep_receipt_order() {
        let got = items("EKMEK *8,50\nSÜT *12,90\nYUMURTA *32,00");
        let names: Vec<&str> = got.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["EKMEK", "SÜT", "YUMURTA"]);
    }
}
