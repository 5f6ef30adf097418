//! Total-amount extraction cascade.
//!
//! A receipt carries several numerically valid but semantically different
//! figures (subtotals, tax, per-item prices, cash tendered, change). The
//! cascade consults an ordered table of locale-tagged pattern rules, tier by
//! tier; the first tier producing at least one candidate wins. Change and
//! refund lines are removed before any tier runs.

use rust_decimal::Decimal;
use std::str::FromStr;

use tracing::debug;

use super::items::LineItemExtractor;
use super::patterns::*;
use super::Locale;
use crate::models::config::ExtractionConfig;
use crate::models::receipt::Currency;
use crate::normalize::NormalizedText;

/// Pattern family tags for the amount cascade, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFamily {
    /// Explicit total keyword with the amount on the same line.
    KeywordTotal,
    /// Amount following a cash/card payment label.
    PaymentAmount,
    /// Line ending in a bare amount plus currency marker, scanned bottom-up.
    TrailingCurrency,
    /// Total keyword alone on its line; amount found on a nearby line below.
    KeywordNearbyLine,
    /// Sum of distinct parsed item prices.
    ItemSumFallback,
}

/// One row of the amount rule table.
struct AmountRule {
    family: RuleFamily,
    locale: Locale,
    pattern: &'static regex::Regex,
}

fn rule_table() -> &'static [AmountRule] {
    use RuleFamily::*;
    lazy_static::lazy_static! {
        static ref RULES: Vec<AmountRule> = vec![
            AmountRule { family: KeywordTotal, locale: Locale::Turkish, pattern: &TOTAL_TR },
            AmountRule { family: KeywordTotal, locale: Locale::English, pattern: &TOTAL_EN },
            AmountRule { family: PaymentAmount, locale: Locale::Turkish, pattern: &PAYMENT_TR },
            AmountRule { family: PaymentAmount, locale: Locale::English, pattern: &PAYMENT_EN },
            AmountRule { family: TrailingCurrency, locale: Locale::Turkish, pattern: &TRAILING_TL },
            AmountRule { family: TrailingCurrency, locale: Locale::English, pattern: &TRAILING_USD_PRE },
            AmountRule { family: TrailingCurrency, locale: Locale::English, pattern: &TRAILING_USD_SUF },
        ];
    }
    &RULES
}

/// A candidate amount with its provenance.
#[derive(Debug, Clone)]
struct Candidate {
    value: Decimal,
    currency_hint: Option<Currency>,
    locale: Locale,
    line: usize,
}

/// Outcome of the total-amount cascade.
#[derive(Debug, Clone)]
pub struct AmountOutcome {
    pub amount: Option<Decimal>,
    pub currency: Currency,
    /// Which pattern family produced the amount.
    pub family: Option<RuleFamily>,
}

impl AmountOutcome {
    fn not_found() -> Self {
        Self {
            amount: None,
            currency: Currency::Unknown,
            family: None,
        }
    }
}

/// Total-amount extractor.
pub struct AmountExtractor {
    config: ExtractionConfig,
}

impl AmountExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Run the cascade over the normalized text.
    pub fn extract_total(&self, text: &NormalizedText) -> AmountOutcome {
        // Change/refund lines must never be mistaken for a total; drop them
        // before any tier runs.
        let kept: Vec<(usize, &str)> = text
            .upper_lines()
            .into_iter()
            .enumerate()
            .filter(|(_, l)| !CHANGE_LINE.is_match(l))
            .collect();

        if kept.is_empty() {
            return AmountOutcome::not_found();
        }

        let tier1 = self.match_family(&kept, RuleFamily::KeywordTotal);
        let payments = self.match_family(&kept, RuleFamily::PaymentAmount);

        if !tier1.is_empty() {
            let chosen = prefer_total_quoted_before_tender(&tier1, &payments);
            return self.outcome(chosen, RuleFamily::KeywordTotal, text);
        }

        if let Some(last) = payments.last() {
            // Totals sit near the end of a receipt; take the bottom-most
            // payment amount.
            return self.outcome(last, RuleFamily::PaymentAmount, text);
        }

        let trailing = self.match_family(&kept, RuleFamily::TrailingCurrency);
        if let Some(last) = trailing.last() {
            return self.outcome(last, RuleFamily::TrailingCurrency, text);
        }

        if let Some(c) = self.keyword_nearby_line(&kept) {
            return self.outcome(&c, RuleFamily::KeywordNearbyLine, text);
        }

        self.item_sum_fallback(text)
    }

    fn match_family(&self, kept: &[(usize, &str)], family: RuleFamily) -> Vec<Candidate> {
        let mut out = Vec::new();
        for (idx, line) in kept {
            for rule in rule_table().iter().filter(|r| r.family == family) {
                if let Some(caps) = rule.pattern.captures(line) {
                    let Some(value) = caps.name("amt").and_then(|m| parse_receipt_amount(m.as_str()))
                    else {
                        continue;
                    };
                    if value <= Decimal::ZERO || value >= Decimal::from(1_000_000) {
                        continue;
                    }
                    out.push(Candidate {
                        value,
                        currency_hint: marker_currency(&caps),
                        locale: rule.locale,
                        line: *idx,
                    });
                    break;
                }
            }
        }
        out
    }

    /// Tier 4: a total keyword alone on its line, amount split onto one of
    /// the next few lines by the OCR engine.
    fn keyword_nearby_line(&self, kept: &[(usize, &str)]) -> Option<Candidate> {
        for (pos, (_, line)) in kept.iter().enumerate() {
            let locale = if KEYWORD_ONLY_TR.is_match(line) {
                Locale::Turkish
            } else if KEYWORD_ONLY_EN.is_match(line) {
                Locale::English
            } else {
                continue;
            };

            for (idx, nearby) in kept.iter().skip(pos + 1).take(self.config.nearby_line_window) {
                if let Some(caps) = STANDALONE_AMOUNT.captures(nearby) {
                    let Some(value) = caps.name("amt").and_then(|m| parse_receipt_amount(m.as_str()))
                    else {
                        continue;
                    };
                    if value <= Decimal::ZERO {
                        continue;
                    }
                    return Some(Candidate {
                        value,
                        currency_hint: marker_currency(&caps),
                        locale,
                        line: *idx,
                    });
                }
            }
        }
        None
    }

    /// Tier 5: no keyword, payment, or trailing match anywhere, so sum the
    /// distinct item prices instead.
    fn item_sum_fallback(&self, text: &NormalizedText) -> AmountOutcome {
        let items = LineItemExtractor::new(self.config.clone()).extract(text);
        if items.is_empty() {
            return AmountOutcome::not_found();
        }

        // Repeated OCR detections show up as identical name/price pairs;
        // count each once.
        let mut seen: Vec<(String, Decimal)> = Vec::new();
        let mut sum = Decimal::ZERO;
        for item in &items {
            let key = (crate::normalize::fold_turkish(&item.name.to_uppercase()), item.total_price);
            if seen.contains(&key) {
                continue;
            }
            sum += item.total_price;
            seen.push(key);
        }

        if sum <= Decimal::ZERO {
            return AmountOutcome::not_found();
        }

        debug!(candidates = seen.len(), "total derived from item-sum fallback");
        let currency = match scan_currency(text) {
            Currency::Unknown if text.folded.contains("ADET") || text.folded.contains('*') => {
                // Turkish point-of-sale row formats imply lira even when the
                // rows carry no explicit marker.
                Currency::Tl
            }
            c => c,
        };

        AmountOutcome {
            amount: Some(sum),
            currency,
            family: Some(RuleFamily::ItemSumFallback),
        }
    }

    fn outcome(&self, c: &Candidate, family: RuleFamily, text: &NormalizedText) -> AmountOutcome {
        let currency = c.currency_hint.unwrap_or_else(|| match c.locale {
            Locale::Turkish => Currency::Tl,
            Locale::English => scan_currency(text),
        });
        debug!(?family, line = c.line, %c.value, "total candidate accepted");
        AmountOutcome {
            amount: Some(c.value),
            currency,
            family: Some(family),
        }
    }
}

/// Pick among multiple keyword-total candidates.
///
/// Heuristic: receipts quote the total before the (greater or equal) cash
/// tendered, so when a payment-method amount at least as large as the
/// smallest candidate is present, the smallest positive candidate is the
/// total. Without such a payment amount, the largest candidate wins (a grand
/// total is at least any subtotal that also matched). This is a documented
/// heuristic about observed receipt formats, not a guarantee; keep it
/// isolated here.
fn prefer_total_quoted_before_tender<'a>(
    candidates: &'a [Candidate],
    payments: &[Candidate],
) -> &'a Candidate {
    debug_assert!(!candidates.is_empty());
    if candidates.len() == 1 {
        return &candidates[0];
    }

    let smallest = candidates
        .iter()
        .min_by(|a, b| a.value.cmp(&b.value))
        .unwrap_or(&candidates[0]);

    if payments.iter().any(|p| p.value >= smallest.value) {
        return smallest;
    }

    candidates
        .iter()
        .max_by(|a, b| a.value.cmp(&b.value))
        .unwrap_or(&candidates[0])
}

/// Map an explicit currency marker in the captures to a currency.
fn marker_currency(caps: &regex::Captures<'_>) -> Option<Currency> {
    let marker = caps
        .name("cur_pre")
        .or_else(|| caps.name("cur"))?
        .as_str();
    match marker {
        "TL" | "TRY" | "₺" => Some(Currency::Tl),
        "$" | "USD" => Some(Currency::Usd),
        _ => None,
    }
}

/// Receipt-wide currency scan for locale-ambiguous matches.
fn scan_currency(text: &NormalizedText) -> Currency {
    if CURRENCY_TL_SCAN.is_match(&text.upper_joined) {
        Currency::Tl
    } else if CURRENCY_USD_SCAN.is_match(&text.upper_joined) {
        Currency::Usd
    } else {
        Currency::Unknown
    }
}

/// Parse a receipt-formatted amount ("118,89", "1.234,56", "1,234.56",
/// "1 18,89" with OCR spacing) into a decimal.
///
/// When both separators appear, the rightmost one is the decimal separator;
/// a lone comma is a decimal comma.
pub fn parse_receipt_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') && cleaned.contains('.') {
        let comma = cleaned.rfind(',');
        let dot = cleaned.rfind('.');
        match (comma, dot) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            _ => cleaned.replace(',', ""),
        }
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    Decimal::from_str(&normalized).ok()
}
