//! Vendor (merchant) name extraction.
//!
//! The vendor name sits in the first few printed lines, above the metadata
//! block. Candidates are filtered by prefix and digit-density checks, then
//! accepted either by a store-type keyword or by the all-caps header layout
//! convention.

use tracing::debug;

use super::patterns::{NON_VENDOR_PREFIXES, STORE_TYPE_KEYWORDS};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;
use crate::normalize::{NormalizedText, fold_turkish};

pub struct VendorExtractor {
    config: ExtractionConfig,
}

impl VendorExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    fn is_disqualified(&self, folded_upper: &str) -> bool {
        NON_VENDOR_PREFIXES
            .iter()
            .any(|p| folded_upper.starts_with(p))
    }

    fn has_store_keyword(&self, folded_upper: &str) -> bool {
        STORE_TYPE_KEYWORDS.iter().any(|k| folded_upper.contains(k))
    }

    fn plausible_len(&self, line: &str) -> bool {
        let len = line.chars().count();
        len >= self.config.vendor_min_len && len <= self.config.vendor_max_len
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        if text.is_empty() {
            return None;
        }

        for (idx, line) in text.lines.iter().take(self.config.vendor_scan_lines).enumerate() {
            let folded_upper = fold_turkish(&line.to_uppercase());

            if self.is_disqualified(&folded_upper) {
                continue;
            }
            if digit_ratio(line) > 0.3 {
                continue;
            }

            if self.has_store_keyword(&folded_upper) && self.plausible_len(line) {
                debug!(line = idx, "vendor accepted via store-type keyword");
                return Some(
                    ExtractionMatch::new(title_case(line), 0.9, line.as_str()).with_line(idx),
                );
            }

            if uppercase_ratio(line) > self.config.vendor_uppercase_ratio
                && self.plausible_len(line)
            {
                debug!(line = idx, "vendor accepted via header layout");
                return Some(
                    ExtractionMatch::new(title_case(line), 0.7, line.as_str()).with_line(idx),
                );
            }
        }

        // Nothing matched the header conventions; the top line is still the
        // best guess available.
        let first = text.lines.first()?;
        debug!("vendor fell back to first line");
        Some(ExtractionMatch::new(first.clone(), 0.4, first.as_str()).with_line(0))
    }
}

/// Fraction of the line's characters that are ASCII digits.
fn digit_ratio(line: &str) -> f32 {
    let total = line.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return 0.0;
    }
    let digits = line.chars().filter(char::is_ascii_digit).count();
    digits as f32 / total as f32
}

/// Fraction of the line's alphabetic characters that are uppercase.
fn uppercase_ratio(line: &str) -> f32 {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return 0.0;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f32 / letters.len() as f32
}

/// "ÖZGÜR MARKET" -> "Özgür Market". Word-initial characters keep their
/// uppercase form, the rest are lowercased.
fn title_case(line: &str) -> String {
    line.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.extend(chars.flat_map(lowercase_char));
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase that maps dotted İ to a plain `i` instead of Unicode's
/// `i` plus combining dot, which would render badly in vendor names.
fn lowercase_char(c: char) -> std::vec::IntoIter<char> {
    match c {
        'İ' => vec!['i'].into_iter(),
        _ => c.to_lowercase().collect::<Vec<_>>().into_iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vendor(text: &str) -> Option<String> {
        VendorExtractor::new(ExtractionConfig::default())
            .extract(&NormalizedText::new(text))
            .map(|m| m.value)
    }

    #[test]
    fn store_keyword_line_wins() {
        let text = "ÖZGÜR MARKET\nTARİH: 05.09.2025\nTOPLAM: 10,00 TL";
        assert_eq!(vendor(text), Some("Özgür Market".to_string()));
    }

    #[test]
    fn metadata_prefixes_are_skipped() {
        let text = "TARİH: 05.09.2025\nSAAT: 14:30\nACME STORE\nTOTAL $40.76";
        assert_eq!(vendor(text), Some("Acme Store".to_string()));
    }

    #[test]
    fn digit_heavy_line_is_skipped() {
        let text = "0212 555 44 33\nŞEKERCİOĞLU ECZANE";
        assert_eq!(vendor(text), Some("Şekercioğlu Eczane".to_string()));
    }

    #[test]
    fn all_caps_header_without_keyword() {
        let text = "YILMAZ GIDA SAN. VE TIC.\nFİŞ NO: 001";
        assert_eq!(vendor(text), Some("Yilmaz Gida San. Ve Tic.".to_string()));
    }

    #[test]
    fn fallback_keeps_first_line_verbatim() {
        let text = "ali'nin yeri\nekmek 5,00";
        assert_eq!(vendor(text), Some("ali'nin yeri".to_string()));
    }

    #[test]
    fn empty_text_has_no_vendor() {
        assert_eq!(vendor(""), None);
        assert_eq!(vendor("   \n  \n"), None);
    }

    #[test]
    fn turkish_dotted_i_folds_for_prefix_check() {
        // "TARİH" must fold to "TARIH" and be disqualified.
        let text = "TARİH: 01.01.2025\nKARDEŞLER BAKKAL";
        assert_eq!(vendor(text), Some("Kardeşler Bakkal".to_string()));
    }
}
