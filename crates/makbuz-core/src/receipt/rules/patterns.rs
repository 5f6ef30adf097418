//! Regex pattern tables for Turkish/English receipt extraction.
//!
//! Patterns run against uppercased single lines, so Turkish dotted capitals
//! (İ, Ş, Ü, ...) appear alongside their plain-ASCII OCR misreads, and the
//! keyword fragments accept both. Repetition is bounded everywhere so no
//! pattern can blow up on adversarial OCR noise.

use lazy_static::lazy_static;
use regex::Regex;

// Keyword fragments. Longer alternatives first: the regex engine prefers
// earlier alternatives at the same start position.
const TR_TOTAL_KW: &str =
    r"GENEL\s*TOPLAM|ARA\s*TOPLAM|TOPLAM\s*TUTAR[İI]?|T\.?\s?O\.?\s?P\.?\s?L\.?\s?A\.?\s?M\.?|TUTAR";
const EN_TOTAL_KW: &str =
    r"GRAND\s*TOTAL|SUB\s*TOTAL|TOTAL\s*DUE|AMOUNT\s*DUE|BALANCE\s*DUE|TOTAL|AMOUNT|BALANCE";
const TR_PAYMENT_KW: &str = r"NAK[İI]T|KRED[İI]\s*KART[İI]?|BANKA\s*KART[İI]?|KART|ÖDEME";
const EN_PAYMENT_KW: &str = r"CASH|CREDIT\s*CARD|DEBIT\s*CARD|CARD|VISA|MASTERCARD|AMEX";

// Amount fragments. The loose form tolerates OCR artifacts (stray spaces or
// thousands separators between digits); the decimal form requires cents and
// is used where no keyword anchors the match.
const LOOSE_NUM: &str = r"\d[\d .,]{0,12}\d|\d";
const STRICT_NUM: &str = r"\d{1,6}(?:[ .,]\d{3})*[.,]\d{2}|\d{1,6}";
const DEC_NUM: &str = r"\d{1,6}(?:[ .]\d{3})*[.,]\d{2}";

const MONTH_ABBR: &str =
    r"OCA|ŞUB|SUB|MAR|N[İI]S|MAY|HAZ|TEM|AĞU|AGU|EYL|EK[İI]|KAS|ARA|JAN|FEB|APR|JUN|JUL|AUG|SEP|OCT|NOV|DEC";

lazy_static! {
    // Amount cascade patterns

    /// Tier 1: explicit total keyword with an amount on the same line.
    pub static ref TOTAL_TR: Regex = Regex::new(&format!(
        r"(?:{TR_TOTAL_KW})\s*[:=]?\s*\*?\s*(?P<cur_pre>₺|\$)?\s*(?P<amt>{LOOSE_NUM})\s*(?P<cur>TL|TRY|₺|USD|\$)?"
    )).unwrap();

    pub static ref TOTAL_EN: Regex = Regex::new(&format!(
        r"(?:{EN_TOTAL_KW})\s*[:=]?\s*(?P<cur_pre>\$|₺)?\s*(?P<amt>{LOOSE_NUM})\s*(?P<cur>TL|TRY|₺|USD|\$)?"
    )).unwrap();

    /// Tier 2: amount following a payment-method label.
    pub static ref PAYMENT_TR: Regex = Regex::new(&format!(
        r"(?:{TR_PAYMENT_KW})\s*[:=]?\s*\*?\s*(?P<cur_pre>₺)?\s*(?P<amt>{STRICT_NUM})\s*(?P<cur>TL|TRY|₺)?"
    )).unwrap();

    pub static ref PAYMENT_EN: Regex = Regex::new(&format!(
        r"(?:{EN_PAYMENT_KW})\s*[:=]?\s*(?P<cur_pre>\$)?\s*(?P<amt>{STRICT_NUM})\s*(?P<cur>USD)?"
    )).unwrap();

    /// Tier 3: line ending in a bare amount with a currency marker.
    pub static ref TRAILING_TL: Regex = Regex::new(&format!(
        r"(?P<amt>{DEC_NUM})\s*(?P<cur>TL|TRY|₺)\s*$"
    )).unwrap();

    pub static ref TRAILING_USD_PRE: Regex = Regex::new(&format!(
        r"(?P<cur_pre>\$)\s*(?P<amt>{DEC_NUM})\s*$"
    )).unwrap();

    pub static ref TRAILING_USD_SUF: Regex = Regex::new(&format!(
        r"(?P<amt>{DEC_NUM})\s*(?P<cur>USD)\s*$"
    )).unwrap();

    /// Tier 4: a total keyword alone on its line (OCR split the amount off).
    pub static ref KEYWORD_ONLY_TR: Regex = Regex::new(&format!(
        r"^(?:{TR_TOTAL_KW})\s*[:=]?\s*$"
    )).unwrap();

    pub static ref KEYWORD_ONLY_EN: Regex = Regex::new(&format!(
        r"^(?:{EN_TOTAL_KW})\s*[:=]?\s*$"
    )).unwrap();

    /// A line that is nothing but an amount (with optional currency marker).
    pub static ref STANDALONE_AMOUNT: Regex = Regex::new(&format!(
        r"^\*?\s*(?P<cur_pre>\$|₺)?\s*(?P<amt>{STRICT_NUM})\s*(?P<cur>TL|TRY|₺|USD)?\s*$"
    )).unwrap();

    /// Change/refund lines. Excluded from every amount tier before matching.
    pub static ref CHANGE_LINE: Regex = Regex::new(
        r"PARA\s*[ÜU]ST[ÜU]|\b[İI]ADE\b|\bCHANGE\b|\bREFUND\b"
    ).unwrap();

    /// Receipt-wide currency markers, for locale-ambiguous matches.
    pub static ref CURRENCY_TL_SCAN: Regex = Regex::new(r"₺|\bTL\b|\bTRY\b").unwrap();
    pub static ref CURRENCY_USD_SCAN: Regex = Regex::new(r"\$|\bUSD\b").unwrap();

    // Date patterns

    pub static ref DATE_KEYWORD_TR: Regex = Regex::new(
        r"TAR[İI]H[İI]?\s*[:=]?\s*(?P<a>\d{1,2})[./-](?P<b>\d{1,2})[./-](?P<c>\d{2,4})"
    ).unwrap();

    pub static ref DATE_KEYWORD_EN: Regex = Regex::new(
        r"DATE\s*[:=]?\s*(?P<a>\d{1,2})[./-](?P<b>\d{1,2})[./-](?P<c>\d{2,4})"
    ).unwrap();

    /// "05 EYL 2025", "15 OCAK 2024", "15 JAN 2024".
    pub static ref DATE_MONTH_DMY: Regex = Regex::new(&format!(
        r"\b(?P<d>\d{{1,2}})\s+(?P<mon>{MONTH_ABBR})[A-ZÇĞİÖŞÜ]*\.?,?\s+(?P<y>\d{{2,4}})\b"
    )).unwrap();

    /// "JAN 15, 2024", "EYL 5 2025".
    pub static ref DATE_MONTH_MDY: Regex = Regex::new(&format!(
        r"\b(?P<mon>{MONTH_ABBR})[A-ZÇĞİÖŞÜ]*\.?\s+(?P<d>\d{{1,2}}),?\s+(?P<y>\d{{2,4}})\b"
    )).unwrap();

    pub static ref DATE_BARE_DMY: Regex = Regex::new(
        r"\b(?P<a>\d{1,2})[./-](?P<b>\d{1,2})[./-](?P<c>\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_BARE_YMD: Regex = Regex::new(
        r"\b(?P<y>\d{4})[./-](?P<m>\d{1,2})[./-](?P<d>\d{1,2})\b"
    ).unwrap();

    // Item row patterns

    /// Turkish point-of-sale row: name, optional tax-group marker, asterisk
    /// price, optional stray trailing digit.
    pub static ref ITEM_ASTERISK: Regex = Regex::new(
        r"^(?P<name>.+?)\s*(?:%\s?\d{1,2}\s*)?\*\s*(?P<amt>\d{1,6}[.,]\d{2})\s*\d?\s*$"
    ).unwrap();

    /// Quantity-prefixed row: "2 ADET Ekmek 17,00 TL", "3x Burger 45.00".
    pub static ref ITEM_QTY: Regex = Regex::new(
        r"(?i)^(?P<qty>\d{1,3})\s*(?:ADET|AD\.?|PORS[İIiı]YON|X)\s+(?P<name>.+?)\s+\*?\s*(?P<amt>\d{1,6}[.,]\d{2})\s*(?:TL|TRY|₺|USD|\$)?\s*$"
    ).unwrap();

    /// Generic row: name then a trailing price with optional currency.
    pub static ref ITEM_GENERIC: Regex = Regex::new(
        r"(?i)^(?P<name>.+?)\s+(?P<cur_pre>\$)?(?P<amt>\d{1,6}[.,]\d{2})\s*(?P<cur>TL|TRY|₺|USD)?\s*$"
    ).unwrap();

    /// Any currency-suffixed (or $-prefixed) amount inside a line.
    pub static ref ITEM_CURRENCY_ANY: Regex = Regex::new(
        r"(?:\$\s*(?P<amt1>\d{1,6}[.,]\d{2})|(?P<amt2>\d{1,6}[.,]\d{2})\s*(?:TL|TRY|₺|USD))"
    ).unwrap();

    /// Leading quantity token inside an already-captured item name.
    pub static ref QTY_PREFIX: Regex = Regex::new(
        r"(?i)^(?P<qty>\d{1,3})\s*(?:ADET|AD\.?|PORS[İIiı]YON|X)\s+(?P<rest>.+)$"
    ).unwrap();

    /// Trailing standalone digit token on an item name ("EKMEK 2").
    pub static ref TRAILING_QTY_DIGIT: Regex = Regex::new(r"\s+\d{1,3}$").unwrap();

    /// Unit suffix that must survive name cleanup ("Süt 1L", "Peynir 500G").
    pub static ref UNIT_SUFFIX: Regex = Regex::new(
        r"(?i)\d+\s?(?:L|LT|KG|GR?|ML|CL|PK)\.?\)?$"
    ).unwrap();
}

/// Line prefixes (ASCII-folded, uppercase) that disqualify a vendor
/// candidate.
pub const NON_VENDOR_PREFIXES: &[&str] = &[
    "TARIH", "DATE", "SAAT", "TIME", "FIS", "RECEIPT", "KDV", "VERGI", "TAX", "TOPLAM", "TOTAL",
    "SUBTOTAL", "GENEL", "ARA TOPLAM", "TUTAR", "NAKIT", "CASH", "KART", "CARD", "ODEME",
    "PAYMENT", "TEL", "PHONE", "ADRES", "ADDRESS", "TESEKKUR", "THANK", "URUN", "SIPARIS", "MASA",
    "GARSON", "MUSTERI", "PARA", "IADE", "WWW", "HTTP",
];

/// Store-type keywords (ASCII-folded, uppercase) that accept a vendor
/// candidate immediately.
pub const STORE_TYPE_KEYWORDS: &[&str] = &[
    "MARKET", "MAGAZA", "BAKKAL", "MANAV", "KASAP", "FIRIN", "PASTANE", "RESTORAN", "RESTAURANT",
    "LOKANTA", "KAFE", "CAFE", "BUFE", "KANTIN", "ECZANE", "PHARMACY", "PETROL", "BENZIN",
    "AKARYAKIT", "STORE", "SHOP", "DELI", "PIZZA", "BURGER", "GROCERY", "SUPERMARKET", " LTD",
    " A.S", " INC", " LLC", " CORP",
];

/// Keywords (ASCII-folded, uppercase) that mark a line as header, footer, or
/// metadata rather than an item row.
pub const ITEM_SKIP_KEYWORDS: &[&str] = &[
    "TOPLAM", "TOTAL", "SUBTOTAL", "KDV", "TAX", "VERGI", "TARIH", "DATE", "SAAT", "TIME", "FIS",
    "RECEIPT", "NAKIT", "CASH", "KART", "CARD", "ODEME", "PAYMENT", "PARA USTU", "IADE", "CHANGE",
    "REFUND", "TESEKKUR", "THANK", "TEL", "ADRES", "ADDRESS", "MASA", "GARSON", "TUTAR", "UCRET",
    "URUN", "SIPARIS", "BALANCE", "VISA", "MASTERCARD",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_tr_matches_keyword_variants() {
        for line in [
            "TOPLAM: 97,15 TL",
            "GENEL TOPLAM: 118,89 TL",
            "TOPLAM TUTAR 1.234,56₺",
            "T.O.P.L.A.M 50,00",
            "ARA TOPLAM:                100,75 TL",
        ] {
            assert!(TOTAL_TR.is_match(line), "no match: {line}");
        }
    }

    #[test]
    fn total_tr_captures_amount() {
        let caps = TOTAL_TR.captures("TOPLAM: 97,15 TL").unwrap();
        assert_eq!(&caps["amt"], "97,15");
        assert_eq!(caps.name("cur").unwrap().as_str(), "TL");
    }

    #[test]
    fn total_en_matches_dollar_total() {
        let caps = TOTAL_EN.captures("TOTAL $40.76").unwrap();
        assert_eq!(&caps["amt"], "40.76");
        assert_eq!(caps.name("cur_pre").unwrap().as_str(), "$");
    }

    #[test]
    fn change_line_detected() {
        assert!(CHANGE_LINE.is_match("PARA ÜSTÜ: 2,85 TL"));
        assert!(CHANGE_LINE.is_match("PARA USTU 5,00"));
        assert!(CHANGE_LINE.is_match("İADE TUTARI 10,00 TL"));
        assert!(CHANGE_LINE.is_match("CHANGE DUE $1.24"));
        assert!(!CHANGE_LINE.is_match("TOPLAM: 97,15 TL"));
    }

    #[test]
    fn trailing_tl_requires_currency_marker() {
        assert!(TRAILING_TL.is_match("3 ADET Yoğurt               15,75 TL"));
        assert!(!TRAILING_TL.is_match("MASA NO: 12"));
    }

    #[test]
    fn standalone_amount_line() {
        assert!(STANDALONE_AMOUNT.is_match("97,15 TL"));
        assert!(STANDALONE_AMOUNT.is_match("*118,89"));
        assert!(STANDALONE_AMOUNT.is_match("$40.76"));
        assert!(!STANDALONE_AMOUNT.is_match("SAAT: 14:30"));
    }

    #[test]
    fn item_grammars_match_expected_rows() {
        assert!(ITEM_ASTERISK.is_match("EKMEK %01 *8,50"));
        assert!(ITEM_QTY.is_match("2 ADET Ekmek          17,00 TL"));
        assert!(ITEM_QTY.is_match("3x Burger 45.00"));
        assert!(ITEM_GENERIC.is_match("PENS BIC BLUE 12PK       $8.99"));
    }

    #[test]
    fn unit_suffix_is_recognized() {
        assert!(UNIT_SUFFIX.is_match("Süt 1L"));
        assert!(UNIT_SUFFIX.is_match("Peynir 500G"));
        assert!(!UNIT_SUFFIX.is_match("Ekmek 2"));
    }
}
