//! Purchase-date extraction.
//!
//! Ordered pattern attempts: keyword-anchored numeric dates first, then
//! month-name forms, then bare numeric forms. Every candidate is validated
//! against a plausibility window before it is accepted, so a later pattern
//! can still win when an earlier one matched OCR garbage.

use chrono::{Days, NaiveDate};
use tracing::debug;

use super::patterns::*;
use super::{ExtractionMatch, FieldExtractor};
use crate::normalize::{NormalizedText, fold_turkish};

pub struct DateExtractor {
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl DateExtractor {
    /// `reference` is "today" for plausibility purposes; dates up to one day
    /// after it are accepted to absorb timezone skew.
    pub fn new(reference: NaiveDate, min_year: i32) -> Self {
        let min_date = NaiveDate::from_ymd_opt(min_year, 1, 1).unwrap_or(NaiveDate::MIN);
        let max_date = reference
            .checked_add_days(Days::new(1))
            .unwrap_or(reference);
        Self { min_date, max_date }
    }

    fn in_range(&self, d: NaiveDate) -> bool {
        d >= self.min_date && d <= self.max_date
    }

    /// Build a date from day/month/year parts, trying the given order first
    /// and the swapped day/month order second.
    fn build(&self, first: u32, second: u32, year: i32, day_first: bool) -> Option<NaiveDate> {
        let orders = if day_first {
            [(first, second), (second, first)]
        } else {
            [(second, first), (first, second)]
        };
        orders
            .into_iter()
            .filter_map(|(d, m)| NaiveDate::from_ymd_opt(year, m, d))
            .find(|d| self.in_range(*d))
    }

    fn numeric_keyword(&self, text: &str, re: &regex::Regex, day_first: bool) -> Option<NaiveDate> {
        for caps in re.captures_iter(text) {
            let a: u32 = caps.name("a")?.as_str().parse().ok()?;
            let b: u32 = caps.name("b")?.as_str().parse().ok()?;
            let y: i32 = caps.name("c")?.as_str().parse().ok()?;
            if let Some(d) = self.build(a, b, pivot_year(y), day_first) {
                return Some(d);
            }
        }
        None
    }

    fn month_name(&self, text: &str, re: &regex::Regex) -> Option<NaiveDate> {
        for caps in re.captures_iter(text) {
            let day: u32 = caps.name("d")?.as_str().parse().ok()?;
            let year: i32 = caps.name("y")?.as_str().parse().ok()?;
            let month = month_abbr_to_num(caps.name("mon")?.as_str())?;
            if let Some(d) = NaiveDate::from_ymd_opt(pivot_year(year), month, day) {
                if self.in_range(d) {
                    return Some(d);
                }
            }
        }
        None
    }

    fn bare_ymd(&self, text: &str) -> Option<NaiveDate> {
        for caps in DATE_BARE_YMD.captures_iter(text) {
            let y: i32 = caps.name("y")?.as_str().parse().ok()?;
            let m: u32 = caps.name("m")?.as_str().parse().ok()?;
            let d: u32 = caps.name("d")?.as_str().parse().ok()?;
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                if self.in_range(date) {
                    return Some(date);
                }
            }
        }
        None
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        let joined = &text.upper_joined;

        // Turkish receipts print DMY; English keyword dates are read MDY
        // first since US receipts dominate that form.
        if let Some(d) = self.numeric_keyword(joined, &DATE_KEYWORD_TR, true) {
            debug!(%d, "date via Turkish keyword");
            return Some(ExtractionMatch::new(d, 0.9, "keyword_tr"));
        }
        if let Some(d) = self.numeric_keyword(joined, &DATE_KEYWORD_EN, false) {
            debug!(%d, "date via English keyword");
            return Some(ExtractionMatch::new(d, 0.9, "keyword_en"));
        }
        if let Some(d) = self
            .month_name(joined, &DATE_MONTH_DMY)
            .or_else(|| self.month_name(joined, &DATE_MONTH_MDY))
        {
            debug!(%d, "date via month name");
            return Some(ExtractionMatch::new(d, 0.8, "month_name"));
        }
        // Bare numeric forms, most ambiguous last.
        for caps in DATE_BARE_DMY.captures_iter(joined) {
            let parts = (
                caps.name("a").and_then(|m| m.as_str().parse::<u32>().ok()),
                caps.name("b").and_then(|m| m.as_str().parse::<u32>().ok()),
                caps.name("c").and_then(|m| m.as_str().parse::<i32>().ok()),
            );
            if let (Some(a), Some(b), Some(y)) = parts {
                if let Some(d) = self.build(a, b, pivot_year(y), true) {
                    debug!(%d, "date via bare numeric form");
                    return Some(ExtractionMatch::new(d, 0.6, "bare_dmy"));
                }
            }
        }
        if let Some(d) = self.bare_ymd(joined) {
            debug!(%d, "date via bare ISO form");
            return Some(ExtractionMatch::new(d, 0.6, "bare_ymd"));
        }
        None
    }
}

/// Two-digit years pivot at 50: 00-49 map into the 2000s, 50-99 into the
/// 1900s. Four-digit years pass through.
fn pivot_year(y: i32) -> i32 {
    if y < 50 {
        2000 + y
    } else if y < 100 {
        1900 + y
    } else {
        y
    }
}

/// Turkish and English month abbreviations (first three letters, folded).
fn month_abbr_to_num(abbr: &str) -> Option<u32> {
    let folded = fold_turkish(abbr);
    let n = match folded.as_str() {
        "OCA" | "JAN" => 1,
        "SUB" | "FEB" => 2,
        "MAR" => 3,
        "NIS" | "APR" => 4,
        "MAY" => 5,
        "HAZ" | "JUN" => 6,
        "TEM" | "JUL" => 7,
        "AGU" | "AUG" => 8,
        "EYL" | "SEP" => 9,
        "EKI" | "OCT" => 10,
        "KAS" | "NOV" => 11,
        "ARA" | "DEC" => 12,
        _ => return None,
    };
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
    }

    fn date(text: &str) -> Option<NaiveDate> {
        DateExtractor::new(reference(), 2000)
            .extract(&NormalizedText::new(text))
            .map(|m| m.value)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn turkish_keyword_date() {
        assert_eq!(date("TARİH: 05.09.2025"), Some(ymd(2025, 9, 5)));
        assert_eq!(date("TARIH: 05/09/2025 SAAT: 14:30"), Some(ymd(2025, 9, 5)));
        assert_eq!(date("TARİHİ: 05-09-2025"), Some(ymd(2025, 9, 5)));
    }

    #[test]
    fn english_keyword_date_reads_mdy_first() {
        assert_eq!(date("DATE: 08/25/2025"), Some(ymd(2025, 8, 25)));
        // Day > 12 forces the DMY reading.
        assert_eq!(date("DATE: 25/08/2025"), Some(ymd(2025, 8, 25)));
    }

    #[test]
    fn month_name_turkish_and_english() {
        assert_eq!(date("05 EYL 2025"), Some(ymd(2025, 9, 5)));
        assert_eq!(date("15 OCAK 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(date("15 ŞUBAT 2024"), Some(ymd(2024, 2, 15)));
        assert_eq!(date("JAN 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(date("AUG 5 2025"), Some(ymd(2025, 8, 5)));
    }

    #[test]
    fn bare_numeric_date() {
        assert_eq!(date("05.09.2025"), Some(ymd(2025, 9, 5)));
        assert_eq!(date("FİŞ 05.09.2025 14:30"), Some(ymd(2025, 9, 5)));
    }

    #[test]
    fn bare_iso_date() {
        assert_eq!(date("2025-09-05"), Some(ymd(2025, 9, 5)));
    }

    #[test]
    fn two_digit_year_pivots() {
        assert_eq!(date("TARİH: 05.09.25"), Some(ymd(2025, 9, 5)));
        assert_eq!(pivot_year(99), 1999);
        assert_eq!(pivot_year(49), 2049);
    }

    #[test]
    fn future_dates_are_rejected() {
        // Reference is 2025-09-20; a date next year cannot be a purchase.
        assert_eq!(date("TARİH: 05.09.2026"), None);
        // One day ahead is tolerated.
        assert_eq!(date("TARİH: 21.09.2025"), Some(ymd(2025, 9, 21)));
    }

    #[test]
    fn ancient_dates_are_rejected() {
        assert_eq!(date("TARİH: 05.09.1998"), None);
    }

    #[test]
    fn invalid_calendar_date_falls_through() {
        assert_eq!(date("TARİH: 32.13.2025"), None);
        assert_eq!(date("31.02.2025"), None);
        assert_eq!(date(""), None);
    }
}
