//! Configuration for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MakbuzError, Result};

/// Tunable bounds for the extraction heuristics.
///
/// Defaults reproduce the behavior observed on Turkish point-of-sale and US
/// retail receipts; callers rarely need to change them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// How many leading lines to scan for a vendor candidate.
    pub vendor_scan_lines: usize,

    /// Minimum vendor name length (characters).
    pub vendor_min_len: usize,

    /// Maximum vendor name length (characters).
    pub vendor_max_len: usize,

    /// Minimum uppercase ratio for a layout-based vendor candidate.
    pub vendor_uppercase_ratio: f32,

    /// How many lines below a bare total keyword to inspect for the amount.
    pub nearby_line_window: usize,

    /// Ceiling for a plausible single item price; rows above it are treated
    /// as OCR noise.
    pub max_item_price: Decimal,

    /// Lower bound of the plausible-total band used for the confidence bonus.
    pub plausible_total_min: Decimal,

    /// Upper bound of the plausible-total band used for the confidence bonus.
    pub plausible_total_max: Decimal,

    /// Earliest acceptable purchase year.
    pub min_year: i32,

    /// A purchase date within this many days of the reference date earns the
    /// recency confidence bonus.
    pub recent_days: i64,
}

impl ExtractionConfig {
    /// Check the bounds are internally consistent. Useful before accepting a
    /// deserialized config from an external caller.
    pub fn validate(&self) -> Result<()> {
        if self.vendor_scan_lines == 0 {
            return Err(MakbuzError::Config(
                "vendor_scan_lines must be at least 1".into(),
            ));
        }
        if self.vendor_min_len > self.vendor_max_len {
            return Err(MakbuzError::Config(format!(
                "vendor length band is inverted: {} > {}",
                self.vendor_min_len, self.vendor_max_len
            )));
        }
        if self.plausible_total_min > self.plausible_total_max {
            return Err(MakbuzError::Config(format!(
                "plausible total band is inverted: {} > {}",
                self.plausible_total_min, self.plausible_total_max
            )));
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_scan_lines: 10,
            vendor_min_len: 3,
            vendor_max_len: 50,
            vendor_uppercase_ratio: 0.6,
            nearby_line_window: 3,
            max_item_price: Decimal::from(10_000),
            plausible_total_min: Decimal::new(1, 2),
            plausible_total_max: Decimal::from(10_000),
            min_year: 2000,
            recent_days: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn defaults_are_sane() {
        let c = ExtractionConfig::default();
        assert_eq!(c.vendor_scan_lines, 10);
        assert_eq!(c.nearby_line_window, 3);
        assert_eq!(c.plausible_total_min, Decimal::from_str("0.01").unwrap());
        assert!(c.plausible_total_min < c.plausible_total_max);
        assert_eq!(c.min_year, 2000);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c: ExtractionConfig = serde_json::from_str(r#"{"vendor_scan_lines": 5}"#).unwrap();
        assert_eq!(c.vendor_scan_lines, 5);
        assert_eq!(c.recent_days, 30);
    }

    #[test]
    fn default_config_validates() {
        assert!(ExtractionConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        let c = ExtractionConfig {
            vendor_min_len: 60,
            ..ExtractionConfig::default()
        };
        assert!(matches!(c.validate(), Err(MakbuzError::Config(_))));

        let c = ExtractionConfig {
            vendor_scan_lines: 0,
            ..ExtractionConfig::default()
        };
        assert!(matches!(c.validate(), Err(MakbuzError::Config(_))));
    }
}
