//! The extraction pipeline.
//!
//! Runs normalization and every field extractor over raw OCR text, then
//! scores the result. The pipeline is total: any input yields an
//! [`ExtractionResult`], with the confidence score carrying the quality
//! signal instead of an error path.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use super::ReceiptExtractor;
use super::rules::{
    AmountExtractor, DateExtractor, FieldExtractor, LineItemExtractor, VendorExtractor,
    classify_category,
};
use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::receipt::ExtractionResult;
use crate::normalize::NormalizedText;
use crate::source::TextSource;

/// Rule-based receipt parser.
///
/// ```
/// use makbuz_core::ReceiptParser;
///
/// let parser = ReceiptParser::new();
/// let result = parser.extract("ÖZGÜR MARKET\nTOPLAM: 97,15 TL");
/// assert_eq!(result.vendor.as_deref(), Some("Özgür Market"));
/// ```
pub struct ReceiptParser {
    config: ExtractionConfig,
    reference_date: NaiveDate,
}

impl ReceiptParser {
    /// Parser with default configuration, referenced to today's date.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            reference_date: Local::now().date_naive(),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the date-plausibility reference. Tests and batch reprocessing of
    /// old receipts need a date other than today.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference_date = reference;
        self
    }

    /// Run OCR via `source` on the file at `input`, then extract.
    pub fn extract_from_source(
        &self,
        source: &dyn TextSource,
        input: &Path,
    ) -> Result<ExtractionResult> {
        let text = source.extract_text(input)?;
        Ok(self.extract(&text))
    }

    fn score(&self, result: &ExtractionResult) -> f32 {
        let mut confidence = 0.0_f32;

        if let Some(vendor) = &result.vendor {
            confidence += 0.3;
            let len = vendor.chars().count();
            if len > 3 && len < 30 {
                confidence += 0.1;
            }
        }

        if let Some(amount) = result.total_amount {
            confidence += 0.4;
            if amount >= self.config.plausible_total_min
                && amount <= self.config.plausible_total_max
            {
                confidence += 0.1;
            }
        }

        if let Some(date) = result.purchase_date {
            confidence += 0.2;
            let age = (self.reference_date - date).num_days().abs();
            if age <= self.config.recent_days {
                confidence += 0.1;
            }
        }

        confidence.min(1.0)
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptParser {
    /// Extract all fields from raw OCR text. Total over any input.
    pub fn extract(&self, raw_text: &str) -> ExtractionResult {
        let text = NormalizedText::new(raw_text);
        if text.is_empty() {
            debug!("no usable lines in input");
            return ExtractionResult::empty(raw_text);
        }

        let vendor = VendorExtractor::new(self.config.clone())
            .extract(&text)
            .map(|m| m.value);

        let amounts = AmountExtractor::new(self.config.clone()).extract_total(&text);

        let purchase_date = DateExtractor::new(self.reference_date, self.config.min_year)
            .extract(&text)
            .map(|m| m.value);

        let items = LineItemExtractor::new(self.config.clone()).extract(&text);
        let category = classify_category(&text);

        let mut result = ExtractionResult {
            vendor,
            total_amount: amounts.amount,
            currency: amounts.currency,
            purchase_date,
            items,
            category,
            confidence: 0.0,
            raw_text: raw_text.to_string(),
        };
        result.confidence = self.score(&result);

        info!(
            vendor = result.vendor.as_deref().unwrap_or("-"),
            total = %result.total_amount.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
            items = result.items.len(),
            confidence = result.confidence,
            "receipt extracted"
        );
        result
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract(&self, raw_text: &str) -> ExtractionResult {
        ReceiptParser::extract(self, raw_text)
    }
}
