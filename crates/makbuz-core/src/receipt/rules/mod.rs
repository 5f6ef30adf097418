//! Rule-based field extractors for Turkish/English receipts.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod items;
pub mod patterns;
pub mod vendor;

pub use amounts::{AmountExtractor, AmountOutcome, RuleFamily, parse_receipt_amount};
pub use category::classify_category;
pub use dates::DateExtractor;
pub use items::LineItemExtractor;
pub use vendor::VendorExtractor;

use crate::normalize::NormalizedText;

/// Language/format convention a pattern is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Turkish,
    English,
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from normalized receipt text.
    fn extract(&self, text: &NormalizedText) -> Option<Self::Output>;
}

/// A matched field value with provenance.
#[derive(Debug, Clone)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Per-match confidence (0.0 - 1.0), independent of the overall score.
    pub confidence: f32,
    /// Zero-based line the match came from, when line-scoped.
    pub line: Option<usize>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            line: None,
            source: source.into(),
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}
