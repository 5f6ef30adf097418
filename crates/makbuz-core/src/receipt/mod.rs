//! Receipt field extraction.
//!
//! [`ReceiptParser`] runs the full pipeline; the individual field extractors
//! live in [`rules`].

pub mod parser;
pub mod rules;

pub use parser::ReceiptParser;

use crate::models::receipt::ExtractionResult;

/// Full-pipeline extraction over raw OCR text.
///
/// Implementations are total: any input, including empty or garbage text,
/// yields a result with a confidence score rather than an error.
pub trait ReceiptExtractor {
    fn extract(&self, raw_text: &str) -> ExtractionResult;
}
