//! Core library for receipt field extraction.
//!
//! This crate provides:
//! - Normalization of noisy OCR text (Turkish letter folding, line cleanup)
//! - Rule-based field extraction (vendor, total amount, date, line items)
//! - A prioritized amount cascade with conflict resolution between
//!   same-receipt candidates
//! - Calibrated confidence scoring over the populated fields
//!
//! The pipeline is total: any string input, including empty or garbage text,
//! produces an [`ExtractionResult`] rather than an error.

pub mod error;
pub mod models;
pub mod normalize;
pub mod receipt;
pub mod source;

pub use error::{MakbuzError, Result, SourceError};
pub use models::config::ExtractionConfig;
pub use models::receipt::{Category, Currency, ExtractionResult, LineItem};
pub use normalize::NormalizedText;
pub use receipt::{ReceiptExtractor, ReceiptParser};
pub use source::{PlainTextSource, TextSource};
