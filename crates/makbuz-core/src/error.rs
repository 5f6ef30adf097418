//! Error types for the makbuz-core library.

use thiserror::Error;

/// Main error type for the makbuz library.
///
/// Field extraction itself never fails: a cascade that exhausts all tiers
/// leaves the field absent and the pipeline continues. These variants cover
/// the fallible edges around the engine (obtaining text, configuration).
#[derive(Error, Debug)]
pub enum MakbuzError {
    /// The upstream text source failed to produce text.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the consumed OCR text-extraction capability.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The input file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine ran but could not extract text.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// The input format is not supported by this source.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for the makbuz library.
pub type Result<T> = std::result::Result<T, MakbuzError>;
