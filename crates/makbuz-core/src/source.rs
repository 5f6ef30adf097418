//! The consumed OCR capability behind a single interface.
//!
//! The extraction pipeline is exercised identically regardless of which OCR
//! engine supplied the text; providers plug in by implementing [`TextSource`].

use std::path::Path;

use crate::error::SourceError;

/// Capability interface for obtaining raw text from a receipt image or
/// document.
///
/// Implementations may return an empty string when the engine runs but finds
/// no text; the pipeline treats empty input as a valid, low-information
/// receipt rather than an error.
pub trait TextSource {
    /// Extract raw text from the file at `input`.
    fn extract_text(&self, input: &Path) -> Result<String, SourceError>;
}

/// Text source that reads an already-OCR'd plain text file.
///
/// Useful for tests and for callers that run OCR out of process.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PlainTextSource {
    fn extract_text(&self, input: &Path) -> Result<String, SourceError> {
        let bytes = std::fs::read(input)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        std::fs::write(&path, "TOPLAM: 10,00 TL").unwrap();

        let text = PlainTextSource::new().extract_text(&path).unwrap();
        assert_eq!(text, "TOPLAM: 10,00 TL");
    }

    #[test]
    fn plain_text_source_missing_file_is_io_error() {
        let err = PlainTextSource::new()
            .extract_text(Path::new("/nonexistent/receipt.txt"))
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }
}
