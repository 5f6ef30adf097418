//! OCR text normalization.
//!
//! Produces the three views the extractors work on: trimmed lines with the
//! original characters, an uppercased join for pattern matching, and an
//! ASCII-folded copy for keyword matching that survives lost Turkish
//! diacritics. Folding is never used for values returned to the caller.

/// Normalized views over one receipt's raw OCR text.
#[derive(Debug, Clone, Default)]
pub struct NormalizedText {
    /// Trimmed, non-empty lines in receipt order, original characters kept.
    pub lines: Vec<String>,

    /// All lines uppercased and joined with `\n`.
    pub upper_joined: String,

    /// ASCII-folded copy of `upper_joined` (Turkish letters mapped to the
    /// nearest ASCII letter). Keyword matching only.
    pub folded: String,
}

impl NormalizedText {
    /// Normalize raw OCR text. Never fails; empty input yields empty views.
    pub fn new(raw: &str) -> Self {
        let lines: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let upper_joined = lines
            .iter()
            .map(|l| l.to_uppercase())
            .collect::<Vec<_>>()
            .join("\n");

        let folded = fold_turkish(&upper_joined);

        Self {
            lines,
            upper_joined,
            folded,
        }
    }

    /// Uppercased lines, parallel to `lines`.
    pub fn upper_lines(&self) -> Vec<&str> {
        if self.upper_joined.is_empty() {
            Vec::new()
        } else {
            self.upper_joined.split('\n').collect()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Map Turkish-specific letters to their nearest ASCII equivalent.
///
/// Uppercase and lowercase forms are both handled so the helper can be
/// applied to any casing.
pub fn fold_turkish(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'Ç' => 'C',
            'Ğ' => 'G',
            'İ' => 'I',
            'Ö' => 'O',
            'Ş' => 'S',
            'Ü' => 'U',
            'ç' => 'c',
            'ğ' => 'g',
            'ı' => 'i',
            'ö' => 'o',
            'ş' => 's',
            'ü' => 'u',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trims_and_drops_empty_lines() {
        let n = NormalizedText::new("  ÖZGÜR MARKET  \n\n   \nTOPLAM: 10,00 TL\n");
        assert_eq!(n.lines, vec!["ÖZGÜR MARKET", "TOPLAM: 10,00 TL"]);
        assert_eq!(n.upper_lines().len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let n = NormalizedText::new("");
        assert!(n.is_empty());
        assert_eq!(n.upper_joined, "");
        assert_eq!(n.folded, "");
        assert!(n.upper_lines().is_empty());
    }

    #[test]
    fn upper_join_keeps_turkish_letters() {
        let n = NormalizedText::new("Teşekkür ederiz");
        assert_eq!(n.upper_joined, "TEŞEKKÜR EDERIZ");
    }

    #[test]
    fn folding_maps_turkish_to_ascii() {
        assert_eq!(fold_turkish("TEŞEKKÜR"), "TESEKKUR");
        assert_eq!(fold_turkish("ağustos böceği"), "agustos bocegi");
        assert_eq!(fold_turkish("TARİH"), "TARIH");
    }

    #[test]
    fn original_lines_are_not_folded() {
        let n = NormalizedText::new("ŞEKERCİOĞLU ECZANE");
        assert_eq!(n.lines[0], "ŞEKERCİOĞLU ECZANE");
        assert_eq!(n.folded, "SEKERCIOGLU ECZANE");
    }
}
