// ABOUTME: ExtractResult struct holding the text extracted from a URL, HTML snapshot or PDF.
// ABOUTME: Serializable so the binaries can emit JSON alongside the raw text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extractors::ExtractorKind;

/// The successful outcome of an extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResult {
    /// URL or file path the text came from.
    pub source: String,
    pub extractor: ExtractorKind,
    pub text: String,
    pub word_count: usize,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractResult {
    pub fn new(source: impl Into<String>, extractor: ExtractorKind, text: String) -> Self {
        Self {
            source: source.into(),
            extractor,
            word_count: word_count(&text),
            text,
            extracted_at: Utc::now(),
        }
    }

    /// Returns true when the region was found but held no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// First `max_chars` characters of the text, for previews.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}

/// Count words in a text string using whitespace splitting.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_counts_words() {
        let r = ExtractResult::new(
            "https://example.com",
            ExtractorKind::Generic,
            "one two\nthree".to_string(),
        );
        assert_eq!(r.word_count, 3);
        assert!(!r.is_empty());
    }

    #[test]
    fn whitespace_only_is_empty() {
        let r = ExtractResult::new("x", ExtractorKind::Pdf, " \n ".to_string());
        assert!(r.is_empty());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let r = ExtractResult::new("x", ExtractorKind::Generic, "취약점 분석".to_string());
        assert_eq!(r.preview(3), "취약점");
        assert_eq!(r.preview(100), "취약점 분석");
    }

    #[test]
    fn serializes_extractor_kind_snake_case() {
        let r = ExtractResult::new("x", ExtractorKind::Structured, "t".to_string());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["extractor"], "structured");
        assert_eq!(json["word_count"], 1);
    }
}
