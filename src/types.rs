//! Core input and bookkeeping types.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One article's text and where it came from.
///
/// The text is immutable once constructed; processing produces a separate
/// [`ProcessedContent`](crate::pipeline::artifacts::ProcessedContent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    content: String,
    source: Option<String>,
}

impl Content {
    /// Wrap article text with no known source.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: None,
        }
    }

    /// Wrap article text fetched from `source` (usually a URL).
    ///
    /// The source is carried as an opaque identifier and never validated.
    pub fn with_source(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: Some(source.into()),
        }
    }

    /// Decode raw bytes as UTF-8 article text.
    ///
    /// Returns [`TextPrepError::Encoding`](crate::TextPrepError::Encoding)
    /// for anything that is not valid UTF-8.
    pub fn from_bytes(bytes: Vec<u8>, source: Option<String>) -> Result<Self> {
        let content = String::from_utf8(bytes)?;
        Ok(Self { content, source })
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// `true` if the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Sentence, word and character counts gathered while processing.
///
/// `sentences` and `characters` are set by the tokenizer; `words` is the
/// number of words left after stopword removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub sentences: usize,
    pub words: usize,
    pub characters: usize,
}

/// Which stages ran for a given article. Diagnostic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatus {
    pub tokenized: bool,
    pub cleaned_content: bool,
    pub stopwords_removed: bool,
    pub stemmed: bool,
    pub sentiment_analyzed: bool,
}

impl StageStatus {
    /// Stage names paired with whether they ran, in pipeline order.
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("tokenized", self.tokenized),
            ("cleaned_content", self.cleaned_content),
            ("stopwords_removed", self.stopwords_removed),
            ("stemmed", self.stemmed),
            ("sentiment_analyzed", self.sentiment_analyzed),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TextPrepError;

    #[test]
    fn test_content_accessors() {
        let c = Content::with_source("Hello there.", "https://example.com/a");
        assert_eq!(c.text(), "Hello there.");
        assert_eq!(c.source(), Some("https://example.com/a"));
        assert!(!c.is_blank());
        assert!(Content::new("  \n\t").is_blank());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_utf8() {
        let err = Content::from_bytes(vec![b'a', 0xc3, 0x28], None).unwrap_err();
        assert!(matches!(err, TextPrepError::Encoding(_)));
    }

    #[test]
    fn test_from_bytes_accepts_utf8() {
        let c = Content::from_bytes("Café au lait.".as_bytes().to_vec(), None).unwrap();
        assert_eq!(c.text(), "Café au lait.");
        assert_eq!(c.source(), None);
    }

    #[test]
    fn test_stage_status_entries_in_order() {
        let status = StageStatus {
            tokenized: true,
            stemmed: true,
            ..Default::default()
        };
        let names: Vec<_> = status.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "tokenized",
                "cleaned_content",
                "stopwords_removed",
                "stemmed",
                "sentiment_analyzed"
            ]
        );
        assert_eq!(status.entries()[3], ("stemmed", true));
        assert_eq!(status.entries()[1], ("cleaned_content", false));
    }
}
