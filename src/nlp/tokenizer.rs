//! Sentence and word segmentation
//!
//! Sentence boundaries follow Unicode Standard Annex #29, which splits after
//! terminal punctuation followed by whitespace and an uppercase letter (or
//! end of input). Abbreviations such as "Lt. Col." are not special-cased.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into trimmed, non-empty sentences in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split `text` into words on Unicode word boundaries, discarding
/// punctuation and whitespace segments.
pub fn split_words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// Number of alphanumeric characters in `text`.
pub fn count_characters(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphanumeric()).count()
}
