//! Sentence cleaning
//!
//! Strips punctuation, digit runs and an optional caller-supplied pattern
//! from each sentence, then normalizes whitespace.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TextPrepError};

/// Runs of Unicode decimal digits (`Nd`).
static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Switches controlling what [`TextCleaner`] removes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Remove every character that is neither a word character nor whitespace
    pub punctuation: bool,
    /// Remove runs of decimal digits
    pub digits: bool,
    /// Additional regex whose matches are removed
    pub custom_pattern: Option<String>,
    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            punctuation: true,
            digits: true,
            custom_pattern: None,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Compiled cleaner. Build once, reuse for every article.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    punctuation: bool,
    digits: bool,
    custom: Option<Regex>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self {
            punctuation: true,
            digits: true,
            custom: None,
        }
    }
}

impl TextCleaner {
    /// Build a cleaner from `config`.
    ///
    /// Fails with [`TextPrepError::InvalidPattern`] if the custom pattern
    /// does not compile.
    pub fn new(config: &CleanerConfig) -> Result<Self> {
        let custom = match config.custom_pattern.as_deref() {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| {
                TextPrepError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }
            })?),
            None => None,
        };
        Ok(Self {
            punctuation: config.punctuation,
            digits: config.digits,
            custom,
        })
    }

    /// Clean a single sentence.
    ///
    /// The custom pattern is applied first so it can match text containing
    /// punctuation or digits (URLs, bylines) before those are stripped.
    pub fn clean_sentence(&self, sentence: &str) -> String {
        let mut text = match &self.custom {
            Some(re) => re.replace_all(sentence, "").into_owned(),
            None => sentence.to_string(),
        };
        if self.digits {
            text = DIGIT_RUNS.replace_all(&text, "").into_owned();
        }
        let kept: String = text
            .chars()
            .filter(|&c| !(self.punctuation && is_punctuation(c)))
            .collect();
        kept.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Clean every sentence, dropping the ones left empty.
    pub fn clean_all<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<String> {
        sentences
            .iter()
            .map(|s| self.clean_sentence(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Anything that is neither a word character nor whitespace.
fn is_punctuation(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner(punctuation: bool, digits: bool, custom: Option<&str>) -> TextCleaner {
        TextCleaner::new(&CleanerConfig {
            punctuation,
            digits,
            custom_pattern: custom.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_strips_punctuation_and_digits() {
        let c = TextCleaner::default();
        assert_eq!(
            c.clean_sentence("  In 2019, Japan's exports fell -- sharply!  "),
            "In Japans exports fell sharply"
        );
    }

    #[test]
    fn test_punctuation_only() {
        let c = cleaner(true, false, None);
        assert_eq!(c.clean_sentence("Up to 90 days."), "Up to 90 days");
    }

    #[test]
    fn test_digits_only() {
        let c = cleaner(false, true, None);
        assert_eq!(c.clean_sentence("Up to 90 days."), "Up to days.");
    }

    #[test]
    fn test_digits_keeps_non_decimal_numerals() {
        let c = cleaner(false, true, None);
        assert_eq!(
            c.clean_sentence("Add ½ cup, x² and Chapter Ⅻ in 90 days."),
            "Add ½ cup, x² and Chapter Ⅻ in days."
        );
        // Arabic-Indic digits are decimal digits too.
        assert_eq!(c.clean_sentence("page ٣٤ ends"), "page ends");
    }

    #[test]
    fn test_nothing_enabled_only_trims() {
        let c = cleaner(false, false, None);
        assert_eq!(c.clean_sentence("  Up to 90   days. "), "Up to 90 days.");
    }

    #[test]
    fn test_custom_pattern_runs_before_punctuation() {
        let c = cleaner(true, true, Some(r"https?://\S+"));
        assert_eq!(
            c.clean_sentence("Read more at https://example.com/story?id=3 today."),
            "Read more at today"
        );
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let err = TextCleaner::new(&CleanerConfig {
            custom_pattern: Some("(unclosed".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, TextPrepError::InvalidPattern { .. }));
    }

    #[test]
    fn test_punctuation_removal_leaves_only_word_and_space() {
        let c = TextCleaner::default();
        let out = c.clean_sentence("\"Quoted\" (aside); semi-colon: done? yes! #tag @user");
        assert!(out.chars().all(|ch| ch.is_alphanumeric() || ch == '_' || ch == ' '));
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let c = TextCleaner::default();
        let input = vec![
            "Seoul, South Korea (CNN) South Korea is scrapping its agreement.",
            "We are all stronger -- and northeast Asia is safer -- he said.",
            "It can take up to 90 days.",
        ];
        let once = c.clean_all(&input);
        let twice = c.clean_all(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_all_drops_empty_sentences() {
        let c = TextCleaner::default();
        assert_eq!(c.clean_all(&["123.", "Real words."]), vec!["Real words"]);
    }
}
