//! Stopword filtering
//!
//! This module provides stopword removal backed by the NLTK lists shipped
//! with the `stop-words` crate, with caller-supplied additions and
//! exemptions.

use std::collections::HashMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};

use crate::errors::{Result, TextPrepError};

/// Stopword list selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    /// Language code or name (`"en"`, `"english"`, `"de"`, ...)
    pub language: String,
    /// Extra words treated as stopwords
    pub extra: Vec<String>,
    /// Words never treated as stopwords, even if the list contains them
    pub keep: Vec<String>,
    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            extra: Vec::new(),
            keep: Vec::new(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// A filter for removing stopwords from text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The fixed English list used by the default pipeline
    pub fn english() -> Self {
        Self {
            stopwords: Self::load_stopwords(LANGUAGE::English),
        }
    }

    /// Create a stopword filter for the given language
    ///
    /// Supported languages: en, de, fr, es, it, pt, nl, ru, sv, no, da, fi,
    /// hu, tr, ar
    pub fn new(language: &str) -> Result<Self> {
        let lang = language_from_code(language).ok_or_else(|| {
            TextPrepError::configuration(format!("unsupported stopword language {language:?}"))
        })?;
        Ok(Self {
            stopwords: Self::load_stopwords(lang),
        })
    }

    /// Build a filter from a [`StopwordConfig`]
    pub fn from_config(config: &StopwordConfig) -> Result<Self> {
        let mut filter = Self::new(&config.language)?;
        filter.add_stopwords(&config.extra);
        filter.remove_stopwords(&config.keep);
        Ok(filter)
    }

    /// Create a stopword filter from a custom list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let stopwords = words.iter().map(|w| w.as_ref().to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.remove(&word.as_ref().to_lowercase());
        }
    }

    /// Check if a word is a stopword (case-insensitive)
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Lowercase `text`, split it on whitespace and drop every stopword.
    pub fn filter_words(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|w| !self.stopwords.contains(*w))
            .map(str::to_string)
            .collect()
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(lang: LANGUAGE) -> FxHashSet<String> {
        get(lang).iter().map(|s| s.to_lowercase()).collect()
    }
}

/// `true` if `language` names a stopword list this crate can load
pub fn is_supported_language(language: &str) -> bool {
    language_from_code(language).is_some()
}

fn language_from_code(language: &str) -> Option<LANGUAGE> {
    let lang = match language.to_lowercase().as_str() {
        "en" | "english" => LANGUAGE::English,
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        "ru" | "russian" => LANGUAGE::Russian,
        "sv" | "swedish" => LANGUAGE::Swedish,
        "no" | "norwegian" => LANGUAGE::Norwegian,
        "da" | "danish" => LANGUAGE::Danish,
        "fi" | "finnish" => LANGUAGE::Finnish,
        "hu" | "hungarian" => LANGUAGE::Hungarian,
        "tr" | "turkish" => LANGUAGE::Turkish,
        "ar" | "arabic" => LANGUAGE::Arabic,
        _ => return None,
    };
    Some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::english();

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The")); // case insensitive
        assert!(filter.is_stopword("is"));
        assert!(filter.is_stopword("a"));
        assert!(!filter.is_stopword("flowers"));
        assert!(!filter.is_stopword("beautiful"));
    }

    #[test]
    fn test_filter_words_lowercases_and_drops() {
        let filter = StopwordFilter::english();
        assert_eq!(
            filter.filter_words("The dog climbed up the BENCH"),
            vec!["dog", "climbed", "bench"]
        );
    }

    #[test]
    fn test_english_list_keeps_content_words() {
        let filter = StopwordFilter::english();
        assert!(filter.len() < 200);
        assert_eq!(
            filter.filter_words("Today was my second day at work around the world"),
            vec!["today", "second", "day", "work", "around", "world"]
        );
        for word in ["new", "said", "three", "last", "states", "million"] {
            assert!(!filter.is_stopword(word), "{word} should survive");
        }
    }

    #[test]
    fn test_polish_has_no_list() {
        assert!(!is_supported_language("pl"));
        assert!(StopwordFilter::new("polish").is_err());
    }

    #[test]
    fn test_filter_is_idempotent_and_never_grows() {
        let filter = StopwordFilter::english();
        let text = "Those chemicals are used in computer chips manufacturing and it is a key part of the economy";
        let once = filter.filter_words(text);
        let twice = filter.filter_words(&once.join(" "));
        assert_eq!(once, twice);
        assert!(once.len() <= text.split_whitespace().count());
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["custom", "words"]);

        assert!(filter.is_stopword("custom"));
        assert!(filter.is_stopword("words"));
        assert!(!filter.is_stopword("the"));

        filter.add_stopwords(&["extra"]);
        assert!(filter.is_stopword("extra"));

        filter.remove_stopwords(&["custom"]);
        assert!(!filter.is_stopword("custom"));
    }

    #[test]
    fn test_from_config_extra_and_keep() {
        let filter = StopwordFilter::from_config(&StopwordConfig {
            language: "english".into(),
            extra: vec!["Korea".into()],
            keep: vec!["not".into()],
            ..Default::default()
        })
        .unwrap();
        assert!(filter.is_stopword("korea"));
        assert!(!filter.is_stopword("not"));
        assert!(filter.is_stopword("the"));
    }

    #[test]
    fn test_empty_list_keeps_everything() {
        let filter = StopwordFilter::from_list::<&str>(&[]);
        assert!(filter.is_empty());
        assert_eq!(filter.filter_words("the a an"), vec!["the", "a", "an"]);
    }

    #[test]
    fn test_german_stopwords() {
        let filter = StopwordFilter::new("de").unwrap();

        assert!(filter.is_stopword("der"));
        assert!(filter.is_stopword("die"));
        assert!(filter.is_stopword("und"));
        assert!(!filter.is_stopword("machine"));
    }

    #[test]
    fn test_unsupported_language() {
        assert!(StopwordFilter::new("klingon").is_err());
        assert!(!is_supported_language("klingon"));
        assert!(is_supported_language("EN"));
    }
}
