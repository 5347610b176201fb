//! Snowball stemming via `rust-stemmers`.

use std::collections::HashMap;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TextPrepError};

/// Stemmer language selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemmerConfig {
    pub language: String,
    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for StemmerConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Reduces words to their Snowball stem for one fixed language.
pub struct SnowballStemmer {
    language: &'static str,
    stemmer: Stemmer,
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self {
            language: "english",
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl SnowballStemmer {
    /// Create a stemmer for `language` (name or two-letter code).
    pub fn new(language: &str) -> Result<Self> {
        let (name, algorithm) = algorithm_for(language).ok_or_else(|| {
            TextPrepError::configuration(format!("unsupported stemmer language {language:?}"))
        })?;
        Ok(Self {
            language: name,
            stemmer: Stemmer::create(algorithm),
        })
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    /// Stem a single word.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    /// Stem every word of a sentence, keeping order.
    ///
    /// Snowball is not idempotent in general: stemming a stem can shorten
    /// it again ("agreed" -> "agre" -> "agr"), so run this once per text.
    pub fn stem_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        words.iter().map(|w| self.stem(w.as_ref())).collect()
    }
}

/// `true` if a Snowball algorithm exists for `language`.
pub fn is_supported_language(language: &str) -> bool {
    algorithm_for(language).is_some()
}

fn algorithm_for(language: &str) -> Option<(&'static str, Algorithm)> {
    let found = match language.to_lowercase().as_str() {
        "en" | "english" => ("english", Algorithm::English),
        "de" | "german" => ("german", Algorithm::German),
        "fr" | "french" => ("french", Algorithm::French),
        "es" | "spanish" => ("spanish", Algorithm::Spanish),
        "it" | "italian" => ("italian", Algorithm::Italian),
        "pt" | "portuguese" => ("portuguese", Algorithm::Portuguese),
        "nl" | "dutch" => ("dutch", Algorithm::Dutch),
        "ru" | "russian" => ("russian", Algorithm::Russian),
        "sv" | "swedish" => ("swedish", Algorithm::Swedish),
        "no" | "norwegian" => ("norwegian", Algorithm::Norwegian),
        "da" | "danish" => ("danish", Algorithm::Danish),
        "fi" | "finnish" => ("finnish", Algorithm::Finnish),
        "hu" | "hungarian" => ("hungarian", Algorithm::Hungarian),
        "ro" | "romanian" => ("romanian", Algorithm::Romanian),
        "tr" | "turkish" => ("turkish", Algorithm::Turkish),
        "ar" | "arabic" => ("arabic", Algorithm::Arabic),
        _ => return None,
    };
    Some(found)
}
