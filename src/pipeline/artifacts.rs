//! First-class pipeline artifacts.
//!
//! Each type is the typed output of one stage and the input of the next:
//! [`Sentences`] → [`CleanedText`] → [`FilteredText`] → [`StemmedText`],
//! with [`ScoredSentences`] computed from [`Sentences`] on the side. Stages
//! never mutate an artifact they receive; they return a new one.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::nlp::readability::TextStatistics;
use crate::sentiment::PolarityScores;
use crate::types::{Counts, StageStatus};

/// Delimiter used when cleaned sentences are rejoined into one string.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Sentences produced by the tokenizer stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentences {
    sentences: Vec<String>,
    /// Alphanumeric characters in the text the sentences came from
    characters: usize,
}

impl Sentences {
    pub fn new(sentences: Vec<String>, characters: usize) -> Self {
        Self {
            sentences,
            characters,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.sentences
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn characters(&self) -> usize {
        self.characters
    }
}

/// Cleaned sentences produced by the cleaner stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedText {
    sentences: Vec<String>,
}

impl CleanedText {
    pub fn new(sentences: Vec<String>) -> Self {
        Self { sentences }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The cleaned sentences rejoined with [`SENTENCE_DELIMITER`].
    pub fn as_text(&self) -> String {
        self.sentences.join(SENTENCE_DELIMITER)
    }
}

/// Words left after stopword removal, grouped by sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredText {
    sentences: Vec<Vec<String>>,
}

impl FilteredText {
    pub fn new(sentences: Vec<Vec<String>>) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().flatten().map(String::as_str)
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// All words joined by single spaces.
    pub fn as_text(&self) -> String {
        join_words(&self.sentences)
    }
}

/// Stems produced by the stemmer stage, grouped by sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemmedText {
    sentences: Vec<Vec<String>>,
}

impl StemmedText {
    pub fn new(sentences: Vec<Vec<String>>) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &[Vec<String>] {
        &self.sentences
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// All stems joined by single spaces.
    pub fn as_text(&self) -> String {
        join_words(&self.sentences)
    }
}

fn join_words(sentences: &[Vec<String>]) -> String {
    sentences
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One sentence and its polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub text: String,
    pub scores: PolarityScores,
}

/// Per-sentence sentiment, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentences {
    sentences: Vec<ScoredSentence>,
}

impl ScoredSentences {
    pub fn new(sentences: Vec<ScoredSentence>) -> Self {
        Self { sentences }
    }

    pub fn as_slice(&self) -> &[ScoredSentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentence text → formatted score components.
    ///
    /// Repeated sentences collapse into one entry.
    pub fn formatted(&self) -> FxHashMap<String, Vec<String>> {
        self.sentences
            .iter()
            .map(|s| (s.text.clone(), s.scores.components()))
            .collect()
    }

    /// Mean compound score, or `None` for no sentences.
    pub fn mean_compound(&self) -> Option<f64> {
        if self.sentences.is_empty() {
            return None;
        }
        let total: f64 = self.sentences.iter().map(|s| s.scores.compound).sum();
        Some(total / self.sentences.len() as f64)
    }
}

/// Everything one pipeline run produced for an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedContent {
    pub source: Option<String>,
    pub sentences: Sentences,
    pub cleaned: CleanedText,
    pub filtered: FilteredText,
    pub stemmed: StemmedText,
    pub sentiment: Option<ScoredSentences>,
    pub counts: Counts,
    pub status: StageStatus,
    pub statistics: TextStatistics,
    /// Automated Readability Index of the original text
    pub readability_index: Option<f64>,
}

impl ProcessedContent {
    /// Text handed to the word cloud: the final stems joined by spaces.
    pub fn final_text(&self) -> String {
        self.stemmed.as_text()
    }
}
