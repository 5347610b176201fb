//! Stage trait definitions for the pipeline.
//!
//! Each trait represents one processing stage boundary. Stages are pure:
//! they borrow the previous artifact and return a new one. Implementations
//! are statically dispatched; the built-in ones are the crate's NLP
//! components themselves.

use crate::nlp::cleaner::TextCleaner;
use crate::nlp::stemmer::SnowballStemmer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{count_characters, split_sentences};
use crate::pipeline::artifacts::{
    CleanedText, FilteredText, ScoredSentence, ScoredSentences, Sentences, StemmedText,
};
use crate::sentiment::VaderAnalyzer;

// ============================================================================
// SentenceSplitter — raw text to sentences (stage 1)
// ============================================================================

/// Splits raw article text into sentences.
///
/// # Contract
///
/// - Empty or whitespace-only input yields no sentences.
/// - Sentences are trimmed and in document order.
pub trait SentenceSplitter {
    fn split(&self, text: &str) -> Sentences;
}

/// UAX #29 sentence splitter — the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split(&self, text: &str) -> Sentences {
        Sentences::new(split_sentences(text), count_characters(text))
    }
}

// ============================================================================
// Cleaner — sentences to cleaned sentences (stage 2)
// ============================================================================

/// Removes unwanted characters from each sentence.
///
/// # Contract
///
/// - **Idempotent**: cleaning cleaned sentences changes nothing.
/// - Sentences that become empty are dropped.
pub trait Cleaner {
    fn clean(&self, sentences: &Sentences) -> CleanedText;
}

impl Cleaner for TextCleaner {
    fn clean(&self, sentences: &Sentences) -> CleanedText {
        CleanedText::new(self.clean_all(sentences.as_slice()))
    }
}

// ============================================================================
// StopwordRemover — cleaned sentences to words (stage 3)
// ============================================================================

/// Lowercases, splits into words and drops stopwords.
///
/// # Contract
///
/// - **Idempotent**, and the word count never grows.
/// - Word grouping by sentence is preserved (a sentence may end up empty).
pub trait StopwordRemover {
    fn remove(&self, cleaned: &CleanedText) -> FilteredText;
}

impl StopwordRemover for StopwordFilter {
    fn remove(&self, cleaned: &CleanedText) -> FilteredText {
        FilteredText::new(
            cleaned
                .as_slice()
                .iter()
                .map(|sentence| self.filter_words(sentence))
                .collect(),
        )
    }
}

// ============================================================================
// WordStemmer — words to stems (stage 4)
// ============================================================================

/// Reduces each word to its stem, per sentence and per word.
///
/// # Contract
///
/// - Deterministic; one stem per input word, order preserved.
pub trait WordStemmer {
    fn stem(&self, filtered: &FilteredText) -> StemmedText;
}

impl WordStemmer for SnowballStemmer {
    fn stem(&self, filtered: &FilteredText) -> StemmedText {
        StemmedText::new(
            filtered
                .sentences()
                .iter()
                .map(|words| self.stem_words(words))
                .collect(),
        )
    }
}

// ============================================================================
// SentimentScorer — sentences to polarity (side stage)
// ============================================================================

/// Scores the polarity of every tokenized sentence.
///
/// Read-only with respect to the rest of the pipeline.
pub trait SentimentScorer {
    fn score(&self, sentences: &Sentences) -> ScoredSentences;
}

impl SentimentScorer for VaderAnalyzer {
    fn score(&self, sentences: &Sentences) -> ScoredSentences {
        ScoredSentences::new(
            sentences
                .iter()
                .map(|text| ScoredSentence {
                    text: text.to_string(),
                    scores: self.polarity_scores(text),
                })
                .collect(),
        )
    }
}

/// Scorer that produces no scores; for pipelines that never need sentiment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSentimentScorer;

impl SentimentScorer for NoopSentimentScorer {
    fn score(&self, _sentences: &Sentences) -> ScoredSentences {
        ScoredSentences::default()
    }
}
