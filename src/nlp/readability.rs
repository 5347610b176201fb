//! Readability statistics
//!
//! Syllable counting and the Automated Readability Index (ARI), an
//! approximation of the US grade level needed to read a text.

use serde::{Deserialize, Serialize};

use super::tokenizer::{count_characters, split_sentences, split_words};

const VOWELS: &str = "aeiouy";

/// Heuristic syllable count for an English word.
///
/// Counts vowel groups, subtracts a trailing silent `e`, and never returns
/// less than 1 for a non-empty word. Empty input has 0 syllables.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let chars: Vec<char> = word.chars().collect();
    let Some(&first) = chars.first() else {
        return 0;
    };

    let is_vowel = |c: char| VOWELS.contains(c);
    let mut count: isize = 0;
    if is_vowel(first) {
        count += 1;
    }
    for pair in chars.windows(2) {
        if is_vowel(pair[1]) && !is_vowel(pair[0]) {
            count += 1;
        }
    }
    if word.ends_with('e') {
        count -= 1;
    }
    count.max(1) as usize
}

/// Raw counts a readability formula needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub sentences: usize,
    pub words: usize,
    /// Alphanumeric characters
    pub characters: usize,
    pub syllables: usize,
}

impl TextStatistics {
    /// Gather statistics for unprocessed text.
    pub fn from_text(text: &str) -> Self {
        let words = split_words(text);
        Self {
            sentences: split_sentences(text).len(),
            words: words.len(),
            characters: count_characters(text),
            syllables: words.iter().map(|w| count_syllables(w)).sum(),
        }
    }

    /// Automated Readability Index:
    /// `4.71 * (characters / words) + 0.5 * (words / sentences) - 21.43`.
    ///
    /// `None` when there are no words or no sentences.
    pub fn automated_readability_index(&self) -> Option<f64> {
        if self.words == 0 || self.sentences == 0 {
            return None;
        }
        let chars = self.characters as f64;
        let words = self.words as f64;
        let sentences = self.sentences as f64;
        Some(4.71 * (chars / words) + 0.5 * (words / sentences) - 21.43)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("word"), 1);
        assert_eq!(count_syllables("syllable"), 2);
        assert_eq!(count_syllables("beautiful"), 3);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("Agreement"), 3);
        assert_eq!(count_syllables("rhythm"), 1);
    }

    #[test]
    fn test_empty_word_has_no_syllables() {
        assert_eq!(count_syllables(""), 0);
    }

    #[test]
    fn test_statistics() {
        let stats = TextStatistics::from_text("I just broke my leg. Flowers are beautiful.");
        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.words, 8);
        assert_eq!(stats.characters, 34);
    }

    #[test]
    fn test_ari_formula() {
        let stats = TextStatistics {
            sentences: 2,
            words: 10,
            characters: 50,
            syllables: 14,
        };
        let expected = 4.71 * 5.0 + 0.5 * 5.0 - 21.43;
        assert_abs_diff_eq!(stats.automated_readability_index().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_ari_undefined_without_words() {
        assert_eq!(TextStatistics::from_text("").automated_readability_index(), None);
    }
}
