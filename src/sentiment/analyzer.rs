//! VADER polarity scoring
//!
//! Wraps the lexicon/rule-based VADER analyzer. The lexicon is parsed once
//! when the analyzer is created and shared by every call.

use std::fmt;

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound score at or above which a sentence counts as positive
/// (and at or below whose negation it counts as negative).
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// Four-way VADER polarity of one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    /// Normalized sum of valences in `[-1, 1]`
    pub compound: f64,
}

impl PolarityScores {
    /// Formatted `name: value` components, sorted by component name.
    ///
    /// Values always carry a decimal point, so zero prints as `0.0`.
    pub fn components(&self) -> Vec<String> {
        vec![
            format!("compound: {:?}", self.compound),
            format!("neg: {:?}", self.neg),
            format!("neu: {:?}", self.neu),
            format!("pos: {:?}", self.pos),
        ]
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_compound(self.compound)
    }
}

/// Coarse label derived from the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Negative,
    Neutral,
    Positive,
}

impl Polarity {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POLARITY_THRESHOLD {
            Polarity::Positive
        } else if compound <= -POLARITY_THRESHOLD {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// Sentence-level VADER analyzer.
pub struct VaderAnalyzer {
    inner: SentimentIntensityAnalyzer<'static>,
}

impl fmt::Debug for VaderAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaderAnalyzer")
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self {
            inner: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score one sentence.
    ///
    /// neg/neu/pos are rounded to 3 decimals and compound to 4.
    pub fn polarity_scores(&self, sentence: &str) -> PolarityScores {
        let raw = self.inner.polarity_scores(sentence);
        let get = |key: &str| raw.get(key).copied().unwrap_or(0.0);
        PolarityScores {
            neg: round_to(get("neg"), 3),
            neu: round_to(get("neu"), 3),
            pos: round_to(get("pos"), 3),
            compound: round_to(get("compound"), 4),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_negative_sentence() {
        let scores = VaderAnalyzer::new().polarity_scores("I just broke my leg.");
        assert_abs_diff_eq!(scores.compound, -0.42, epsilon = 0.01);
        assert_abs_diff_eq!(scores.neg, 0.48, epsilon = 0.01);
        assert_abs_diff_eq!(scores.pos, 0.0, epsilon = 1e-9);
        assert_eq!(scores.polarity(), Polarity::Negative);
    }

    #[test]
    fn test_positive_sentence() {
        let scores = VaderAnalyzer::new().polarity_scores("Flowers are beautiful.");
        assert_abs_diff_eq!(scores.compound, 0.60, epsilon = 0.01);
        assert_abs_diff_eq!(scores.pos, 0.66, epsilon = 0.01);
        assert_abs_diff_eq!(scores.neg, 0.0, epsilon = 1e-9);
        assert_eq!(scores.polarity(), Polarity::Positive);
    }

    #[test]
    fn test_neutral_sentence() {
        let scores = VaderAnalyzer::new().polarity_scores("The dog climbed up the bench today.");
        assert_abs_diff_eq!(scores.compound, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(scores.neu, 1.0, epsilon = 1e-9);
        assert_eq!(scores.polarity(), Polarity::Neutral);
    }

    #[test]
    fn test_components_sorted_by_name() {
        let scores = PolarityScores {
            neg: 0.483,
            neu: 0.517,
            pos: 0.0,
            compound: -0.4215,
        };
        assert_eq!(
            scores.components(),
            vec!["compound: -0.4215", "neg: 0.483", "neu: 0.517", "pos: 0.0"]
        );
    }

    #[test]
    fn test_components_print_whole_values_with_decimal_point() {
        let scores = PolarityScores {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        };
        assert_eq!(
            scores.components(),
            vec!["compound: 0.0", "neg: 0.0", "neu: 1.0", "pos: 0.0"]
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.48312, 3), 0.483);
        assert_eq!(round_to(-0.42149, 4), -0.4215);
    }
}
