//! Sentence-level sentiment scoring

mod analyzer;

pub use analyzer::{Polarity, PolarityScores, VaderAnalyzer, POLARITY_THRESHOLD};
