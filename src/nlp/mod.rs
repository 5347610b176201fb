//! Natural Language Processing components
//!
//! This module provides sentence splitting, cleaning, stopword filtering,
//! stemming and readability statistics.

pub mod cleaner;
pub mod readability;
pub mod stemmer;
pub mod stopwords;
pub mod tokenizer;
