//! Pipeline specification types.
//!
//! A [`PipelineSpec`] describes which stages run, how each one is
//! configured, runtime limits, and strictness settings. These types are the
//! input to the [`super::validation::ValidationEngine`] and to
//! [`DefaultPipeline::from_spec`](super::runner::DefaultPipeline::from_spec).
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "stages": { "clean": true, "remove_stopwords": true, "stem": true, "sentiment": true },
//!   "cleaning": { "punctuation": true, "digits": true, "custom_pattern": null },
//!   "stopwords": { "language": "en", "extra": [], "keep": [] },
//!   "stemmer": { "language": "english" },
//!   "word_cloud": { "width": 600, "height": 400 },
//!   "runtime": { "max_chars": 200000 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::nlp::cleaner::CleanerConfig;
use crate::nlp::stemmer::StemmerConfig;
use crate::nlp::stopwords::StopwordConfig;
use crate::wordcloud::WordCloudConfig;

/// The only spec version this crate understands.
pub const SPEC_VERSION: u32 = 1;

/// Top-level pipeline specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Which optional stages run.
    #[serde(default)]
    pub stages: StageToggles,

    #[serde(default)]
    pub cleaning: CleanerConfig,

    #[serde(default)]
    pub stopwords: StopwordConfig,

    #[serde(default)]
    pub stemmer: StemmerConfig,

    #[serde(default)]
    pub word_cloud: WordCloudConfig,

    /// Runtime execution limits.
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            stages: StageToggles::default(),
            cleaning: CleanerConfig::default(),
            stopwords: StopwordConfig::default(),
            stemmer: StemmerConfig::default(),
            word_cloud: WordCloudConfig::default(),
            runtime: RuntimeSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl PipelineSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON spec file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// On/off switches for the stages after tokenization.
///
/// Tokenization always runs; a disabled stage passes its input through in
/// the next stage's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageToggles {
    #[serde(default = "enabled")]
    pub clean: bool,

    #[serde(default = "enabled")]
    pub remove_stopwords: bool,

    #[serde(default = "enabled")]
    pub stem: bool,

    #[serde(default = "enabled")]
    pub sentiment: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn enabled() -> bool {
    true
}

impl Default for StageToggles {
    fn default() -> Self {
        Self {
            clean: true,
            remove_stopwords: true,
            stem: true,
            sentiment: true,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Runtime execution limits (fail-fast guards).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Maximum number of input characters before rejecting.
    #[serde(default)]
    pub max_chars: Option<usize>,

    /// Maximum number of sentences before rejecting.
    #[serde(default)]
    pub max_sentences: Option<usize>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec = PipelineSpec::from_json(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert!(spec.stages.clean && spec.stages.remove_stopwords);
        assert!(spec.stages.stem && spec.stages.sentiment);
        assert!(spec.cleaning.punctuation);
        assert_eq!(spec.stopwords.language, "en");
        assert_eq!(spec.stemmer.language, "english");
        assert!(!spec.strict);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "stages": { "stem": false },
            "cleaning": { "digits": false, "custom_pattern": "\\(CNN\\)" },
            "stopwords": { "language": "de", "extra": ["korea"] },
            "word_cloud": { "width": 800, "max_words": 50 },
            "runtime": { "max_chars": 100000 },
            "strict": true
        }"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        assert!(!spec.stages.stem);
        assert!(spec.stages.clean);
        assert!(spec.cleaning.punctuation);
        assert!(!spec.cleaning.digits);
        assert_eq!(spec.cleaning.custom_pattern.as_deref(), Some(r"\(CNN\)"));
        assert_eq!(spec.stopwords.extra, vec!["korea"]);
        assert_eq!(spec.word_cloud.width, 800);
        assert_eq!(spec.word_cloud.height, 400);
        assert_eq!(spec.word_cloud.max_words, 50);
        assert_eq!(spec.runtime.max_chars, Some(100000));
        assert!(spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "stages": { "pos_tagging": true },
            "runtime": { "max_tokens": 5 }
        }"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.stages.unknown_fields.contains_key("pos_tagging"));
        assert!(spec.runtime.unknown_fields.contains_key("max_tokens"));
    }

    #[test]
    fn test_default_spec_serializes() {
        let value = serde_json::to_value(PipelineSpec::default()).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["stages"]["sentiment"], true);
        assert_eq!(value["stopwords"]["language"], "en");
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(PipelineSpec::from_path("/definitely/not/here.json").is_err());
    }
}
