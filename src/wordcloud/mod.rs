//! Word-cloud rendering of the final processed text.
//!
//! [`layout`] decides where each word goes and is independent of any font
//! backend; [`render`] measures with a real font and writes the PNG.

pub mod layout;
pub mod render;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use layout::{word_frequencies, PlacedWord, TextMeasure, WordCloudLayout};
pub use render::{generate, output_path, render_png, FontMeasure};

/// Canvas and typography settings for a word cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordCloudConfig {
    pub width: u32,
    pub height: u32,
    /// Only the most frequent `max_words` words are drawn.
    pub max_words: usize,
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// RGB background colour.
    pub background: [u8; 3],
    /// TTF/OTF file used to draw the words.
    pub font_path: Option<PathBuf>,
    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            max_words: 200,
            min_font_size: 10.0,
            max_font_size: 80.0,
            background: [255, 255, 255],
            font_path: None,
            unknown_fields: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: WordCloudConfig =
            serde_json::from_str(r#"{ "width": 1024, "font_path": "/fonts/a.ttf" }"#).unwrap();
        assert_eq!(cfg.width, 1024);
        assert_eq!(cfg.height, 400);
        assert_eq!(cfg.background, [255, 255, 255]);
        assert_eq!(cfg.font_path, Some(PathBuf::from("/fonts/a.ttf")));
    }

    #[test]
    fn test_misspelled_fields_are_captured() {
        let cfg: WordCloudConfig = serde_json::from_str(r#"{ "widht": 900 }"#).unwrap();
        assert_eq!(cfg.width, 600);
        assert_eq!(cfg.unknown_fields.get("widht"), Some(&serde_json::json!(900)));
    }
}
