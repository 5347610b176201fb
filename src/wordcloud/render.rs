//! PNG output with `image`, `imageproc` and `ab_glyph`.

use std::fmt;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use super::layout::{word_frequencies, TextMeasure, WordCloudLayout};
use super::WordCloudConfig;
use crate::errors::{Result, TextPrepError};

/// Word colours, cycled in placement order.
const PALETTE: [[u8; 3]; 6] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
];

/// [`TextMeasure`] backed by a loaded TrueType/OpenType font.
pub struct FontMeasure {
    font: FontVec,
}

impl fmt::Debug for FontMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FontMeasure")
    }
}

impl FontMeasure {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|e| TextPrepError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            TextPrepError::Font(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        text_size(PxScale::from(font_size), &self.font, text)
    }
}

/// `<title>.png` inside `out_dir`, with path separators in the title
/// replaced by `_`.
pub fn output_path(title: &str, out_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TextPrepError::configuration("word cloud title must not be empty"));
    }
    let file_name: String = title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    Ok(out_dir.as_ref().join(format!("{file_name}.png")))
}

/// Draw `layout` onto a fresh canvas and save it as PNG at `path`.
pub fn render_png(
    layout: &WordCloudLayout,
    font: &FontMeasure,
    cfg: &WordCloudConfig,
    path: &Path,
) -> Result<()> {
    let mut canvas = RgbImage::from_pixel(layout.width, layout.height, Rgb(cfg.background));
    for (i, word) in layout.words.iter().enumerate() {
        let color = Rgb(PALETTE[i % PALETTE.len()]);
        draw_text_mut(
            &mut canvas,
            color,
            word.x,
            word.y,
            PxScale::from(word.font_size),
            &font.font,
            &word.text,
        );
    }
    canvas.save(path)?;
    Ok(())
}

/// Build and save the word cloud for `text`, returning the written path.
///
/// # Errors
///
/// [`TextPrepError::Configuration`] for an empty title, text with no words,
/// or no `font_path` in `cfg`; font, image and I/O errors otherwise.
pub fn generate(
    text: &str,
    title: &str,
    cfg: &WordCloudConfig,
    out_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = output_path(title, out_dir)?;

    let freqs = word_frequencies(text);
    if freqs.is_empty() {
        return Err(TextPrepError::configuration("no words to draw in word cloud"));
    }

    let font_path = cfg
        .font_path
        .as_ref()
        .ok_or_else(|| TextPrepError::configuration("no font configured for word cloud"))?;
    let font = FontMeasure::load(font_path)?;

    let layout = WordCloudLayout::compute(&freqs, cfg, &font);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        placed = layout.len(),
        candidates = freqs.len().min(cfg.max_words),
        path = %path.display(),
        "word cloud laid out"
    );

    render_png(&layout, &font, cfg, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First TTF found in the usual system locations, if any.
    fn system_font() -> Option<PathBuf> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
    }

    #[test]
    fn test_output_path_sanitizes_title() {
        let path = output_path("Japan/Korea\\trade", "/tmp/out").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/out/Japan_Korea_trade.png"));
    }

    #[test]
    fn test_empty_title_is_configuration_error() {
        let err = output_path("  ", "/tmp").unwrap_err();
        assert!(matches!(err, TextPrepError::Configuration(_)));
    }

    #[test]
    fn test_generate_without_words_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = WordCloudConfig::default();
        let err = generate("   ", "empty", &cfg, dir.path()).unwrap_err();
        assert!(matches!(err, TextPrepError::Configuration(ref m) if m.contains("no words")));
    }

    #[test]
    fn test_generate_without_font_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = WordCloudConfig::default();
        let err = generate("japan trade", "cloud", &cfg, dir.path()).unwrap_err();
        assert!(matches!(err, TextPrepError::Configuration(ref m) if m.contains("font")));
    }

    #[test]
    fn test_unreadable_font_is_font_error() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-a-font.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();
        let err = FontMeasure::load(&bogus).unwrap_err();
        assert!(matches!(err, TextPrepError::Font(_)));
    }

    #[test]
    fn test_generate_writes_png() {
        let Some(font_path) = system_font() else {
            eprintln!("no system font found; skipping");
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let cfg = WordCloudConfig {
            width: 300,
            height: 200,
            font_path: Some(font_path),
            ..WordCloudConfig::default()
        };
        let path = generate("japan japan korea trade trade trade", "trade/news", &cfg, dir.path())
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "trade_news.png");

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 200);
    }
}
