//! Frequency counting and spiral placement.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::WordCloudConfig;

/// Radius growth per radian of the placement spiral, in pixels.
const SPIRAL_STEP: f64 = 2.0;
/// Angle increment between candidate positions, in radians.
const ANGLE_STEP: f64 = 0.1;

/// Measures the pixel box of a word at a font size.
///
/// The renderer uses a real font; layout tests use a fixed-width fake.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32);
}

/// Count whitespace-separated words, most frequent first.
///
/// Ties are broken alphabetically so the order is deterministic.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for word in text.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut freqs: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs
}

/// A word with its font size and top-left position on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    pub font_size: f32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PlacedWord {
    fn overlaps(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        x < self.x + self.width as i32
            && self.x < x + width as i32
            && y < self.y + self.height as i32
            && self.y < y + height as i32
    }
}

/// Positions for every word that fit on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    /// Place the `max_words` most frequent words.
    ///
    /// `freqs` must be sorted most frequent first, as returned by
    /// [`word_frequencies`]. Font sizes scale linearly with the count
    /// relative to the top word. Each word walks an Archimedean spiral out
    /// from the centre and takes the first spot that is inside the canvas
    /// and clear of earlier words; words that fit nowhere are dropped.
    pub fn compute(
        freqs: &[(String, usize)],
        cfg: &WordCloudConfig,
        measure: &impl TextMeasure,
    ) -> Self {
        let mut placed: Vec<PlacedWord> = Vec::new();
        let top = freqs.first().map(|(_, c)| *c).unwrap_or(0);

        for (text, count) in freqs.iter().take(cfg.max_words) {
            let font_size = font_size_for(*count, top, cfg);
            let (w, h) = measure.measure(text, font_size);
            if w == 0 || h == 0 || w > cfg.width || h > cfg.height {
                continue;
            }
            if let Some((x, y)) = find_spot(&placed, w, h, cfg) {
                placed.push(PlacedWord {
                    text: text.clone(),
                    count: *count,
                    font_size,
                    x,
                    y,
                    width: w,
                    height: h,
                });
            }
        }

        Self {
            width: cfg.width,
            height: cfg.height,
            words: placed,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn font_size_for(count: usize, top: usize, cfg: &WordCloudConfig) -> f32 {
    if top == 0 {
        return cfg.min_font_size;
    }
    let ratio = count as f32 / top as f32;
    cfg.min_font_size + (cfg.max_font_size - cfg.min_font_size) * ratio
}

fn find_spot(placed: &[PlacedWord], w: u32, h: u32, cfg: &WordCloudConfig) -> Option<(i32, i32)> {
    let cx = f64::from(cfg.width) / 2.0;
    let cy = f64::from(cfg.height) / 2.0;
    let max_radius = cx.hypot(cy);
    let (half_w, half_h) = (f64::from(w) / 2.0, f64::from(h) / 2.0);

    let mut t = 0.0_f64;
    loop {
        let r = SPIRAL_STEP * t;
        if r > max_radius {
            return None;
        }
        let x = (cx + r * t.cos() - half_w).round() as i32;
        let y = (cy + r * t.sin() - half_h).round() as i32;

        let inside = x >= 0
            && y >= 0
            && x as u32 + w <= cfg.width
            && y as u32 + h <= cfg.height;
        if inside && !placed.iter().any(|p| p.overlaps(x, y, w, h)) {
            return Some((x, y));
        }
        t += ANGLE_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace fake: each char is 0.6 em wide, one em tall.
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
            let w = (text.chars().count() as f32 * font_size * 0.6).ceil() as u32;
            (w, font_size.ceil() as u32)
        }
    }

    fn sample_freqs() -> Vec<(String, usize)> {
        word_frequencies(
            "japan deni issu link japan decis announc japan monday compani compani help",
        )
    }

    #[test]
    fn test_word_frequencies_order() {
        let freqs = sample_freqs();
        assert_eq!(freqs[0], ("japan".to_string(), 3));
        assert_eq!(freqs[1], ("compani".to_string(), 2));
        // Ties sorted alphabetically.
        assert_eq!(freqs[2].0, "announc");
        assert!(word_frequencies("  ").is_empty());
    }

    #[test]
    fn test_layout_has_no_overlaps_and_stays_in_bounds() {
        let cfg = WordCloudConfig::default();
        let layout = WordCloudLayout::compute(&sample_freqs(), &cfg, &FixedMeasure);
        assert_eq!(layout.len(), sample_freqs().len());

        for (i, a) in layout.words.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x as u32 + a.width <= cfg.width);
            assert!(a.y as u32 + a.height <= cfg.height);
            for b in &layout.words[i + 1..] {
                assert!(!a.overlaps(b.x, b.y, b.width, b.height), "{} overlaps {}", a.text, b.text);
            }
        }
    }

    #[test]
    fn test_font_sizes_scale_with_frequency() {
        let cfg = WordCloudConfig::default();
        let layout = WordCloudLayout::compute(&sample_freqs(), &cfg, &FixedMeasure);
        let first = &layout.words[0];
        assert_eq!(first.text, "japan");
        assert!((first.font_size - cfg.max_font_size).abs() < f32::EPSILON);
        assert!(layout.words.windows(2).all(|w| w[0].font_size >= w[1].font_size));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let cfg = WordCloudConfig::default();
        let a = WordCloudLayout::compute(&sample_freqs(), &cfg, &FixedMeasure);
        let b = WordCloudLayout::compute(&sample_freqs(), &cfg, &FixedMeasure);
        assert_eq!(a, b);
    }

    #[test]
    fn test_max_words_limits_layout() {
        let cfg = WordCloudConfig {
            max_words: 2,
            ..WordCloudConfig::default()
        };
        let layout = WordCloudLayout::compute(&sample_freqs(), &cfg, &FixedMeasure);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_words_that_do_not_fit_are_skipped() {
        let cfg = WordCloudConfig {
            width: 60,
            height: 40,
            min_font_size: 20.0,
            max_font_size: 20.0,
            ..WordCloudConfig::default()
        };
        // Each word is 12px per char by 20px tall: "supercalifragilistic" can't fit.
        let freqs = word_frequencies("ab cd supercalifragilistic ef gh ij");
        let layout = WordCloudLayout::compute(&freqs, &cfg, &FixedMeasure);
        assert!(!layout.words.iter().any(|w| w.text.starts_with("super")));
        assert!(layout.len() < freqs.len());
        assert!(!layout.is_empty());
    }
}
