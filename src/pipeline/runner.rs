//! Pipeline runner — orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of pipeline stages.
//! Calling [`Pipeline::run`] executes them in order, threading artifacts
//! between stages and notifying a [`PipelineObserver`] at each boundary.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over all stage types, so the compiler monomorphizes
//! each combination into a unique concrete type. Lexicon-backed stages
//! (stopword set, stemmer, sentiment lexicon) are loaded once when the
//! pipeline is built and only borrowed afterwards, so one pipeline can be
//! shared across threads and process any number of articles.
//!
//! # Factory methods
//!
//! Use [`Pipeline::english()`] or [`Pipeline::from_spec()`] to build the
//! default pipeline without spelling out the generics manually.

use rayon::prelude::*;

use crate::errors::{Result, TextPrepError};
use crate::nlp::cleaner::TextCleaner;
use crate::nlp::readability::TextStatistics;
use crate::nlp::stemmer::SnowballStemmer;
use crate::nlp::stopwords::StopwordFilter;
use crate::pipeline::artifacts::{CleanedText, FilteredText, ProcessedContent, StemmedText};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_CLEAN,
    STAGE_SENTIMENT, STAGE_STEM, STAGE_STOPWORDS, STAGE_TOKENIZE,
};
use crate::pipeline::spec::PipelineSpec;
use crate::pipeline::traits::{
    Cleaner, SentenceSplitter, SentimentScorer, StopwordRemover, UnicodeSentenceSplitter,
    WordStemmer,
};
use crate::pipeline::validation::ValidationEngine;
use crate::sentiment::VaderAnalyzer;
use crate::types::{Content, Counts, StageStatus};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// RunConfig — per-run switches and limits
// ============================================================================

/// Which optional stages run, plus fail-fast input limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub clean: bool,
    pub remove_stopwords: bool,
    pub stem: bool,
    pub sentiment: bool,
    /// Reject articles with more characters than this.
    pub max_chars: Option<usize>,
    /// Reject articles with more sentences than this.
    pub max_sentences: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            clean: true,
            remove_stopwords: true,
            stem: true,
            sentiment: true,
            max_chars: None,
            max_sentences: None,
        }
    }
}

impl RunConfig {
    pub fn from_spec(spec: &PipelineSpec) -> Self {
        Self {
            clean: spec.stages.clean,
            remove_stopwords: spec.stages.remove_stopwords,
            stem: spec.stages.stem,
            sentiment: spec.stages.sentiment,
            max_chars: spec.runtime.max_chars,
            max_sentences: spec.runtime.max_sentences,
        }
    }
}

// ============================================================================
// Pipeline — statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// All type parameters have trait bounds enforced at the `impl` level, so the
/// struct itself is unconditionally constructible (useful for builders).
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Tok` | [`SentenceSplitter`] | [`UnicodeSentenceSplitter`] |
/// | `Cln` | [`Cleaner`] | [`TextCleaner`] |
/// | `Stp` | [`StopwordRemover`] | [`StopwordFilter`] |
/// | `Stm` | [`WordStemmer`] | [`SnowballStemmer`] |
/// | `Snt` | [`SentimentScorer`] | [`VaderAnalyzer`] |
#[derive(Debug, Clone)]
pub struct Pipeline<Tok, Cln, Stp, Stm, Snt> {
    pub splitter: Tok,
    pub cleaner: Cln,
    pub stopwords: Stp,
    pub stemmer: Stm,
    pub scorer: Snt,
}

/// Type alias for the default pipeline.
pub type DefaultPipeline =
    Pipeline<UnicodeSentenceSplitter, TextCleaner, StopwordFilter, SnowballStemmer, VaderAnalyzer>;

impl DefaultPipeline {
    /// Build the default English pipeline:
    /// - UAX #29 sentence splitting
    /// - Punctuation and digit stripping
    /// - English stopword list
    /// - English Snowball stemmer
    /// - VADER sentiment
    pub fn english() -> Self {
        Pipeline {
            splitter: UnicodeSentenceSplitter,
            cleaner: TextCleaner::default(),
            stopwords: StopwordFilter::english(),
            stemmer: SnowballStemmer::default(),
            scorer: VaderAnalyzer::new(),
        }
    }

    /// Build a pipeline from a validated [`PipelineSpec`].
    ///
    /// Runs the default [`ValidationEngine`]; the first error becomes a
    /// [`TextPrepError::Configuration`]. Warnings are logged and otherwise
    /// ignored.
    pub fn from_spec(spec: &PipelineSpec) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(spec);
        if let Some(err) = report.first_error() {
            return Err(TextPrepError::configuration(err.to_string()));
        }
        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(%warning, "pipeline spec warning");
        }

        Ok(Pipeline {
            splitter: UnicodeSentenceSplitter,
            cleaner: TextCleaner::new(&spec.cleaning)?,
            stopwords: StopwordFilter::from_config(&spec.stopwords)?,
            stemmer: SnowballStemmer::new(&spec.stemmer.language)?,
            scorer: VaderAnalyzer::new(),
        })
    }
}

// ============================================================================
// Pipeline::run — execute stages in order
// ============================================================================

impl<Tok, Cln, Stp, Stm, Snt> Pipeline<Tok, Cln, Stp, Stm, Snt>
where
    Tok: SentenceSplitter,
    Cln: Cleaner,
    Stp: StopwordRemover,
    Stm: WordStemmer,
    Snt: SentimentScorer,
{
    /// Execute the pipeline on one article, producing a [`ProcessedContent`].
    ///
    /// Stages run in order:
    /// 1. Tokenize into sentences
    /// 2. Clean each sentence
    /// 3. Remove stopwords
    /// 4. Stem
    /// 5. Score sentiment (on the tokenized sentences)
    ///
    /// A stage disabled in `cfg` passes its input through in the next
    /// stage's shape and reports [`StageReport::skipped`].
    ///
    /// # Errors
    ///
    /// - [`TextPrepError::Configuration`] if the content is blank.
    /// - [`TextPrepError::LimitExceeded`] if a [`RunConfig`] limit is hit.
    pub fn run(
        &self,
        content: &Content,
        cfg: &RunConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<ProcessedContent> {
        if content.is_blank() {
            return Err(TextPrepError::configuration("missing required text"));
        }
        let text = content.text();

        if let Some(max) = cfg.max_chars {
            let actual = text.chars().count();
            if actual > max {
                return Err(TextPrepError::LimitExceeded {
                    limit: "max_chars",
                    actual,
                    max,
                });
            }
        }

        // Stage 1: Tokenize
        trace_stage!(STAGE_TOKENIZE);
        observer.on_stage_start(STAGE_TOKENIZE);
        let clock = StageClock::start();
        let sentences = self.splitter.split(text);
        let report = StageReportBuilder::new(clock.elapsed())
            .items_out(sentences.len())
            .build();
        observer.on_stage_end(STAGE_TOKENIZE, &report);
        observer.on_sentences(&sentences);

        if let Some(max) = cfg.max_sentences {
            if sentences.len() > max {
                return Err(TextPrepError::LimitExceeded {
                    limit: "max_sentences",
                    actual: sentences.len(),
                    max,
                });
            }
        }

        // Stage 2: Clean
        let cleaned = if cfg.clean {
            trace_stage!(STAGE_CLEAN);
            observer.on_stage_start(STAGE_CLEAN);
            let clock = StageClock::start();
            let cleaned = self.cleaner.clean(&sentences);
            let report = StageReportBuilder::new(clock.elapsed())
                .items_in(sentences.len())
                .items_out(cleaned.len())
                .build();
            observer.on_stage_end(STAGE_CLEAN, &report);
            cleaned
        } else {
            observer.on_stage_end(STAGE_CLEAN, &StageReport::skipped());
            CleanedText::new(sentences.as_slice().to_vec())
        };
        observer.on_cleaned(&cleaned);

        // Stage 3: Remove stopwords
        let filtered = if cfg.remove_stopwords {
            trace_stage!(STAGE_STOPWORDS);
            observer.on_stage_start(STAGE_STOPWORDS);
            let clock = StageClock::start();
            let filtered = self.stopwords.remove(&cleaned);
            let report = StageReportBuilder::new(clock.elapsed())
                .items_in(cleaned.len())
                .items_out(filtered.word_count())
                .build();
            observer.on_stage_end(STAGE_STOPWORDS, &report);
            filtered
        } else {
            observer.on_stage_end(STAGE_STOPWORDS, &StageReport::skipped());
            FilteredText::new(
                cleaned
                    .as_slice()
                    .iter()
                    .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
                    .collect(),
            )
        };
        observer.on_filtered(&filtered);

        // Stage 4: Stem
        let stemmed = if cfg.stem {
            trace_stage!(STAGE_STEM);
            observer.on_stage_start(STAGE_STEM);
            let clock = StageClock::start();
            let stemmed = self.stemmer.stem(&filtered);
            let report = StageReportBuilder::new(clock.elapsed())
                .items_in(filtered.word_count())
                .items_out(stemmed.word_count())
                .build();
            observer.on_stage_end(STAGE_STEM, &report);
            stemmed
        } else {
            observer.on_stage_end(STAGE_STEM, &StageReport::skipped());
            StemmedText::new(filtered.sentences().to_vec())
        };
        observer.on_stemmed(&stemmed);

        // Stage 5: Sentiment (side branch on the tokenized sentences)
        let sentiment = if cfg.sentiment {
            trace_stage!(STAGE_SENTIMENT);
            observer.on_stage_start(STAGE_SENTIMENT);
            let clock = StageClock::start();
            let scored = self.scorer.score(&sentences);
            let report = StageReportBuilder::new(clock.elapsed())
                .items_in(sentences.len())
                .items_out(scored.len())
                .build();
            observer.on_stage_end(STAGE_SENTIMENT, &report);
            observer.on_sentiment(&scored);
            Some(scored)
        } else {
            observer.on_stage_end(STAGE_SENTIMENT, &StageReport::skipped());
            None
        };

        let counts = Counts {
            sentences: sentences.len(),
            words: filtered.word_count(),
            characters: sentences.characters(),
        };
        let status = StageStatus {
            tokenized: true,
            cleaned_content: cfg.clean,
            stopwords_removed: cfg.remove_stopwords,
            stemmed: cfg.stem,
            sentiment_analyzed: cfg.sentiment,
        };
        let statistics = TextStatistics::from_text(text);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = content.source(),
            sentences = counts.sentences,
            words = counts.words,
            characters = counts.characters,
            "article processed"
        );

        Ok(ProcessedContent {
            source: content.source().map(str::to_string),
            sentences,
            cleaned,
            filtered,
            stemmed,
            sentiment,
            counts,
            status,
            statistics,
            readability_index: statistics.automated_readability_index(),
        })
    }

    /// Process several articles in parallel.
    ///
    /// Results are returned in input order; one failing article does not
    /// affect the others.
    pub fn run_batch(&self, contents: &[Content], cfg: &RunConfig) -> Vec<Result<ProcessedContent>>
    where
        Self: Sync,
    {
        contents
            .par_iter()
            .map(|content| self.run(content, cfg, &mut NoopObserver))
            .collect()
    }
}

// ============================================================================
// PipelineBuilder — fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the default English stages and allows overriding individual
/// ones.
///
/// ```
/// # use rapid_textprep::pipeline::runner::PipelineBuilder;
/// # use rapid_textprep::pipeline::traits::NoopSentimentScorer;
/// # use rapid_textprep::nlp::stopwords::StopwordFilter;
/// let pipeline = PipelineBuilder::new()
///     .stopwords(StopwordFilter::from_list(&["korea"]))
///     .scorer(NoopSentimentScorer)
///     .build();
/// ```
pub struct PipelineBuilder<
    Tok = UnicodeSentenceSplitter,
    Cln = TextCleaner,
    Stp = StopwordFilter,
    Stm = SnowballStemmer,
    Snt = VaderAnalyzer,
> {
    splitter: Tok,
    cleaner: Cln,
    stopwords: Stp,
    stemmer: Stm,
    scorer: Snt,
}

impl PipelineBuilder {
    /// Start building from the default English stages.
    pub fn new() -> Self {
        let Pipeline {
            splitter,
            cleaner,
            stopwords,
            stemmer,
            scorer,
        } = DefaultPipeline::english();
        PipelineBuilder {
            splitter,
            cleaner,
            stopwords,
            stemmer,
            scorer,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tok, Cln, Stp, Stm, Snt> PipelineBuilder<Tok, Cln, Stp, Stm, Snt> {
    /// Override the sentence splitter.
    pub fn splitter<T: SentenceSplitter>(self, t: T) -> PipelineBuilder<T, Cln, Stp, Stm, Snt> {
        PipelineBuilder {
            splitter: t,
            cleaner: self.cleaner,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            scorer: self.scorer,
        }
    }

    /// Override the cleaner.
    pub fn cleaner<C: Cleaner>(self, c: C) -> PipelineBuilder<Tok, C, Stp, Stm, Snt> {
        PipelineBuilder {
            splitter: self.splitter,
            cleaner: c,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            scorer: self.scorer,
        }
    }

    /// Override the stopword remover.
    pub fn stopwords<S: StopwordRemover>(self, s: S) -> PipelineBuilder<Tok, Cln, S, Stm, Snt> {
        PipelineBuilder {
            splitter: self.splitter,
            cleaner: self.cleaner,
            stopwords: s,
            stemmer: self.stemmer,
            scorer: self.scorer,
        }
    }

    /// Override the stemmer.
    pub fn stemmer<S: WordStemmer>(self, s: S) -> PipelineBuilder<Tok, Cln, Stp, S, Snt> {
        PipelineBuilder {
            splitter: self.splitter,
            cleaner: self.cleaner,
            stopwords: self.stopwords,
            stemmer: s,
            scorer: self.scorer,
        }
    }

    /// Override the sentiment scorer.
    pub fn scorer<S: SentimentScorer>(self, s: S) -> PipelineBuilder<Tok, Cln, Stp, Stm, S> {
        PipelineBuilder {
            splitter: self.splitter,
            cleaner: self.cleaner,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            scorer: s,
        }
    }

    /// Consume the builder and produce a [`Pipeline`].
    pub fn build(self) -> Pipeline<Tok, Cln, Stp, Stm, Snt> {
        Pipeline {
            splitter: self.splitter,
            cleaner: self.cleaner,
            stopwords: self.stopwords,
            stemmer: self.stemmer,
            scorer: self.scorer,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
