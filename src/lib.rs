//! # rapid-textprep
//!
//! Preparation of news-article text for downstream analysis: sentence
//! splitting, cleaning, stopword removal, Snowball stemming, VADER sentiment,
//! readability statistics and word-cloud rendering.
//!
//! ```no_run
//! use rapid_textprep::{Content, DefaultPipeline, NoopObserver, RunConfig};
//!
//! let pipeline = DefaultPipeline::english();
//! let article = Content::with_source("Flowers are beautiful. I broke my leg.", "https://example.com");
//! let out = pipeline.run(&article, &RunConfig::default(), &mut NoopObserver)?;
//! println!("{} sentences, final text: {}", out.counts.sentences, out.final_text());
//! # Ok::<(), rapid_textprep::TextPrepError>(())
//! ```

pub mod errors;
pub mod nlp;
pub mod pipeline;
pub mod sentiment;
pub mod types;
pub mod wordcloud;

pub use errors::{Result, TextPrepError};
pub use pipeline::artifacts::ProcessedContent;
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{DefaultPipeline, Pipeline, PipelineBuilder, RunConfig};
pub use pipeline::spec::PipelineSpec;
pub use pipeline::validation::{ValidationEngine, ValidationReport};
pub use sentiment::{Polarity, PolarityScores, VaderAnalyzer};
pub use types::{Content, Counts, StageStatus};
pub use wordcloud::WordCloudConfig;
