//! Command-line front end for rapid-textprep.
//!
//! Runs the preparation pipeline on a file or stdin, prints sentiment scores,
//! validates pipeline specs and renders word clouds.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rapid_textprep::pipeline::observer::{PipelineObserver, StageReport, TracingObserver};
use rapid_textprep::pipeline::validation::Severity;
use rapid_textprep::sentiment::VaderAnalyzer;
use rapid_textprep::wordcloud;
use rapid_textprep::{
    Content, DefaultPipeline, PipelineSpec, ProcessedContent, RunConfig, StageTimingObserver,
    ValidationEngine,
};

#[derive(Parser)]
#[command(name = "rapid-textprep")]
#[command(about = "Prepare news-article text: clean, filter, stem, score and visualise", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on one article
    Process {
        /// Article text file, or "-" for stdin
        input: PathBuf,

        /// Where the article came from (URL)
        #[arg(long)]
        source: Option<String>,

        /// Pipeline spec (JSON)
        #[arg(short, long, env = "TEXTPREP_CONFIG")]
        config: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Print per-stage timings
        #[arg(long)]
        timings: bool,

        /// Render a word cloud of the final text under this title
        #[arg(long, value_name = "TITLE")]
        word_cloud: Option<String>,

        /// Font for the word cloud (overrides the spec)
        #[arg(long, env = "TEXTPREP_FONT")]
        font: Option<PathBuf>,

        /// Directory the word cloud is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print VADER scores for every sentence
    Sentiment {
        /// Article text file, or "-" for stdin
        input: PathBuf,
    },

    /// Check a pipeline spec and print all diagnostics
    Validate {
        /// Pipeline spec (JSON)
        spec: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rapid_textprep={default_level}").into()),
        )
        .init();

    match cli.command {
        Commands::Process {
            input,
            source,
            config,
            json,
            timings,
            word_cloud,
            font,
            out_dir,
        } => {
            let mut spec = match config {
                Some(path) => PipelineSpec::from_path(&path)
                    .with_context(|| format!("reading spec {}", path.display()))?,
                None => PipelineSpec::default(),
            };
            if font.is_some() {
                spec.word_cloud.font_path = font;
            }
            let content = read_content(&input, source)?;
            let out = process(&spec, &content, timings)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_summary(&out);
            }

            if let Some(title) = word_cloud {
                let path = wordcloud::generate(&out.final_text(), &title, &spec.word_cloud, &out_dir)?;
                println!("word cloud written to {}", path.display());
            }
        }
        Commands::Sentiment { input } => {
            let content = read_content(&input, None)?;
            sentiment(&content)?;
        }
        Commands::Validate { spec, json } => {
            let parsed = PipelineSpec::from_path(&spec)
                .with_context(|| format!("reading spec {}", spec.display()))?;
            let report = ValidationEngine::with_defaults().validate(&parsed);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_empty() {
                println!("{}: ok", spec.display());
            } else {
                for diag in &report.diagnostics {
                    let label = match diag.severity {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                    };
                    println!("{label}: {}", diag.error);
                    if let Some(hint) = &diag.error.hint {
                        println!("  hint: {hint}");
                    }
                }
            }
            if report.has_errors() {
                bail!("{} has {} error(s)", spec.display(), report.errors().count());
            }
        }
    }

    Ok(())
}

/// Read the article from a file or stdin; non-UTF-8 input is rejected.
fn read_content(input: &Path, source: Option<String>) -> Result<Content> {
    let bytes = if input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?
    };
    Ok(Content::from_bytes(bytes, source)?)
}

/// Forwards stage events to both the timing collector and `tracing`.
struct CliObserver {
    timings: StageTimingObserver,
    tracing: TracingObserver,
}

impl PipelineObserver for CliObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.timings.on_stage_end(stage, report);
        self.tracing.on_stage_end(stage, report);
    }
}

fn process(spec: &PipelineSpec, content: &Content, timings: bool) -> Result<ProcessedContent> {
    let pipeline = DefaultPipeline::from_spec(spec)?;
    let mut observer = CliObserver {
        timings: StageTimingObserver::new(),
        tracing: TracingObserver,
    };
    let out = pipeline.run(content, &RunConfig::from_spec(spec), &mut observer)?;

    if timings {
        for (stage, report) in observer.timings.reports() {
            if report.is_skipped() {
                eprintln!("{stage:<18} skipped");
            } else {
                eprintln!("{stage:<18} {:>10.3?}", report.elapsed());
            }
        }
        eprintln!("{:<18} {:>10.3?}", "total", observer.timings.total());
    }
    Ok(out)
}

fn print_summary(out: &ProcessedContent) {
    if let Some(source) = &out.source {
        println!("Source:      {source}");
    }
    println!("Sentences:   {}", out.counts.sentences);
    println!("Words:       {}", out.counts.words);
    println!("Characters:  {}", out.counts.characters);
    if let Some(ari) = out.readability_index {
        println!("Readability: {ari:.2} (ARI)");
    }
    if let Some(mean) = out.sentiment.as_ref().and_then(|s| s.mean_compound()) {
        println!("Sentiment:   {mean:+.4} (mean compound)");
    }
    let ran: Vec<&str> = out
        .status
        .entries()
        .iter()
        .filter(|(_, ran)| *ran)
        .map(|(name, _)| *name)
        .collect();
    println!("Stages:      {}", ran.join(", "));
    println!();
    println!("{}", out.final_text());
}

fn sentiment(content: &Content) -> Result<()> {
    if content.is_blank() {
        bail!("missing required text");
    }
    let analyzer = VaderAnalyzer::new();
    println!("{:>8} {:>6} {:>6} {:>6}  sentence", "compound", "neg", "neu", "pos");
    println!("{}", "-".repeat(60));
    for sentence in rapid_textprep::nlp::tokenizer::split_sentences(content.text()) {
        let s = analyzer.polarity_scores(&sentence);
        println!(
            "{:>+8.4} {:>6.3} {:>6.3} {:>6.3}  {}",
            s.compound, s.neg, s.neu, s.pos, sentence
        );
    }
    Ok(())
}
