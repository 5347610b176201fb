//! Stage hooks for the pipeline runner.
//!
//! Observers see every stage boundary and every intermediate artifact
//! without touching stage logic. The CLI uses them for `--timings` and for
//! `tracing` output.

use std::time::{Duration, Instant};

use crate::pipeline::artifacts::{CleanedText, FilteredText, ScoredSentences, Sentences, StemmedText};

pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_CLEAN: &str = "clean";
pub const STAGE_STOPWORDS: &str = "remove_stopwords";
pub const STAGE_STEM: &str = "stem";
pub const STAGE_SENTIMENT: &str = "sentiment";

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Metrics for one completed stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    items_in: Option<usize>,
    items_out: Option<usize>,
    skipped: bool,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Default::default()
        }
    }

    /// Report for a stage that was disabled and passed its input through.
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Items (sentences or words) the stage consumed.
    pub fn items_in(&self) -> Option<usize> {
        self.items_in
    }

    /// Items (sentences or words) the stage produced.
    pub fn items_out(&self) -> Option<usize> {
        self.items_out
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }
}

/// Fluent construction of a [`StageReport`] with optional counts.
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn items_in(mut self, n: usize) -> Self {
        self.report.items_in = Some(n);
        self
    }

    pub fn items_out(mut self, n: usize) -> Self {
        self.report.items_out = Some(n);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks fired by [`Pipeline::run`](super::runner::Pipeline::run).
///
/// Every method has an empty default, so implementors override only what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
    fn on_sentences(&mut self, _sentences: &Sentences) {}
    fn on_cleaned(&mut self, _cleaned: &CleanedText) {}
    fn on_filtered(&mut self, _filtered: &FilteredText) {}
    fn on_stemmed(&mut self, _stemmed: &StemmedText) {}
    fn on_sentiment(&mut self, _scored: &ScoredSentences) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects a [`StageReport`] per stage, in execution order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    /// Sum of all stage durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

/// Emits one `tracing` event per finished stage.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        if report.is_skipped() {
            tracing::debug!(stage, "stage skipped");
            return;
        }
        tracing::debug!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            items_in = report.items_in(),
            items_out = report.items_out(),
            "stage finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .items_in(10)
            .items_out(4)
            .build();
        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.items_in(), Some(10));
        assert_eq!(report.items_out(), Some(4));
        assert!(!report.is_skipped());
    }

    #[test]
    fn test_timing_observer_collects_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_TOKENIZE, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_CLEAN, &StageReport::skipped());
        assert_eq!(obs.reports().len(), 2);
        assert_eq!(obs.reports()[0].0, STAGE_TOKENIZE);
        assert!(obs.report(STAGE_CLEAN).unwrap().is_skipped());
        assert!(obs.report(STAGE_STEM).is_none());
        assert_eq!(obs.total(), Duration::from_millis(1));
    }
}
