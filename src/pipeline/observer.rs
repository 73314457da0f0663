//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.
//!
//! All hooks have empty default bodies, so an observer only implements what
//! it cares about. [`NoopObserver`] implements none of them.

use std::time::{Duration, Instant};

use crate::summarizer::selector::Selection;
use crate::types::{Document, RankedCandidate};

// ─── Stage names ────────────────────────────────────────────────────────────

pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";
pub const STAGE_TOPIC: &str = "topic";
pub const STAGE_REWRITE: &str = "rewrite";
pub const STAGE_HIGHLIGHT: &str = "highlight";
pub const STAGE_METRICS: &str = "metrics";

/// Every stage in execution order
pub const ALL_STAGES: [&str; 7] = [
    STAGE_SEGMENT,
    STAGE_RANK,
    STAGE_SELECT,
    STAGE_TOPIC,
    STAGE_REWRITE,
    STAGE_HIGHLIGHT,
    STAGE_METRICS,
];

// ─── StageClock ─────────────────────────────────────────────────────────────

/// Wall-clock timer for a single stage.
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

// ─── StageReport ────────────────────────────────────────────────────────────

/// What a stage did: its duration plus optional stage-specific counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    duration: Duration,
    items: Option<usize>,
    degraded: Option<bool>,
}

impl StageReport {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of items the stage produced (sentences, candidates, words...)
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    /// Whether the stage fell back to its default output
    pub fn degraded(&self) -> Option<bool> {
        self.degraded
    }
}

/// Fluent construction of a [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn degraded(mut self, degraded: bool) -> Self {
        self.report.degraded = Some(degraded);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

/// Receives callbacks as a summarization runs.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// The segmented document.
    fn on_document(&mut self, _document: &Document) {}

    /// Ranked candidates, in rank order.
    fn on_candidates(&mut self, _candidates: &[RankedCandidate]) {}

    /// The assembled sentence selection, before rewriting.
    fn on_selection(&mut self, _selection: &Selection) {}

    fn on_topic(&mut self, _topic: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage reports in completion order.
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Sum of all stage durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.duration()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .items(4)
            .degraded(true)
            .build();
        assert_eq!(report.duration(), Duration::from_millis(3));
        assert_eq!(report.items(), Some(4));
        assert_eq!(report.degraded(), Some(true));

        let bare = StageReport::new(Duration::ZERO);
        assert_eq!(bare.items(), None);
        assert_eq!(bare.degraded(), None);
    }

    #[test]
    fn test_timing_observer_records_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_SEGMENT, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_RANK, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<&str> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_SEGMENT, STAGE_RANK]);
        assert_eq!(obs.total(), Duration::from_millis(3));
        assert!(obs.report(STAGE_RANK).is_some());
        assert!(obs.report(STAGE_TOPIC).is_none());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = StageClock::start();
        let first = clock.elapsed();
        assert!(clock.elapsed() >= first);
    }
}
