//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`Summarizer`] holds the configured engines. Calling
//! [`Summarizer::summarize_with_observer`] runs the stages in order, threading
//! artifacts between them and notifying a [`PipelineObserver`] at each
//! boundary:
//!
//! 1. Segment the text into a [`Document`](crate::types::Document)
//! 2. Rank sentences (best-effort)
//! 3. Select and deduplicate summary sentences
//! 4. Extract the topic label
//! 5. Rewrite a vague opening sentence
//! 6. Highlight keyphrases
//! 7. Compute metrics
//!
//! # Dynamic dispatch
//!
//! Engines are boxed trait objects chosen at runtime from
//! [`SummaryConfig`], so one `Summarizer` type covers every engine
//! combination. It is `Send + Sync` and can be shared across threads.

use std::fmt;

use crate::config::{KeywordEngine, SummaryConfig};
use crate::errors::SummarizeError;
use crate::metrics::{fallback_excerpt, Metrics};
use crate::nlp::segmenter::Segmenter;
use crate::phrase::rake::RakeExtractor;
use crate::phrase::textrank::TextRankExtractor;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_HIGHLIGHT,
    STAGE_METRICS, STAGE_RANK, STAGE_REWRITE, STAGE_SEGMENT, STAGE_SELECT, STAGE_TOPIC,
};
use crate::pipeline::traits::{rank_best_effort, KeyphraseExtractor, SentenceRanker};
use crate::refine::{extract_topic, highlight_keywords, rewrite_opening, FALLBACK_TOPIC};
use crate::summarizer::lexrank::LexRankRanker;
use crate::summarizer::selector::SentenceSelector;

// ---------------------------------------------------------------------------
// Tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage; the span closes at the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Advisory shown above every summary
pub const ADVISORY_NOTICE: &str = "<p style='color:#ff9800; font-weight:bold;'>⚠️ Summarizer can make mistakes, summarize sensitive or important content at your own risk.</p>";

/// Result of one summarization
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutput {
    /// Advisory notice followed by the highlighted summary (HTML fragment)
    pub summary: String,
    pub metrics: Metrics,
    /// Topic label used for opener rewriting
    pub topic: String,
    /// Summary sentences after rewriting, before highlighting
    pub sentences: Vec<String>,
}

impl SummaryOutput {
    /// The summary without the advisory notice
    pub fn body(&self) -> &str {
        self.summary
            .strip_prefix(ADVISORY_NOTICE)
            .unwrap_or(&self.summary)
    }
}

// ============================================================================
// Summarizer: engine container
// ============================================================================

/// Extractive summarizer with pluggable ranking and keyphrase engines.
pub struct Summarizer {
    config: SummaryConfig,
    segmenter: Segmenter,
    ranker: Box<dyn SentenceRanker>,
    keywords: Option<Box<dyn KeyphraseExtractor>>,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("config", &self.config)
            .field("segmenter", &self.segmenter)
            .field("ranker", &self.ranker.name())
            .field("keywords", &self.keywords.as_ref().map(|k| k.name()))
            .finish()
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    /// Summarizer with the default configuration (LexRank + RAKE)
    pub fn new() -> Self {
        Self::from_config(SummaryConfig::default())
    }

    /// Build engines from `config`
    pub fn from_config(config: SummaryConfig) -> Self {
        let keywords: Option<Box<dyn KeyphraseExtractor>> = match config.keyword_engine {
            KeywordEngine::Rake => Some(Box::new(RakeExtractor::new())),
            KeywordEngine::TextRank => Some(Box::new(
                TextRankExtractor::new().with_window(config.textrank_window),
            )),
            KeywordEngine::None => None,
        };

        Self {
            ranker: Box::new(LexRankRanker::new(config.lexrank.clone())),
            segmenter: Segmenter::default(),
            keywords,
            config,
        }
    }

    pub fn with_segmenter(mut self, segmenter: Segmenter) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_ranker(mut self, ranker: impl SentenceRanker + 'static) -> Self {
        self.ranker = Box::new(ranker);
        self
    }

    /// Replace the keyphrase capability; `None` disables it
    pub fn with_keywords(mut self, keywords: Option<Box<dyn KeyphraseExtractor>>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn keywords(&self) -> Option<&dyn KeyphraseExtractor> {
        self.keywords.as_deref()
    }

    /// Summarize `text` into `requested` sentences
    ///
    /// A `requested` of 0 means the configured default.
    pub fn summarize(&self, text: &str, requested: usize) -> Result<SummaryOutput, SummarizeError> {
        self.summarize_with_observer(text, requested, &mut NoopObserver)
    }

    /// Like [`summarize`](Self::summarize), reporting each stage to `observer`
    pub fn summarize_with_observer(
        &self,
        text: &str,
        requested: usize,
        observer: &mut impl PipelineObserver,
    ) -> Result<SummaryOutput, SummarizeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let requested = if requested == 0 {
            self.config.default_sentence_count
        } else {
            requested
        };
        let selector = SentenceSelector::new().with_num_sentences(requested);
        let keywords = self.keywords();

        // Stage 1: Segment
        let document = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let document = self.segmenter.segment(text);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(document.len())
                .build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            observer.on_document(&document);
            document
        };

        // Stage 2: Rank
        let candidates = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let candidates = if selector.needs_candidates() {
                let budget = self.config.candidate_budget(requested);
                rank_best_effort(self.ranker.as_ref(), &document, budget)
            } else {
                Vec::new()
            };
            let report = StageReportBuilder::new(clock.elapsed())
                .items(candidates.len())
                .degraded(selector.needs_candidates() && candidates.is_empty())
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            observer.on_candidates(&candidates);
            candidates
        };

        // Stage 3: Select
        let selection = {
            trace_stage!(STAGE_SELECT);
            observer.on_stage_start(STAGE_SELECT);
            let clock = StageClock::start();
            let selection = selector.select(&document, &candidates);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(selection.len())
                .build();
            observer.on_stage_end(STAGE_SELECT, &report);
            observer.on_selection(&selection);
            selection
        };
        tracing::debug!(
            requested,
            sentences = document.len(),
            candidates = candidates.len(),
            selected = selection.len(),
            "summary sentences selected"
        );

        // Stage 4: Topic
        let topic = {
            trace_stage!(STAGE_TOPIC);
            observer.on_stage_start(STAGE_TOPIC);
            let clock = StageClock::start();
            let topic = extract_topic(keywords, text);
            let report = StageReportBuilder::new(clock.elapsed())
                .degraded(topic == FALLBACK_TOPIC)
                .build();
            observer.on_stage_end(STAGE_TOPIC, &report);
            observer.on_topic(&topic);
            topic
        };

        // Stage 5: Rewrite opener and join
        let (sentences, joined) = {
            trace_stage!(STAGE_REWRITE);
            observer.on_stage_start(STAGE_REWRITE);
            let clock = StageClock::start();
            let sentences = rewrite_opening(selection.sentences, &topic);
            let mut joined = sentences.join(" ").trim().to_string();
            let degraded = joined.is_empty();
            if degraded {
                joined = fallback_excerpt(text, self.config.fallback_word_limit);
            }
            let report = StageReportBuilder::new(clock.elapsed())
                .items(sentences.len())
                .degraded(degraded)
                .build();
            observer.on_stage_end(STAGE_REWRITE, &report);
            (sentences, joined)
        };

        // Stage 6: Highlight
        let highlighted = {
            trace_stage!(STAGE_HIGHLIGHT);
            observer.on_stage_start(STAGE_HIGHLIGHT);
            let clock = StageClock::start();
            let highlighted = highlight_keywords(keywords, &joined, self.config.highlight_top_n);
            observer.on_stage_end(STAGE_HIGHLIGHT, &StageReport::new(clock.elapsed()));
            highlighted
        };

        // Stage 7: Metrics
        let metrics = {
            trace_stage!(STAGE_METRICS);
            observer.on_stage_start(STAGE_METRICS);
            let clock = StageClock::start();
            let metrics = Metrics::compute(text, &highlighted);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(metrics.summary_word_count)
                .build();
            observer.on_stage_end(STAGE_METRICS, &report);
            metrics
        };

        Ok(SummaryOutput {
            summary: format!("{ADVISORY_NOTICE}{highlighted}"),
            metrics,
            topic,
            sentences,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
