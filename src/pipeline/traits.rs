//! Capability traits at the pipeline's seams.
//!
//! Sentence segmentation, sentence ranking and keyphrase extraction are all
//! pluggable. The assembler, topic extractor and highlighter only ever see
//! these traits, so an engine can be swapped without touching them.
//!
//! Every trait is `Send + Sync`: a [`Summarizer`](crate::pipeline::runner::Summarizer)
//! holds boxed engines and may be shared across request threads.

use std::panic::{self, AssertUnwindSafe};

use crate::errors::{KeyphraseError, RankError, SegmentError};
use crate::types::{Document, Phrase, RankedCandidate};

// ============================================================================
// SentenceTokenizer: primary segmentation strategy
// ============================================================================

/// Splits raw text into sentence strings.
///
/// Returning an error (or an empty list for non-blank text) makes the
/// [`Segmenter`](crate::nlp::segmenter::Segmenter) fall back to its regex
/// splitter.
pub trait SentenceTokenizer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn tokenize(&self, text: &str) -> Result<Vec<String>, SegmentError>;
}

// ============================================================================
// SentenceRanker: salience ordering of sentences
// ============================================================================

/// Orders a document's sentences by salience.
///
/// # Contract
///
/// - At most `count` candidates are returned.
/// - Candidates are in rank order; `rank` is the zero-based position.
/// - Callers treat ranking as best-effort: see [`rank_best_effort`].
pub trait SentenceRanker: Send + Sync {
    fn name(&self) -> &str;

    fn rank(&self, document: &Document, count: usize) -> Result<Vec<RankedCandidate>, RankError>;
}

/// Rank sentences, downgrading any failure to an empty list.
///
/// A panicking ranker counts as a failure too.
pub fn rank_best_effort(
    ranker: &dyn SentenceRanker,
    document: &Document,
    count: usize,
) -> Vec<RankedCandidate> {
    let Ok(result) = panic::catch_unwind(AssertUnwindSafe(|| ranker.rank(document, count))) else {
        tracing::warn!(ranker = ranker.name(), "sentence ranker panicked");
        return Vec::new();
    };

    match result {
        Ok(mut candidates) => {
            candidates.truncate(count);
            candidates
        }
        Err(e) => {
            tracing::warn!(ranker = ranker.name(), "sentence ranking failed: {e}");
            Vec::new()
        }
    }
}

// ============================================================================
// KeyphraseExtractor: ranked keyphrases of a text
// ============================================================================

/// Extracts keyphrases from text, most salient first.
///
/// The pipeline holds this capability as an `Option`; when it is `None`,
/// topic extraction and highlighting use their fixed fallbacks.
pub trait KeyphraseExtractor: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, text: &str) -> Result<Vec<Phrase>, KeyphraseError>;
}
