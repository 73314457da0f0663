//! # rapid-summary
//!
//! Extractive summarization: LexRank picks the most central sentences, a
//! selection pass seeds the summary with the document's opening sentence and
//! deduplicates, and keyphrases (RAKE or TextRank) drive topic labelling and
//! `<strong>` highlighting.
//!
//! ```no_run
//! use rapid_summary::Summarizer;
//!
//! rapid_summary::warm_up();
//! let out = Summarizer::new()
//!     .summarize("Cats are mammals. They sleep a lot. This is well known.", 2)
//!     .unwrap();
//! println!("{} ({}% shorter)", out.summary, out.metrics.reduction_percentage);
//! ```

pub mod config;
pub mod errors;
pub mod graph;
pub mod metrics;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod pipeline;
pub mod refine;
pub mod summarizer;
pub mod types;

pub use config::{KeywordEngine, LexRankConfig, SummaryConfig};
pub use errors::SummarizeError;
pub use metrics::Metrics;
pub use pipeline::request::{handle_json, handle_request, SummarizeRequest, SummarizeResponse};
pub use pipeline::runner::{Summarizer, SummaryOutput, ADVISORY_NOTICE};
pub use types::{Document, Phrase, RankedCandidate, Sentence, Token};

/// Build the lazily initialized stopword list and regexes up front
///
/// Call once at startup so the first request does not pay for it. Returns
/// the number of stopwords loaded.
pub fn warm_up() -> usize {
    nlp::segmenter::preload();
    let stopwords = nlp::stopwords::preload();
    tracing::debug!(stopwords, "warm-up complete");
    stopwords
}
