//! Word counts and reduction metrics

use serde::Serialize;

/// Whitespace-delimited word count; 0 for blank text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Percentage of words removed, rounded half-to-even
///
/// Not clamped: a summary longer than its source yields a negative value.
/// An empty source yields 0.
pub fn reduction_percentage(original: usize, summary: usize) -> i64 {
    if original == 0 {
        return 0;
    }
    let ratio = (original as f64 - summary as f64) / original as f64;
    (ratio * 100.0).round_ties_even() as i64
}

/// The first `limit` words of `text`, with `...` appended when truncated
pub fn fallback_excerpt(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut excerpt = words[..words.len().min(limit)].join(" ");
    if words.len() > limit {
        excerpt.push_str("...");
    }
    excerpt
}

/// Word-count metrics of one summarization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub original_word_count: usize,
    pub summary_word_count: usize,
    pub reduction_percentage: i64,
}

impl Metrics {
    pub fn compute(original: &str, summary: &str) -> Self {
        let original_word_count = word_count(original);
        let summary_word_count = word_count(summary);
        Self {
            original_word_count,
            summary_word_count,
            reduction_percentage: reduction_percentage(original_word_count, summary_word_count),
        }
    }
}
