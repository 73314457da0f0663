//! Summary sentence selection
//!
//! Builds the ordered sentence list of a summary from a document and its
//! ranked candidates:
//!
//! 1. The document's first sentence always leads.
//! 2. Ranked candidates follow in rank order, skipping blanks and repeats.
//! 3. Remaining document sentences pad the summary in document order.
//! 4. If nothing was found at all, the raw text is re-split on sentence
//!    punctuation and the first pieces are taken as-is.

use crate::nlp::segmenter::split_on_terminators;
use crate::types::{Document, RankedCandidate};

/// Where a selected sentence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// The document's first sentence
    Seed,
    /// A ranked candidate
    Ranked,
    /// Padding in document order
    DocumentOrder,
    /// Raw punctuation split of the text (nothing else was available)
    RawSplit,
}

/// Result of sentence selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Selected sentences in output order
    pub sentences: Vec<String>,
    /// Origin of each entry in `sentences`
    pub sources: Vec<SelectionSource>,
}

impl Selection {
    fn push(&mut self, sentence: &str, source: SelectionSource) {
        self.sentences.push(sentence.to_string());
        self.sources.push(source);
    }

    fn contains(&self, sentence: &str) -> bool {
        self.sentences.iter().any(|s| s == sentence)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Assembles a fixed-length summary from ranked candidates
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    /// Number of sentences to select (at least 1)
    num_sentences: usize,
}

impl Default for SentenceSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSelector {
    /// Create a selector for three sentences
    pub fn new() -> Self {
        Self { num_sentences: 3 }
    }

    /// Set number of sentences to select
    pub fn with_num_sentences(mut self, n: usize) -> Self {
        self.num_sentences = n.max(1);
        self
    }

    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    /// Whether ranked candidates are consulted at all
    pub fn needs_candidates(&self) -> bool {
        self.num_sentences > 1
    }

    /// Select summary sentences
    ///
    /// `candidates` must be in rank order. They are ignored when only one
    /// sentence is requested.
    pub fn select(&self, document: &Document, candidates: &[RankedCandidate]) -> Selection {
        let target = self.num_sentences;
        let mut selection = Selection::default();

        let seed = document.first_sentence().map(|s| s.text.as_str());
        if let Some(seed) = seed {
            selection.push(seed, SelectionSource::Seed);
        }

        if self.needs_candidates() {
            for candidate in candidates {
                if selection.len() >= target {
                    break;
                }
                let text = candidate.sentence.text.trim();
                if text.is_empty() || Some(text) == seed || selection.contains(text) {
                    continue;
                }
                selection.push(text, SelectionSource::Ranked);
            }
        }

        if selection.len() < target && document.len() > 1 {
            for sentence in &document.sentences[1..] {
                if selection.len() >= target {
                    break;
                }
                if !selection.contains(&sentence.text) {
                    selection.push(&sentence.text, SelectionSource::DocumentOrder);
                }
            }
        }

        if selection.is_empty() {
            for piece in split_on_terminators(&document.text).iter().take(target) {
                selection.push(piece, SelectionSource::RawSplit);
            }
        }

        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentence;

    fn document(sentences: &[&str]) -> Document {
        Document::from_sentences(sentences.join(" "), sentences.iter().copied())
    }

    fn ranked(doc: &Document, order: &[usize]) -> Vec<RankedCandidate> {
        order
            .iter()
            .enumerate()
            .map(|(rank, &idx)| RankedCandidate {
                sentence: doc.sentences[idx].clone(),
                rank,
                score: 1.0 / (rank + 1) as f64,
            })
            .collect()
    }

    #[test]
    fn test_seed_always_first() {
        let doc = document(&["First.", "Second.", "Third.", "Fourth."]);
        let candidates = ranked(&doc, &[3, 0, 2]);

        let selection = SentenceSelector::new().with_num_sentences(3).select(&doc, &candidates);

        assert_eq!(selection.sentences, vec!["First.", "Fourth.", "Third."]);
        assert_eq!(
            selection.sources,
            vec![SelectionSource::Seed, SelectionSource::Ranked, SelectionSource::Ranked]
        );
    }

    #[test]
    fn test_rank_order_not_document_order() {
        let doc = document(&["A.", "B.", "C.", "D."]);
        let candidates = ranked(&doc, &[3, 1]);

        let selection = SentenceSelector::new().with_num_sentences(3).select(&doc, &candidates);
        assert_eq!(selection.sentences, vec!["A.", "D.", "B."]);
    }

    #[test]
    fn test_single_sentence_ignores_candidates() {
        let doc = document(&["A.", "B.", "C."]);
        let candidates = ranked(&doc, &[2, 1]);

        let selection = SentenceSelector::new().with_num_sentences(1).select(&doc, &candidates);
        assert_eq!(selection.sentences, vec!["A."]);
    }

    #[test]
    fn test_duplicates_skipped() {
        let doc = document(&["Same.", "Other.", "Same.", "Other.", "Last."]);
        let candidates = ranked(&doc, &[2, 3, 1, 4]);

        let selection = SentenceSelector::new().with_num_sentences(5).select(&doc, &candidates);

        assert_eq!(selection.sentences, vec!["Same.", "Other.", "Last."]);
    }

    #[test]
    fn test_blank_candidates_skipped() {
        let doc = document(&["A.", "B."]);
        let candidates = vec![RankedCandidate {
            sentence: Sentence::new("   ", 7),
            rank: 0,
            score: 1.0,
        }];

        let selection = SentenceSelector::new().with_num_sentences(2).select(&doc, &candidates);
        assert_eq!(selection.sentences, vec!["A.", "B."]);
        assert_eq!(selection.sources[1], SelectionSource::DocumentOrder);
    }

    #[test]
    fn test_pads_in_document_order_when_ranking_failed() {
        let doc = document(&["A.", "B.", "C.", "D."]);

        let selection = SentenceSelector::new().with_num_sentences(3).select(&doc, &[]);
        assert_eq!(selection.sentences, vec!["A.", "B.", "C."]);
    }

    #[test]
    fn test_short_document() {
        let doc = document(&["Only.", "Two."]);

        let selection = SentenceSelector::new().with_num_sentences(5).select(&doc, &[]);
        assert_eq!(selection.sentences, vec!["Only.", "Two."]);
    }

    #[test]
    fn test_raw_split_when_no_sentences() {
        let doc = Document {
            text: "Alpha! Beta? Gamma.".to_string(),
            sentences: Vec::new(),
        };

        let selection = SentenceSelector::new().with_num_sentences(2).select(&doc, &[]);
        assert_eq!(selection.sentences, vec!["Alpha!", "Beta?"]);
        assert!(selection.sources.iter().all(|s| *s == SelectionSource::RawSplit));
    }

    #[test]
    fn test_empty_document() {
        let selection = SentenceSelector::new().select(&Document::default(), &[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_zero_clamped_to_one() {
        assert_eq!(SentenceSelector::new().with_num_sentences(0).num_sentences(), 1);
    }
}
