//! TextRank keyphrase extraction
//!
//! Content words become nodes of a co-occurrence graph (edges join words
//! within `window` positions of each other in the same sentence). PageRank
//! scores the words, and each candidate phrase scores the sum of its word
//! scores.

use rustc_hash::FxHashMap;

use super::{phrase_runs, run_text};
use crate::errors::KeyphraseError;
use crate::graph::builder::build_graph_parallel;
use crate::graph::csr::CsrGraph;
use crate::nlp::segmenter::Segmenter;
use crate::nlp::tokenizer::Tokenizer;
use crate::pagerank::standard::StandardPageRank;
use crate::pipeline::traits::KeyphraseExtractor;
use crate::types::{Phrase, Token};

/// Graph-based keyphrase extractor
#[derive(Debug)]
pub struct TextRankExtractor {
    segmenter: Segmenter,
    tokenizer: Tokenizer,
    window: usize,
    pagerank: StandardPageRank,
}

impl Default for TextRankExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRankExtractor {
    /// Create an extractor with a co-occurrence window of 3
    pub fn new() -> Self {
        Self {
            segmenter: Segmenter::default(),
            tokenizer: Tokenizer::default(),
            window: 3,
            pagerank: StandardPageRank::default(),
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(2);
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_pagerank(mut self, pagerank: StandardPageRank) -> Self {
        self.pagerank = pagerank;
        self
    }

    /// Tokens of every sentence, with their sentence text
    fn tokenize(&self, text: &str) -> Vec<(String, Vec<Token>)> {
        let mut next_idx = 0;
        self.segmenter
            .split(text)
            .into_iter()
            .enumerate()
            .map(|(idx, sentence)| {
                let tokens = self.tokenizer.tokenize_text(&sentence, idx, next_idx);
                next_idx += tokens.len();
                (sentence, tokens)
            })
            .collect()
    }
}

impl KeyphraseExtractor for TextRankExtractor {
    fn name(&self) -> &str {
        "textrank"
    }

    fn extract(&self, text: &str) -> Result<Vec<Phrase>, KeyphraseError> {
        if text.trim().is_empty() {
            return Err(KeyphraseError::EmptyText);
        }

        let sentences = self.tokenize(text);
        let all_tokens: Vec<Token> = sentences
            .iter()
            .flat_map(|(_, tokens)| tokens.iter().cloned())
            .collect();

        let builder = build_graph_parallel(&all_tokens, self.window);
        if builder.is_empty() {
            return Ok(Vec::new());
        }
        let graph = CsrGraph::from_builder(&builder);
        let ranks = self.pagerank.run(&graph);
        tracing::trace!(
            nodes = graph.num_nodes,
            iterations = ranks.iterations,
            converged = ranks.converged,
            "textrank word graph ranked"
        );

        let word_score = |lemma: &str| -> f64 {
            builder
                .get_node_id(lemma)
                .map(|id| ranks.score(id))
                .unwrap_or(0.0)
        };

        let mut phrases: Vec<Phrase> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for (sentence, tokens) in &sentences {
            for run in phrase_runs(tokens, sentence) {
                let text = run_text(run);
                if let Some(&i) = index.get(&text) {
                    phrases[i].count += 1;
                    continue;
                }
                let score = run.iter().map(|t| word_score(&t.lemma)).sum();
                index.insert(text.clone(), phrases.len());
                phrases.push(Phrase::new(text, score, 1));
            }
        }

        phrases.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.text.cmp(&b.text)));
        Ok(phrases)
    }
}
