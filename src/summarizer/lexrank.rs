//! LexRank sentence ranking
//!
//! Sentences are nodes; two sentences are joined when the cosine similarity
//! of their TF-IDF vectors exceeds a threshold. PageRank over that graph gives
//! each sentence a centrality score, and sentences are returned most central
//! first.

use rayon::prelude::*;

use super::unit_vector::{UnitVector, UnitVectorBuilder};
use crate::config::LexRankConfig;
use crate::errors::RankError;
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::nlp::tokenizer::Tokenizer;
use crate::pagerank::standard::StandardPageRank;
use crate::pipeline::traits::SentenceRanker;
use crate::types::{Document, RankedCandidate};

/// Documents with at least this many sentences compute similarities in parallel
const PARALLEL_SENTENCE_THRESHOLD: usize = 64;

/// Graph-centrality sentence ranker
#[derive(Debug, Clone, Default)]
pub struct LexRankRanker {
    config: LexRankConfig,
    tokenizer: Tokenizer,
}

impl LexRankRanker {
    pub fn new(config: LexRankConfig) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::default(),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Similarity edges `(i, j, sim)` with `i < j` and `sim > threshold`
    fn similarity_edges(&self, vectors: &[UnitVector]) -> Vec<(u32, u32, f64)> {
        let threshold = self.config.similarity_threshold;
        let row = |i: usize| -> Vec<(u32, u32, f64)> {
            ((i + 1)..vectors.len())
                .filter_map(|j| {
                    let sim = vectors[i].cosine_similarity(&vectors[j]);
                    (sim > threshold).then_some((i as u32, j as u32, sim))
                })
                .collect()
        };

        if vectors.len() < PARALLEL_SENTENCE_THRESHOLD {
            (0..vectors.len()).flat_map(row).collect()
        } else {
            (0..vectors.len()).into_par_iter().flat_map_iter(row).collect()
        }
    }

    /// Centrality score for every sentence, indexed by sentence position
    pub fn scores(&self, document: &Document) -> Result<Vec<f64>, RankError> {
        if document.is_empty() {
            return Err(RankError::EmptyDocument);
        }

        let tokens = self.tokenizer.tokenize(&document.sentences);
        let vectors = UnitVectorBuilder::from_tokens(&tokens, document.len()).build_all(&tokens);

        let mut builder = GraphBuilder::with_capacity(document.len());
        for sentence in &document.sentences {
            builder.push_node(&sentence.text);
        }
        for (i, j, sim) in self.similarity_edges(&vectors) {
            let weight = if self.config.continuous { sim } else { 1.0 };
            builder.increment_edge(i, j, weight);
        }
        tracing::debug!(
            sentences = builder.node_count(),
            edges = builder.edge_count(),
            "built sentence similarity graph"
        );

        let graph = CsrGraph::from_builder(&builder);
        let pagerank = StandardPageRank::new()
            .with_damping(self.config.damping)
            .with_max_iterations(self.config.max_iterations)
            .with_threshold(self.config.convergence_threshold);
        let result = if self.config.continuous {
            pagerank.run(&graph)
        } else {
            pagerank.run_unweighted(&graph)
        };

        if result.scores.iter().any(|s| !s.is_finite()) {
            return Err(RankError::DegenerateGraph(
                "centrality scores did not stay finite".into(),
            ));
        }
        if !result.converged {
            tracing::debug!(iterations = result.iterations, delta = result.delta, "lexrank did not converge");
        }

        Ok(result.scores)
    }
}

impl SentenceRanker for LexRankRanker {
    fn name(&self) -> &str {
        "lexrank"
    }

    fn rank(&self, document: &Document, count: usize) -> Result<Vec<RankedCandidate>, RankError> {
        let scores = self.scores(document)?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));

        Ok(order
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(rank, idx)| RankedCandidate {
                sentence: document.sentences[idx].clone(),
                rank,
                score: scores[idx],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(sentences: &[&str]) -> Document {
        Document::from_sentences(sentences.join(" "), sentences.iter().copied())
    }

    fn solar_document() -> Document {
        document(&[
            "Solar power is growing quickly worldwide.",
            "Cheap solar panels drive solar power adoption.",
            "Bakers in Paris start before dawn.",
            "Solar panels and batteries make solar power reliable.",
            "Grid operators now plan around solar power.",
        ])
    }

    #[test]
    fn test_empty_document_is_an_error() {
        let ranker = LexRankRanker::default();
        let err = ranker.rank(&Document::default(), 3).unwrap_err();
        assert_eq!(err, RankError::EmptyDocument);
    }

    #[test]
    fn test_rank_respects_count() {
        let ranker = LexRankRanker::default();
        let candidates = ranker.rank(&solar_document(), 2).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].rank, 0);
        assert_eq!(candidates[1].rank, 1);
        assert!(candidates[0].score >= candidates[1].score);
    }

    #[test]
    fn test_outlier_sentence_ranks_last() {
        let ranker = LexRankRanker::default();
        let candidates = ranker.rank(&solar_document(), 10).unwrap();

        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates[4].sentence.text, "Bakers in Paris start before dawn.");
    }

    #[test]
    fn test_single_sentence() {
        let ranker = LexRankRanker::default();
        let candidates = ranker.rank(&document(&["Only one sentence here."]), 5).unwrap();

        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_document_order() {
        let ranker = LexRankRanker::default();
        let doc = document(&["Alpha beta.", "Gamma delta.", "Epsilon zeta."]);
        let candidates = ranker.rank(&doc, 3).unwrap();

        let order: Vec<usize> = candidates.iter().map(|c| c.sentence.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_continuous_mode_ranks() {
        let config = LexRankConfig {
            continuous: true,
            ..LexRankConfig::default()
        };
        let candidates = LexRankRanker::new(config).rank(&solar_document(), 5).unwrap();
        assert_eq!(candidates[4].sentence.text, "Bakers in Paris start before dawn.");
    }

    #[test]
    fn test_large_document_uses_parallel_path() {
        let sentences: Vec<String> = (0..80)
            .map(|i| format!("Topic {} shares the common word orbit.", i % 7))
            .collect();
        let doc = Document::from_sentences(sentences.join(" "), &sentences);

        let candidates = LexRankRanker::default().rank(&doc, 8).unwrap();
        assert_eq!(candidates.len(), 8);
    }
}
