//! TF-IDF unit vectors for sentences
//!
//! Each sentence becomes a sparse vector over its non-stopword lemmas,
//! weighted by `tf / max_tf * idf` and normalized to unit length so cosine
//! similarity reduces to a dot product.

use crate::types::Token;
use rustc_hash::FxHashMap;

/// A sparse unit vector representation of a sentence
#[derive(Debug, Clone, Default)]
pub struct UnitVector {
    /// Non-zero dimensions: lemma -> weight
    pub dimensions: FxHashMap<String, f64>,
    /// L2 norm of the vector before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions
    pub fn from_dimensions(mut dimensions: FxHashMap<String, f64>) -> Self {
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Compute L2 norm
    fn compute_norm(dimensions: &FxHashMap<String, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        // Iterate the smaller map
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .dimensions
            .iter()
            .filter_map(|(key, value)| large.dimensions.get(key).map(|o| value * o))
            .sum()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

/// Builds TF-IDF unit vectors for every sentence of a document
#[derive(Debug, Clone)]
pub struct UnitVectorBuilder {
    /// lemma -> smoothed inverse document frequency
    idf: FxHashMap<String, f64>,
    num_sentences: usize,
}

impl UnitVectorBuilder {
    /// Compute document frequencies from tokens
    ///
    /// Sentences are the "documents" for IDF purposes.
    pub fn from_tokens(tokens: &[Token], num_sentences: usize) -> Self {
        let mut df: FxHashMap<&str, usize> = FxHashMap::default();
        let mut last_seen: FxHashMap<&str, usize> = FxHashMap::default();

        for token in tokens.iter().filter(|t| t.is_graph_candidate()) {
            let lemma = token.lemma.as_str();
            if last_seen.get(lemma) != Some(&token.sentence_idx) {
                last_seen.insert(lemma, token.sentence_idx);
                *df.entry(lemma).or_insert(0) += 1;
            }
        }

        let n = num_sentences.max(1) as f64;
        let idf = df
            .into_iter()
            .map(|(lemma, count)| (lemma.to_string(), (1.0 + n / count as f64).ln()))
            .collect();

        Self { idf, num_sentences }
    }

    /// Inverse document frequency of a lemma (0 for unseen lemmas)
    pub fn idf(&self, lemma: &str) -> f64 {
        self.idf.get(lemma).copied().unwrap_or(0.0)
    }

    /// Build one vector per sentence, indexed by sentence index
    pub fn build_all(&self, tokens: &[Token]) -> Vec<UnitVector> {
        let mut term_freqs: Vec<FxHashMap<&str, f64>> = vec![FxHashMap::default(); self.num_sentences];

        for token in tokens.iter().filter(|t| t.is_graph_candidate()) {
            if let Some(tf) = term_freqs.get_mut(token.sentence_idx) {
                *tf.entry(token.lemma.as_str()).or_insert(0.0) += 1.0;
            }
        }

        term_freqs
            .into_iter()
            .map(|tf| {
                let max_tf = tf.values().copied().fold(0.0, f64::max);
                let dimensions = tf
                    .into_iter()
                    .map(|(lemma, count)| (lemma.to_string(), count / max_tf * self.idf(lemma)))
                    .filter(|(_, weight)| *weight > 0.0)
                    .collect();
                UnitVector::from_dimensions(dimensions)
            })
            .collect()
    }
}
