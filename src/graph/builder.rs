//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. Nodes are either word lemmas
//! (keyphrase graphs) or sentences (LexRank graphs).

use crate::types::Token;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The label for this node (a lemma or a sentence)
    pub label: String,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps label -> first node ID carrying it
    label_to_id: FxHashMap<String, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            label_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            label_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given label, returning its ID
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }
        self.push_node(label)
    }

    /// Always create a new node, even if the label already exists
    ///
    /// Sentence graphs need this: two identical sentences are still two nodes.
    pub fn push_node(&mut self, label: &str) -> u32 {
        let id = self.nodes.len() as u32;
        self.label_to_id.entry(label.to_string()).or_insert(id);
        self.nodes.push(BuilderNode::new(label));
        id
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build a co-occurrence graph from tokens using a sliding window
    ///
    /// Only graph candidates (non-stopword content words) become nodes, and
    /// edges never cross sentence boundaries.
    pub fn from_tokens(tokens: &[Token], window_size: usize) -> Self {
        let mut builder = Self::with_capacity(tokens.len() / 2);

        let candidates: Vec<_> = tokens
            .iter()
            .filter(|t| t.is_graph_candidate())
            .collect();

        let mut i = 0;
        while i < candidates.len() {
            let sent_idx = candidates[i].sentence_idx;

            let sent_start = i;
            while i < candidates.len() && candidates[i].sentence_idx == sent_idx {
                i += 1;
            }
            let sent_end = i;

            for j in sent_start..sent_end {
                let node_j = builder.get_or_create_node(&candidates[j].lemma);

                // Window extends forward
                for k in (j + 1)..std::cmp::min(j + window_size, sent_end) {
                    let node_k = builder.get_or_create_node(&candidates[k].lemma);
                    builder.increment_edge(node_j, node_k, 1.0);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by label
    pub fn get_node_id(&self, label: &str) -> Option<u32> {
        self.label_to_id.get(label).copied()
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build a co-occurrence graph from tokens in parallel (for large documents)
///
/// This builds per-sentence edge maps in parallel and then merges them.
pub fn build_graph_parallel(tokens: &[Token], window_size: usize) -> GraphBuilder {
    // For small documents, sequential is faster
    if tokens.len() < 1000 {
        return GraphBuilder::from_tokens(tokens, window_size);
    }

    let mut sentences: Vec<Vec<&Token>> = Vec::new();
    let mut current_sent = Vec::new();
    let mut current_idx = None;

    for token in tokens.iter().filter(|t| t.is_graph_candidate()) {
        if current_idx != Some(token.sentence_idx) {
            if !current_sent.is_empty() {
                sentences.push(std::mem::take(&mut current_sent));
            }
            current_idx = Some(token.sentence_idx);
        }
        current_sent.push(token);
    }
    if !current_sent.is_empty() {
        sentences.push(current_sent);
    }

    let partial_graphs: Vec<FxHashMap<(String, String), f64>> = sentences
        .par_iter()
        .map(|sent_tokens| {
            let mut edges = FxHashMap::default();
            for i in 0..sent_tokens.len() {
                for j in (i + 1)..std::cmp::min(i + window_size, sent_tokens.len()) {
                    let (a, b) = if sent_tokens[i].lemma <= sent_tokens[j].lemma {
                        (sent_tokens[i].lemma.clone(), sent_tokens[j].lemma.clone())
                    } else {
                        (sent_tokens[j].lemma.clone(), sent_tokens[i].lemma.clone())
                    };
                    if a != b {
                        *edges.entry((a, b)).or_insert(0.0) += 1.0;
                    }
                }
            }
            edges
        })
        .collect();

    // Seed nodes in token order so IDs stay deterministic
    let mut builder = GraphBuilder::new();
    for sent_tokens in &sentences {
        for token in sent_tokens {
            builder.get_or_create_node(&token.lemma);
        }
    }

    for partial in partial_graphs {
        let mut edges: Vec<_> = partial.into_iter().collect();
        edges.sort_by(|x, y| x.0.cmp(&y.0));
        for ((a, b), weight) in edges {
            let id_a = builder.get_or_create_node(&a);
            let id_b = builder.get_or_create_node(&b);
            builder.increment_edge(id_a, id_b, weight);
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(text: &str, sent_idx: usize, tok_idx: usize) -> Token {
        Token::new(text, text.to_lowercase(), 0, text.len(), sent_idx, tok_idx)
    }

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("machine");
        let id_b = builder.get_or_create_node("learning");
        let id_c = builder.get_or_create_node("machine"); // duplicate

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_push_node_allows_duplicate_labels() {
        let mut builder = GraphBuilder::new();

        let first = builder.push_node("Same sentence.");
        let second = builder.push_node("Same sentence.");

        assert_ne!(first, second);
        assert_eq!(builder.node_count(), 2);
        assert_eq!(builder.get_node_id("Same sentence."), Some(first));
    }

    #[test]
    fn test_edge_incrementing() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node("machine");
        let id_b = builder.get_or_create_node("learning");

        builder.increment_edge(id_a, id_b, 1.0);
        builder.increment_edge(id_a, id_b, 1.0);

        assert_eq!(builder.get_node(id_a).unwrap().edges.get(&id_b), Some(&2.0));
        assert_eq!(builder.get_node(id_b).unwrap().edges.get(&id_a), Some(&2.0));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_from_tokens_skips_stopwords() {
        let mut tokens = vec![
            make_token("machine", 0, 0),
            make_token("learning", 0, 1),
            make_token("is", 0, 2),
            make_token("great", 0, 3),
        ];
        tokens[2].is_stopword = true;

        let builder = GraphBuilder::from_tokens(&tokens, 3);

        assert_eq!(builder.node_count(), 3);
        assert!(builder.get_node_id("is").is_none());
        let machine = builder.get_node_id("machine").unwrap();
        assert!(!builder.get_node(machine).unwrap().edges.is_empty());
    }

    #[test]
    fn test_no_cross_sentence_edges() {
        let tokens = vec![
            make_token("machine", 0, 0),
            make_token("learning", 0, 1),
            make_token("deep", 1, 2),
            make_token("neural", 1, 3),
        ];

        let builder = GraphBuilder::from_tokens(&tokens, 3);

        let learning_id = builder.get_node_id("learning").unwrap();
        let deep_id = builder.get_node_id("deep").unwrap();
        let learning_node = builder.get_node(learning_id).unwrap();
        assert!(!learning_node.edges.contains_key(&deep_id));
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::new();
        let id_a = builder.get_or_create_node("test");

        builder.increment_edge(id_a, id_a, 1.0);

        let node = builder.get_node(id_a).unwrap();
        assert!(node.edges.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let words = ["graph", "rank", "node", "edge", "score", "walk", "damping"];
        let tokens: Vec<Token> = (0..1400)
            .map(|i| make_token(words[i % words.len()], i / 14, i))
            .collect();

        let sequential = GraphBuilder::from_tokens(&tokens, 3);
        let parallel = build_graph_parallel(&tokens, 3);

        assert_eq!(sequential.node_count(), parallel.node_count());
        assert_eq!(sequential.edge_count(), parallel.edge_count());
        for (_, node) in sequential.nodes() {
            let id = parallel.get_node_id(&node.label).unwrap();
            let other = parallel.get_node(id).unwrap();
            let total: f64 = node.edges.values().sum();
            let other_total: f64 = other.edges.values().sum();
            assert!((total - other_total).abs() < 1e-9);
        }
    }
}
