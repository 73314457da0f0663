//! PageRank algorithms
//!
//! Power-iteration PageRank shared by sentence ranking (LexRank) and
//! keyphrase ranking (TextRank).

pub mod standard;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// All nodes by descending score, ties broken by ascending node ID
    pub fn ranked(&self) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_breaks_ties_by_node_id() {
        let result = PageRankResult::new(vec![0.2, 0.4, 0.2, 0.2], 1, 0.0, true);

        let ids: Vec<u32> = result.ranked().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_score_out_of_range() {
        let result = PageRankResult::new(vec![1.0], 1, 0.0, true);
        assert_eq!(result.score(0), 1.0);
        assert_eq!(result.score(7), 0.0);
    }
}
