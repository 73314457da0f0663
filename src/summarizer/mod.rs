//! Summarization components
//!
//! LexRank ranks sentences by centrality; the selector turns that ranking into
//! a deduplicated summary of the requested length.

pub mod lexrank;
pub mod selector;
pub mod unit_vector;
