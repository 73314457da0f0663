//! Core data types shared across the summarization pipeline
//!
//! Everything here lives for a single invocation: a [`Document`] is built from
//! the request text, its [`Sentence`]s feed ranking and selection, and the
//! [`Phrase`]s produced by a keyphrase engine drive topic extraction and
//! highlighting.

use serde::{Deserialize, Serialize};

/// A word token produced by the word tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appears in the document
    pub text: String,
    /// Lowercased form used for graph nodes and term counts
    pub lemma: String,
    /// Byte offset of the token start within its sentence
    pub start: usize,
    /// Byte offset of the token end within its sentence
    pub end: usize,
    /// Index of the sentence containing this token
    pub sentence_idx: usize,
    /// Global token index within the document
    pub token_idx: usize,
    /// Whether this token is a stopword
    pub is_stopword: bool,
}

impl Token {
    /// Create a new token
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        start: usize,
        end: usize,
        sentence_idx: usize,
        token_idx: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            start,
            end,
            sentence_idx,
            token_idx,
            is_stopword: false,
        }
    }

    /// Whether this token can become a node in a ranking graph
    pub fn is_graph_candidate(&self) -> bool {
        !self.is_stopword && self.lemma.chars().any(|c| c.is_alphanumeric())
    }
}

/// A trimmed, non-empty sentence of the input document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text, trimmed
    pub text: String,
    /// Position of the sentence in the document
    pub index: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            index,
        }
    }
}

/// The input text together with its segmented sentences
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Raw text (already trimmed by the request boundary)
    pub text: String,
    /// Sentences in document order
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// Build a document from pre-segmented sentence texts
    ///
    /// Blank entries are dropped and the rest are trimmed, so every
    /// [`Sentence`] satisfies the non-empty invariant.
    pub fn from_sentences<I, S>(text: impl Into<String>, sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sentences = sentences
            .into_iter()
            .filter_map(|s| {
                let trimmed = s.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .enumerate()
            .map(|(index, text)| Sentence::new(text, index))
            .collect();

        Self {
            text: text.into(),
            sentences,
        }
    }

    /// The first sentence, if any
    pub fn first_sentence(&self) -> Option<&Sentence> {
        self.sentences.first()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A sentence chosen by a [`SentenceRanker`](crate::pipeline::traits::SentenceRanker)
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub sentence: Sentence,
    /// Zero-based rank position (0 is most salient)
    pub rank: usize,
    /// Centrality score, kept for diagnostics only
    pub score: f64,
}

/// A keyphrase with its salience score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    /// Phrase text as returned by the engine (lowercase for the built-in engines)
    pub text: String,
    /// Engine-specific score, higher is more salient
    pub score: f64,
    /// Number of occurrences in the source text
    pub count: usize,
}

impl Phrase {
    pub fn new(text: impl Into<String>, score: f64, count: usize) -> Self {
        Self {
            text: text.into(),
            score,
            count,
        }
    }

    /// Number of words in the phrase
    pub fn word_len(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
