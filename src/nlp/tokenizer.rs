//! Word tokenization
//!
//! Splits sentences into Unicode words (UAX #29) and marks stopwords. Lemmas
//! are plain lowercase forms; there is no stemming.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::StopwordFilter;
use crate::types::{Sentence, Token};

/// Word tokenizer with stopword marking
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: StopwordFilter,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Tokenize a single piece of text as sentence `sentence_idx`
    ///
    /// `first_token_idx` lets callers keep token indices global across
    /// sentences.
    pub fn tokenize_text(&self, text: &str, sentence_idx: usize, first_token_idx: usize) -> Vec<Token> {
        text.unicode_word_indices()
            .enumerate()
            .map(|(i, (start, word))| {
                let mut token = Token::new(
                    word,
                    word.to_lowercase(),
                    start,
                    start + word.len(),
                    sentence_idx,
                    first_token_idx + i,
                );
                token.is_stopword = self.stopwords.is_stopword(&token.lemma);
                token
            })
            .collect()
    }

    /// Tokenize every sentence of a document
    pub fn tokenize(&self, sentences: &[Sentence]) -> Vec<Token> {
        let mut tokens = Vec::new();
        for sentence in sentences {
            let next = self.tokenize_text(&sentence.text, sentence.index, tokens.len());
            tokens.extend(next);
        }
        tokens
    }
}

/// Whether the text between two tokens breaks a phrase
///
/// Anything other than whitespace (commas, dashes, parentheses) counts as a
/// delimiter.
pub fn is_phrase_break(gap: &str) -> bool {
    gap.chars().any(|c| !c.is_whitespace())
}
