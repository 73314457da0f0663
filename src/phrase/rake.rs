//! RAKE (Rapid Automatic Keyword Extraction)
//!
//! Candidate phrases are runs of content words. Each word is scored by
//! `degree / frequency`, where degree counts the words it co-occurs with
//! inside candidate phrases (itself included). A phrase scores the sum of its
//! word scores, so long phrases of well-connected words rank first.

use rustc_hash::FxHashMap;

use super::{phrase_runs, run_text};
use crate::errors::KeyphraseError;
use crate::nlp::segmenter::Segmenter;
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::traits::KeyphraseExtractor;
use crate::types::{Phrase, Token};

/// RAKE keyphrase extractor
#[derive(Debug, Default)]
pub struct RakeExtractor {
    segmenter: Segmenter,
    tokenizer: Tokenizer,
    /// Candidate phrases longer than this are discarded
    max_words: Option<usize>,
}

impl RakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = Some(max_words);
        self
    }

    /// All candidate phrase occurrences, in text order
    fn candidates(&self, text: &str) -> Vec<Vec<Token>> {
        let mut out = Vec::new();
        for (idx, sentence) in self.segmenter.split(text).iter().enumerate() {
            let tokens = self.tokenizer.tokenize_text(sentence, idx, 0);
            for run in phrase_runs(&tokens, sentence) {
                if self.max_words.is_some_and(|max| run.len() > max) {
                    continue;
                }
                out.push(run.to_vec());
            }
        }
        out
    }
}

impl KeyphraseExtractor for RakeExtractor {
    fn name(&self) -> &str {
        "rake"
    }

    fn extract(&self, text: &str) -> Result<Vec<Phrase>, KeyphraseError> {
        if text.trim().is_empty() {
            return Err(KeyphraseError::EmptyText);
        }

        let candidates = self.candidates(text);

        let mut frequency: FxHashMap<&str, f64> = FxHashMap::default();
        let mut degree: FxHashMap<&str, f64> = FxHashMap::default();
        for phrase in &candidates {
            for token in phrase {
                *frequency.entry(token.lemma.as_str()).or_insert(0.0) += 1.0;
                *degree.entry(token.lemma.as_str()).or_insert(0.0) += phrase.len() as f64;
            }
        }

        let word_score = |lemma: &str| -> f64 {
            let freq = frequency.get(lemma).copied().unwrap_or(0.0);
            if freq == 0.0 {
                return 0.0;
            }
            degree.get(lemma).copied().unwrap_or(0.0) / freq
        };

        let mut phrases: Vec<Phrase> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for phrase in &candidates {
            let text = run_text(phrase);
            if let Some(&i) = index.get(&text) {
                phrases[i].count += 1;
                continue;
            }
            let score = phrase.iter().map(|t| word_score(&t.lemma)).sum();
            index.insert(text.clone(), phrases.len());
            phrases.push(Phrase::new(text, score, 1));
        }

        phrases.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| b.text.cmp(&a.text)));
        Ok(phrases)
    }
}
