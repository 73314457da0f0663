//! Sentence segmentation
//!
//! The primary tokenizer follows Unicode sentence boundaries (UAX #29) and then
//! re-joins pieces that were cut after a known abbreviation. When the primary
//! tokenizer is missing, fails, or finds nothing, text is split on whitespace
//! that follows `.`, `!` or `?`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::errors::SegmentError;
use crate::pipeline::traits::SentenceTokenizer;
use crate::types::Document;

static TERMINATOR_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("terminator pattern is valid"));

/// Force the fallback splitter's pattern to compile
pub(crate) fn preload() {
    Lazy::force(&TERMINATOR_GAP);
}

const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "vs.", "etc.", "inc.",
    "ltd.", "co.", "corp.", "no.", "fig.", "al.", "approx.", "dept.", "est.", "gen.", "gov.",
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.",
    "dec.",
];

/// Split on whitespace following sentence-final punctuation
///
/// Never fails. Blank pieces are dropped and the rest trimmed.
pub fn split_on_terminators(text: &str) -> Vec<String> {
    let text = text.trim();
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in TERMINATOR_GAP.find_iter(text) {
        // Terminators are ASCII, so the piece ends one byte into the match.
        pieces.push(&text[last..m.start() + 1]);
        last = m.end();
    }
    pieces.push(&text[last..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// UAX #29 sentence tokenizer with abbreviation repair
#[derive(Debug, Clone)]
pub struct UnicodeSentenceTokenizer {
    abbreviations: FxHashSet<String>,
}

impl Default for UnicodeSentenceTokenizer {
    fn default() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UnicodeSentenceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add abbreviations that must not end a sentence (e.g. `"approx."`)
    pub fn with_abbreviations(mut self, words: &[&str]) -> Self {
        self.abbreviations
            .extend(words.iter().map(|w| w.to_lowercase()));
        self
    }

    /// Whether the break between `text` and `next` was cut after an abbreviation
    ///
    /// Listed abbreviations always continue. Initials ("J.") and dotted forms
    /// ("e.g.") only continue into a piece that starts lowercase or with a
    /// digit; numbers ("2.5.") never do.
    fn continues_into(&self, text: &str, next: &str) -> bool {
        let Some(last) = text.split_whitespace().last() else {
            return false;
        };
        if !last.ends_with('.') {
            return false;
        }

        let lower = last.trim_start_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        if lower.len() < 2 {
            return false;
        }
        if self.abbreviations.contains(&lower) {
            return true;
        }

        let body = &lower[..lower.len() - 1];
        if body.chars().any(char::is_numeric) {
            return false;
        }
        let is_initial = body.chars().count() == 1 && body.chars().all(char::is_alphabetic);
        let is_dotted = body.contains('.') && body.split('.').all(|p| p.chars().count() <= 2);

        (is_initial || is_dotted)
            && next
                .trim_start()
                .chars()
                .next()
                .is_some_and(|c| c.is_lowercase() || c.is_numeric())
    }
}

impl SentenceTokenizer for UnicodeSentenceTokenizer {
    fn name(&self) -> &str {
        "unicode"
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>, SegmentError> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        let mut pieces = text.split_sentence_bounds().peekable();
        while let Some(piece) = pieces.next() {
            pending.push_str(piece);
            if let Some(next) = pieces.peek() {
                if self.continues_into(pending.trim_end(), next) {
                    continue;
                }
            }
            let trimmed = pending.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            pending.clear();
        }

        Ok(sentences)
    }
}

/// Sentence segmenter with a regex fallback
pub struct Segmenter {
    primary: Option<Box<dyn SentenceTokenizer>>,
}

impl fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segmenter")
            .field("primary", &self.primary.as_ref().map(|t| t.name()))
            .finish()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::with_tokenizer(UnicodeSentenceTokenizer::default())
    }
}

impl Segmenter {
    /// Segmenter that always uses the regex splitter
    pub fn fallback_only() -> Self {
        Self { primary: None }
    }

    pub fn with_tokenizer(tokenizer: impl SentenceTokenizer + 'static) -> Self {
        Self {
            primary: Some(Box::new(tokenizer)),
        }
    }

    /// Split text into trimmed, non-empty sentences
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        if let Some(primary) = &self.primary {
            match primary.tokenize(text) {
                Ok(sentences) => {
                    let sentences: Vec<String> = sentences
                        .into_iter()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                    if !sentences.is_empty() {
                        return sentences;
                    }
                    tracing::debug!(tokenizer = primary.name(), "no sentences found, using fallback splitter");
                }
                Err(e) => {
                    tracing::warn!(tokenizer = primary.name(), "sentence tokenizer failed, using fallback splitter: {e}");
                }
            }
        }

        split_on_terminators(text)
    }

    /// Segment text into a [`Document`]
    pub fn segment(&self, text: &str) -> Document {
        Document::from_sentences(text, self.split(text))
    }
}
