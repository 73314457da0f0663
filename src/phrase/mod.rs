//! Keyphrase extraction engines
//!
//! Both engines split sentences into candidate phrases the same way: maximal
//! runs of content words, broken by stopwords and punctuation. They differ
//! only in how words are scored.

pub mod rake;
pub mod textrank;

use crate::nlp::tokenizer::is_phrase_break;
use crate::types::Token;

/// Split one sentence's tokens into candidate phrase runs
///
/// `text` is the sentence the token offsets point into.
pub fn phrase_runs<'a>(tokens: &'a [Token], text: &str) -> Vec<&'a [Token]> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        if !token.is_graph_candidate() {
            if let Some(s) = start.take() {
                runs.push(&tokens[s..i]);
            }
            continue;
        }

        let broken = i > 0
            && text
                .get(tokens[i - 1].end..token.start)
                .is_some_and(is_phrase_break);
        if broken {
            if let Some(s) = start.take() {
                runs.push(&tokens[s..i]);
            }
        }
        start.get_or_insert(i);
    }

    if let Some(s) = start {
        runs.push(&tokens[s..]);
    }
    runs
}

/// Lowercase phrase text for a run of tokens
pub fn run_text(run: &[Token]) -> String {
    run.iter()
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
