//! Keyphrase highlighting
//!
//! Keyphrases are extracted from the summary itself, so only phrases that
//! survived selection get marked. All phrases are matched in one pass with a
//! longest-first alternation: a short phrase nested inside a longer one can
//! never be wrapped separately, and no markup ever nests.

use regex::{Regex, RegexBuilder};

use crate::errors::KeyphraseError;
use crate::pipeline::traits::KeyphraseExtractor;

pub const OPEN_TAG: &str = "<strong>";
pub const CLOSE_TAG: &str = "</strong>";

/// Build the whole-word, case-insensitive matcher for `phrases`
///
/// Returns `Ok(None)` when there is nothing to match.
fn phrase_matcher<'a>(
    phrases: impl IntoIterator<Item = &'a str>,
) -> Result<Option<Regex>, KeyphraseError> {
    let mut phrases: Vec<&str> = phrases
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if phrases.is_empty() {
        return Ok(None);
    }

    // Stable sort keeps rank order among phrases of equal length
    phrases.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    phrases.dedup();

    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|e| KeyphraseError::Pattern(e.to_string()))
}

/// Wrap every occurrence of `phrases` in `text` with emphasis markup
pub fn highlight_phrases<'a>(
    text: &str,
    phrases: impl IntoIterator<Item = &'a str>,
) -> Result<String, KeyphraseError> {
    match phrase_matcher(phrases)? {
        Some(matcher) => Ok(matcher
            .replace_all(text, format!("{OPEN_TAG}${{0}}{CLOSE_TAG}").as_str())
            .into_owned()),
        None => Ok(text.to_string()),
    }
}

/// Highlight the top `top_n` keyphrases of `text`
///
/// Returns `text` unchanged when the extractor is absent, fails, or finds
/// nothing.
pub fn highlight_keywords(
    extractor: Option<&dyn KeyphraseExtractor>,
    text: &str,
    top_n: usize,
) -> String {
    let Some(extractor) = extractor else {
        return text.to_string();
    };
    if top_n == 0 || text.trim().is_empty() {
        return text.to_string();
    }

    let result = extractor.extract(text).and_then(|phrases| {
        tracing::debug!(
            engine = extractor.name(),
            found = phrases.len(),
            top_n,
            "highlighting keyphrases"
        );
        highlight_phrases(text, phrases.iter().take(top_n).map(|p| p.text.as_str()))
    });

    match result {
        Ok(highlighted) => highlighted,
        Err(e) => {
            tracing::warn!(engine = extractor.name(), "keyword highlighting failed: {e}");
            text.to_string()
        }
    }
}

/// Remove emphasis markup added by [`highlight_keywords`]
pub fn strip_highlights(text: &str) -> String {
    text.replace(OPEN_TAG, "").replace(CLOSE_TAG, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::rake::RakeExtractor;
    use crate::types::Phrase;

    struct Fixed(Vec<&'static str>);

    impl KeyphraseExtractor for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract(&self, _text: &str) -> Result<Vec<Phrase>, KeyphraseError> {
            Ok(self.0.iter().map(|t| Phrase::new(*t, 1.0, 1)).collect())
        }
    }

    #[test]
    fn test_wraps_every_occurrence_case_insensitively() {
        let out = highlight_phrases("Rust is fast. rust is safe.", ["rust"]).unwrap();
        assert_eq!(out, "<strong>Rust</strong> is fast. <strong>rust</strong> is safe.");
    }

    #[test]
    fn test_whole_words_only() {
        let out = highlight_phrases("Cat catalog cat.", ["cat"]).unwrap();
        assert_eq!(out, "<strong>Cat</strong> catalog <strong>cat</strong>.");
    }

    #[test]
    fn test_longer_phrase_wins_without_nesting() {
        let out =
            highlight_phrases("Solar power needs power lines.", ["power", "solar power"]).unwrap();
        assert_eq!(
            out,
            "<strong>Solar power</strong> needs <strong>power</strong> lines."
        );
        assert!(!out.contains("<strong><strong>"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let out = highlight_phrases("Use c.d here, not cxd.", ["c.d"]).unwrap();
        assert_eq!(out, "Use <strong>c.d</strong> here, not cxd.");
    }

    #[test]
    fn test_blank_phrases_ignored() {
        assert_eq!(highlight_phrases("Nothing here.", ["", "  "]).unwrap(), "Nothing here.");
    }

    #[test]
    fn test_top_n_limits_phrases() {
        let engine = Fixed(vec!["alpha", "beta", "gamma"]);
        let out = highlight_keywords(Some(&engine), "alpha beta gamma", 2);
        assert_eq!(out, "<strong>alpha</strong> <strong>beta</strong> gamma");
    }

    #[test]
    fn test_without_extractor_is_identity() {
        assert_eq!(highlight_keywords(None, "Plain text.", 5), "Plain text.");
    }

    #[test]
    fn test_strip_restores_input() {
        let text = "Quantum computing startups attract quantum computing investors. Investors wait.";
        let highlighted = highlight_keywords(Some(&RakeExtractor::new()), text, 5);
        assert!(highlighted.contains(OPEN_TAG));
        assert_eq!(strip_highlights(&highlighted), text);
    }
}
