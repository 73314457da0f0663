//! Opening-sentence rewriting
//!
//! A summary that starts with a dangling reference ("It", "However", ...)
//! reads badly out of context. The first sentence is rewritten to lead with
//! the topic label instead; interior sentences are never touched.

use super::capitalize_first;

/// First words that refer back to context the summary may have dropped
pub const VAGUE_OPENERS: &[&str] = &[
    "it", "this", "they", "these", "those", "despite", "however", "but", "although", "though",
    "while", "yet",
];

/// Whether `sentence` starts with one of [`VAGUE_OPENERS`]
pub fn opens_vaguely(sentence: &str) -> bool {
    let Some(first) = sentence.split_whitespace().next() else {
        return false;
    };
    let word = first
        .to_lowercase()
        .trim_end_matches(['.', ',', ';', ':'])
        .to_string();
    VAGUE_OPENERS.contains(&word.as_str())
}

/// Lower-case the first character if it is upper-case
fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => first.to_lowercase().chain(chars).collect(),
        Some(first) => std::iter::once(first).chain(chars).collect(),
        None => String::new(),
    }
}

/// Rewrite the first summary sentence when it opens vaguely
///
/// `"However, prices rose."` with topic `"Oil"` becomes
/// `"Oil, however, prices rose."`.
pub fn rewrite_opening(mut summary: Vec<String>, topic: &str) -> Vec<String> {
    let Some(first) = summary.first_mut() else {
        return summary;
    };
    if first.trim().is_empty() || !opens_vaguely(first) {
        return summary;
    }

    let rewritten = format!("{topic}, {}", lower_first(first));
    *first = capitalize_first(&rewritten);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(sentences: &[&str]) -> Vec<String> {
        sentences.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_vague_opener_rewritten() {
        let out = rewrite_opening(summary(&["It orbits the sun.", "Mars is red."]), "Mars");
        assert_eq!(out, summary(&["Mars, it orbits the sun.", "Mars is red."]));
    }

    #[test]
    fn test_trailing_punctuation_stripped() {
        let out = rewrite_opening(summary(&["However, costs fell."]), "Solar power");
        assert_eq!(out, summary(&["Solar power, however, costs fell."]));
    }

    #[test]
    fn test_lowercase_topic_capitalized() {
        let out = rewrite_opening(summary(&["This matters."]), "batteries");
        assert_eq!(out[0], "Batteries, this matters.");
    }

    #[test]
    fn test_other_openers_untouched() {
        let input = summary(&["Cats are mammals.", "They sleep a lot."]);
        assert_eq!(rewrite_opening(input.clone(), "Cats"), input);
    }

    #[test]
    fn test_interior_sentences_untouched() {
        let input = summary(&["Dogs bark.", "It is loud."]);
        assert_eq!(rewrite_opening(input.clone(), "Dogs"), input);
    }

    #[test]
    fn test_prefix_of_vague_word_is_not_vague() {
        assert!(!opens_vaguely("Items were sold."));
        assert!(!opens_vaguely("Butter melts."));
        assert!(opens_vaguely("YET another delay."));
        assert!(opens_vaguely("these: apples."));
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(rewrite_opening(Vec::new(), "Topic").is_empty());
        let blank = summary(&["   ", "It rains."]);
        assert_eq!(rewrite_opening(blank.clone(), "Topic"), blank);
    }
}
