//! Post-selection refinement passes
//!
//! Applied to an assembled summary in order: the topic label is derived from
//! the whole document, the opening sentence is rewritten with it when it
//! starts vaguely, and the joined summary gets its keyphrases highlighted.
//! Every pass degrades to a fixed fallback instead of failing.

pub mod highlight;
pub mod opener;
pub mod topic;

pub use highlight::{highlight_keywords, strip_highlights};
pub use opener::rewrite_opening;
pub use topic::{extract_topic, FALLBACK_TOPIC};

/// Upper-case the first character, leaving the rest untouched
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("machine learning"), "Machine learning");
        assert_eq!(capitalize_first("iPhone sales"), "IPhone sales");
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first(""), "");
    }
}
