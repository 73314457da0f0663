//! Topic label extraction

use super::capitalize_first;
use crate::pipeline::traits::KeyphraseExtractor;

/// Label used whenever no keyphrase is available
pub const FALLBACK_TOPIC: &str = "This topic";

/// Derive a short topic label for `text` from its top-ranked keyphrase
///
/// Only the first letter is upper-cased; the engine's casing of the rest is
/// kept. Falls back to [`FALLBACK_TOPIC`] when the extractor is absent,
/// fails, or returns nothing usable.
pub fn extract_topic(extractor: Option<&dyn KeyphraseExtractor>, text: &str) -> String {
    let Some(extractor) = extractor else {
        return FALLBACK_TOPIC.to_string();
    };

    let phrases = match extractor.extract(text) {
        Ok(phrases) => phrases,
        Err(e) => {
            tracing::warn!(engine = extractor.name(), "topic extraction failed: {e}");
            return FALLBACK_TOPIC.to_string();
        }
    };

    match phrases.first().map(|p| p.text.trim()) {
        Some(top) if !top.is_empty() => capitalize_first(top),
        _ => FALLBACK_TOPIC.to_string(),
    }
}
