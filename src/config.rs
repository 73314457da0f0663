//! Summarizer configuration
//!
//! All knobs default to the values the pipeline was tuned with. A config can
//! be loaded from JSON; unknown fields are captured so validation can flag
//! them (as warnings, or errors in strict mode).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigLoadError;
use crate::pipeline::validation::ValidationEngine;

/// Which keyphrase engine backs topic extraction and highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordEngine {
    /// Rapid Automatic Keyword Extraction
    #[default]
    Rake,
    /// Co-occurrence graph + PageRank
    #[serde(rename = "textrank", alias = "text_rank")]
    TextRank,
    /// Keyphrase capability disabled
    None,
}

impl KeywordEngine {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "rake" => Some(Self::Rake),
            "textrank" | "text_rank" => Some(Self::TextRank),
            "none" | "off" | "disabled" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rake => "rake",
            Self::TextRank => "textrank",
            Self::None => "none",
        }
    }
}

impl std::str::FromStr for KeywordEngine {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| format!("unknown keyword engine \"{value}\""))
    }
}

/// LexRank sentence ranking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexRankConfig {
    /// Minimum cosine similarity for two sentences to share an edge
    pub similarity_threshold: f64,
    /// PageRank damping factor
    pub damping: f64,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
    /// Weight edges by similarity instead of treating them as binary
    pub continuous: bool,
}

impl Default for LexRankConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.1,
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            continuous: false,
        }
    }
}

/// Top-level summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Sentence count used when the request omits one or sends garbage
    pub default_sentence_count: usize,
    /// Lower bound on how many candidates are requested from the ranker
    pub min_candidates: usize,
    /// Extra candidates requested beyond the target length, to survive dedup
    pub candidate_padding: usize,
    /// Number of keyphrases highlighted in the summary
    pub highlight_top_n: usize,
    /// Words kept when the summary comes out blank
    pub fallback_word_limit: usize,
    pub keyword_engine: KeywordEngine,
    pub lexrank: LexRankConfig,
    /// Co-occurrence window for the TextRank keyphrase engine
    pub textrank_window: usize,
    /// Unknown fields are errors instead of warnings
    pub strict: bool,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            default_sentence_count: 3,
            min_candidates: 5,
            candidate_padding: 3,
            highlight_top_n: 5,
            fallback_word_limit: 40,
            keyword_engine: KeywordEngine::Rake,
            lexrank: LexRankConfig::default(),
            textrank_window: 3,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl SummaryConfig {
    /// Number of candidates to request from the ranker for a target length
    pub fn candidate_budget(&self, requested: usize) -> usize {
        self.min_candidates
            .max(requested.saturating_add(self.candidate_padding))
    }

    /// Parse and validate a JSON config
    ///
    /// Warnings are logged; any error-severity diagnostic rejects the config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(json)?;
        let report = ValidationEngine::with_defaults().validate(&config);

        for warning in report.warnings() {
            tracing::warn!("config: {warning}");
        }
        if report.has_errors() {
            return Err(ConfigLoadError::Invalid(report.errors().cloned().collect()));
        }

        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.default_sentence_count, 3);
        assert_eq!(config.highlight_top_n, 5);
        assert_eq!(config.keyword_engine, KeywordEngine::Rake);
        assert!(!config.lexrank.continuous);
    }

    #[test]
    fn test_candidate_budget() {
        let config = SummaryConfig::default();
        assert_eq!(config.candidate_budget(1), 5);
        assert_eq!(config.candidate_budget(2), 5);
        assert_eq!(config.candidate_budget(3), 6);
        assert_eq!(config.candidate_budget(10), 13);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SummaryConfig::from_json_str(r#"{ "highlight_top_n": 3, "lexrank": { "continuous": true } }"#)
                .unwrap();
        assert_eq!(config.highlight_top_n, 3);
        assert!(config.lexrank.continuous);
        assert_eq!(config.lexrank.damping, 0.85);
        assert_eq!(config.min_candidates, 5);
    }

    #[test]
    fn test_keyword_engine_from_json() {
        let config = SummaryConfig::from_json_str(r#"{ "keyword_engine": "textrank" }"#).unwrap();
        assert_eq!(config.keyword_engine, KeywordEngine::TextRank);

        let legacy = SummaryConfig::from_json_str(r#"{ "keyword_engine": "text_rank" }"#).unwrap();
        assert_eq!(legacy.keyword_engine, KeywordEngine::TextRank);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["keyword_engine"], "textrank");
        assert_eq!(KeywordEngine::TextRank.as_str(), "textrank");
    }

    #[test]
    fn test_keyword_engine_from_str() {
        assert_eq!("RAKE".parse::<KeywordEngine>(), Ok(KeywordEngine::Rake));
        assert_eq!("textrank".parse::<KeywordEngine>(), Ok(KeywordEngine::TextRank));
        assert_eq!("off".parse::<KeywordEngine>(), Ok(KeywordEngine::None));
        assert!("yake".parse::<KeywordEngine>().is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = SummaryConfig::from_json_str(r#"{ "lexrank": { "damping": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(ref errs) if errs.len() == 1));
    }

    #[test]
    fn test_strict_unknown_field_rejected() {
        assert!(SummaryConfig::from_json_str(r#"{ "bogus": 1 }"#).is_ok());
        assert!(SummaryConfig::from_json_str(r#"{ "bogus": 1, "strict": true }"#).is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, r#"{ "fallback_word_limit": 10 }"#).unwrap();

        let config = SummaryConfig::from_path(&path).unwrap();
        assert_eq!(config.fallback_word_limit, 10);
    }
}
