//! Error types
//!
//! Only [`SummarizeError`] ever reaches a caller. The stage errors below are
//! absorbed inside the pipeline and downgraded to a fallback value.

use serde::Serialize;
use thiserror::Error;

/// Caller-visible failure of a summarization request
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("No text provided")]
    EmptyInput,

    #[error("internal pipeline failure: {0}")]
    Internal(String),
}

impl SummarizeError {
    /// Whether the failure is the caller's fault rather than ours
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }
}

/// The primary sentence tokenizer could not segment the text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("sentence tokenizer unavailable: {0}")]
    Unavailable(String),

    #[error("sentence tokenizer failed: {0}")]
    Failed(String),
}

/// A sentence ranker could not produce candidates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankError {
    #[error("document has no sentences to rank")]
    EmptyDocument,

    #[error("ranking graph is degenerate: {0}")]
    DegenerateGraph(String),
}

/// A keyphrase engine could not extract phrases
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyphraseError {
    #[error("no text to extract keyphrases from")]
    EmptyText,

    #[error("keyphrase pattern could not be compiled: {0}")]
    Pattern(String),
}

/// Stable machine-readable code attached to every configuration diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    OutOfRange,
    InvalidValue,
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRange => "out_of_range",
            Self::InvalidValue => "invalid_value",
            Self::UnknownField => "unknown_field",
        }
    }
}

/// A single configuration problem: code, JSON pointer, message and fix hint
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("[{}] {path}: {message}", code.as_str())]
pub struct ConfigError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Loading a configuration file failed before validation could run
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<ConfigError>),
}
