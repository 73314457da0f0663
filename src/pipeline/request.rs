//! Request/response boundary.
//!
//! Requests are read leniently from loose JSON: the text may arrive as
//! `text` or `paragraph`, the sentence count as `sentenceCount` or
//! `sentences`, and a count that is missing, unparseable, or below 1 becomes
//! the default. Every outcome, including a panic inside the pipeline, maps to
//! one of three response shapes.
//!
//! # JSON shape
//!
//! ```json
//! { "text": "Cats are mammals. They sleep a lot.", "sentenceCount": "2" }
//! ```

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::runner::Summarizer;
use crate::errors::SummarizeError;

const TEXT_KEYS: [&str; 2] = ["text", "paragraph"];
const COUNT_KEYS: [&str; 2] = ["sentenceCount", "sentences"];

/// Error message of the client-error shape
pub const NO_TEXT_MESSAGE: &str = "No text provided";
/// Error message of the internal-failure shape
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// A normalized summarization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeRequest {
    /// Trimmed text; empty when none was supplied
    pub text: String,
    /// Requested sentence count, always at least 1
    pub sentence_count: usize,
}

impl SummarizeRequest {
    pub fn new(text: impl Into<String>, sentence_count: usize) -> Self {
        Self {
            text: text.into().trim().to_string(),
            sentence_count: sentence_count.max(1),
        }
    }

    /// Read a request from a JSON value, coercing loose fields
    pub fn from_value(value: &Value, default_count: usize) -> Self {
        let text = TEXT_KEYS
            .iter()
            .filter_map(|key| value.get(key).and_then(Value::as_str))
            .map(str::trim)
            .find(|t| !t.is_empty())
            .unwrap_or_default();

        let count = COUNT_KEYS.iter().find_map(|key| value.get(key));

        Self {
            text: text.to_string(),
            sentence_count: coerce_sentence_count(count, default_count),
        }
    }

    /// Parse a JSON request body; a malformed body counts as `{}`
    pub fn from_json(body: &str, default_count: usize) -> Self {
        let value = serde_json::from_str::<Value>(body).unwrap_or_else(|e| {
            tracing::debug!("request body is not JSON, treating as empty: {e}");
            Value::Null
        });
        Self::from_value(&value, default_count)
    }
}

/// Coerce a loose sentence-count value
///
/// Integers, integral-looking strings and floats (truncated) are accepted.
/// Anything else, or a value below 1, yields `default_count`.
pub fn coerce_sentence_count(value: Option<&Value>, default_count: usize) -> usize {
    let parsed: Option<i64> = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        _ => None,
    };

    parsed
        .filter(|&n| n >= 1)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(default_count)
}

/// Successful summarization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySuccess {
    pub summary: String,
    pub original_word_count: usize,
    pub summary_word_count: usize,
    pub reduction_percentage: i64,
}

/// Failed summarization; `summary` is always empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFailure {
    pub error: String,
    pub summary: String,
}

impl SummaryFailure {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            summary: String::new(),
        }
    }
}

/// Response body of a summarization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummarizeResponse {
    Success(SummarySuccess),
    Failure(SummaryFailure),
}

impl SummarizeResponse {
    pub fn no_text() -> Self {
        Self::Failure(SummaryFailure::new(NO_TEXT_MESSAGE))
    }

    pub fn internal_error() -> Self {
        Self::Failure(SummaryFailure::new(INTERNAL_ERROR_MESSAGE))
    }

    /// HTTP-style status code: 200, 400 for missing text, 500 otherwise
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Failure(f) if f.error == NO_TEXT_MESSAGE => 400,
            Self::Failure(_) => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Summary HTML; empty for failures
    pub fn summary(&self) -> &str {
        match self {
            Self::Success(s) => &s.summary,
            Self::Failure(f) => &f.summary,
        }
    }
}

impl From<SummarizeError> for SummarizeResponse {
    fn from(err: SummarizeError) -> Self {
        if err.is_client_error() {
            Self::no_text()
        } else {
            Self::internal_error()
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Run one request through `summarizer`
///
/// Never panics: a panic inside the pipeline is caught, logged and reported
/// as an internal failure.
pub fn handle_request(summarizer: &Summarizer, request: &SummarizeRequest) -> SummarizeResponse {
    if request.text.trim().is_empty() {
        return SummarizeResponse::no_text();
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        summarizer.summarize(&request.text, request.sentence_count)
    }))
    .unwrap_or_else(|payload| Err(SummarizeError::Internal(panic_message(payload.as_ref()))));

    match result {
        Ok(output) => SummarizeResponse::Success(SummarySuccess {
            summary: output.summary,
            original_word_count: output.metrics.original_word_count,
            summary_word_count: output.metrics.summary_word_count,
            reduction_percentage: output.metrics.reduction_percentage,
        }),
        Err(err) => {
            if !err.is_client_error() {
                tracing::error!("summarization failed: {err}");
            }
            err.into()
        }
    }
}

/// Parse a JSON body and run it through `summarizer`
pub fn handle_json(summarizer: &Summarizer, body: &str) -> SummarizeResponse {
    let request = SummarizeRequest::from_json(body, summarizer.config().default_sentence_count);
    handle_request(summarizer, &request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::errors::KeyphraseError;
    use crate::pipeline::traits::KeyphraseExtractor;
    use crate::types::Phrase;

    struct PanickingKeywords;

    impl KeyphraseExtractor for PanickingKeywords {
        fn name(&self) -> &str {
            "panicking"
        }

        fn extract(&self, _: &str) -> Result<Vec<Phrase>, KeyphraseError> {
            panic!("keyword model exploded");
        }
    }

    #[test]
    fn test_count_coercion() {
        let c = |v: Value| coerce_sentence_count(Some(&v), 3);
        assert_eq!(c(json!(2)), 2);
        assert_eq!(c(json!("4")), 4);
        assert_eq!(c(json!(" 5 ")), 5);
        assert_eq!(c(json!(2.9)), 2);
        assert_eq!(c(json!("abc")), 3);
        assert_eq!(c(json!("2.5")), 3);
        assert_eq!(c(json!(0)), 3);
        assert_eq!(c(json!(-4)), 3);
        assert_eq!(c(json!(null)), 3);
        assert_eq!(c(json!([2])), 3);
        assert_eq!(c(json!(true)), 1);
        assert_eq!(coerce_sentence_count(None, 3), 3);
    }

    #[test]
    fn test_request_field_aliases() {
        let req = SummarizeRequest::from_value(&json!({ "paragraph": "  Hi there.  ", "sentences": "2" }), 3);
        assert_eq!(req, SummarizeRequest::new("Hi there.", 2));

        let req = SummarizeRequest::from_value(&json!({ "text": "", "paragraph": "Fallback." }), 3);
        assert_eq!(req.text, "Fallback.");
        assert_eq!(req.sentence_count, 3);
    }

    #[test]
    fn test_non_string_text_is_missing() {
        let req = SummarizeRequest::from_value(&json!({ "text": 42 }), 3);
        assert!(req.text.is_empty());
    }

    #[test]
    fn test_malformed_json_is_empty_request() {
        let req = SummarizeRequest::from_json("{not json", 3);
        assert_eq!(req, SummarizeRequest::new("", 3));
    }

    #[test]
    fn test_no_text_shape() {
        let response = handle_json(&Summarizer::new(), r#"{ "text": "   ", "sentenceCount": 3 }"#);
        assert_eq!(response.status(), 400);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "error": "No text provided", "summary": "" })
        );
    }

    #[test]
    fn test_success_shape() {
        let response = handle_json(
            &Summarizer::new(),
            r#"{ "text": "Cats are mammals. They sleep a lot. This is well known.", "sentenceCount": 2 }"#,
        );
        assert_eq!(response.status(), 200);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["originalWordCount"], 11);
        assert!(value["summary"].as_str().unwrap().contains("Cats"));
        assert!(value.get("reductionPercentage").is_some());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_panic_becomes_internal_error() {
        let summarizer = Summarizer::new().with_keywords(Some(Box::new(PanickingKeywords)));
        let response = handle_request(&summarizer, &SummarizeRequest::new("One. Two. Three.", 2));

        assert_eq!(response, SummarizeResponse::internal_error());
        assert_eq!(response.status(), 500);
        assert_eq!(response.summary(), "");
    }

    #[test]
    fn test_response_round_trips_untagged() {
        let failure: SummarizeResponse =
            serde_json::from_str(r#"{ "error": "Internal server error", "summary": "" }"#).unwrap();
        assert_eq!(failure, SummarizeResponse::internal_error());

        let success: SummarizeResponse = serde_json::from_str(
            r#"{ "summary": "x", "originalWordCount": 1, "summaryWordCount": 1, "reductionPercentage": 0 }"#,
        )
        .unwrap();
        assert!(success.is_success());
    }

    #[test]
    fn test_error_conversion() {
        assert_eq!(SummarizeResponse::from(SummarizeError::EmptyInput).status(), 400);
        assert_eq!(
            SummarizeResponse::from(SummarizeError::Internal("x".into())).status(),
            500
        );
    }
}
