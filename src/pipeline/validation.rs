//! Validation engine for summarizer configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummaryConfig`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so users
//! see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rapid_summary::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&config);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use crate::config::SummaryConfig;
use crate::errors::{ConfigError, ErrorCode};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding wrapping a [`ConfigError`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`SummaryConfig`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"lexrank_ranges"`).
    fn name(&self) -> &str;

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`SummaryConfig`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(LexRankRangesRule));
        engine.add_rule(Box::new(PositiveCountsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &SummaryConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. LexRank numeric ranges ──────────────────────────────────────────────

struct LexRankRangesRule;

impl ValidationRule for LexRankRangesRule {
    fn name(&self) -> &str {
        "lexrank_ranges"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let lexrank = &config.lexrank;
        let mut out = Vec::new();

        if !(lexrank.damping > 0.0 && lexrank.damping < 1.0) {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/lexrank/damping",
                    format!("damping must be in (0, 1), got {}", lexrank.damping),
                )
                .with_hint("The usual value is 0.85"),
            ));
        }

        if !(lexrank.similarity_threshold >= 0.0 && lexrank.similarity_threshold < 1.0) {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/lexrank/similarity_threshold",
                    format!(
                        "similarity_threshold must be in [0, 1), got {}",
                        lexrank.similarity_threshold
                    ),
                )
                .with_hint("The usual value is 0.1"),
            ));
        }

        if !(lexrank.convergence_threshold > 0.0) {
            out.push(ValidationDiagnostic::error(ConfigError::new(
                ErrorCode::OutOfRange,
                "/lexrank/convergence_threshold",
                "convergence_threshold must be greater than 0",
            )));
        }

        if lexrank.max_iterations == 0 {
            out.push(ValidationDiagnostic::error(ConfigError::new(
                ErrorCode::InvalidValue,
                "/lexrank/max_iterations",
                "max_iterations must be greater than 0",
            )));
        }

        out
    }
}

// ─── 2. Counts must be positive ─────────────────────────────────────────────

struct PositiveCountsRule;

impl ValidationRule for PositiveCountsRule {
    fn name(&self) -> &str {
        "positive_counts"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, usize)] = &[
            ("default_sentence_count", config.default_sentence_count),
            ("min_candidates", config.min_candidates),
            ("fallback_word_limit", config.fallback_word_limit),
            ("textrank_window", config.textrank_window),
        ];

        let mut out = Vec::new();
        for &(field, value) in checks {
            if value == 0 {
                out.push(ValidationDiagnostic::error(
                    ConfigError::new(
                        ErrorCode::InvalidValue,
                        format!("/{field}"),
                        format!("{field} must be greater than 0"),
                    )
                    .with_hint(format!("Remove {field} to use the default")),
                ));
            }
        }

        if config.textrank_window == 1 {
            out.push(ValidationDiagnostic::warning(
                ConfigError::new(
                    ErrorCode::InvalidValue,
                    "/textrank_window",
                    "a window of 1 produces a graph without edges",
                )
                .with_hint("Use 2 or more"),
            ));
        }

        out
    }
}

// ─── 3. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let diag_fn = if config.strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
