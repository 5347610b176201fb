//! Validation engine for pipeline specifications.
//!
//! Every registered [`ValidationRule`] runs against the
//! [`PipelineSpec`](super::spec::PipelineSpec); all of their diagnostics end
//! up in one [`ValidationReport`], so a bad spec file reports every problem
//! in a single pass.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rapid_textprep::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use super::errors::{ErrorCode, SpecError};
use super::spec::{PipelineSpec, SPEC_VERSION};
use crate::nlp::{stemmer, stopwords};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// One finding: a [`SpecError`] plus its severity and the rule that
/// raised it.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    /// Name of the [`ValidationRule`]; filled in by the engine.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule: String,
    #[serde(flatten)]
    pub error: SpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: SpecError) -> Self {
        Self::with_severity(Severity::Error, err)
    }

    pub fn warning(err: SpecError) -> Self {
        Self::with_severity(Severity::Warning, err)
    }

    fn with_severity(severity: Severity, error: SpecError) -> Self {
        Self {
            severity,
            rule: String::new(),
            error,
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
    pub fn errors(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// The first error in rule order, if any.
    pub fn first_error(&self) -> Option<&SpecError> {
        self.errors().next()
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.first_error().is_some()
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`PipelineSpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"custom_pattern"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`PipelineSpec`] and collects
/// all diagnostics into a [`ValidationReport`].
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
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(CustomPatternRule));
        engine.add_rule(Box::new(LanguageRule));
        engine.add_rule(Box::new(WordCloudRule));
        engine.add_rule(Box::new(DisabledStageSettingsRule));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in execution order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule against `spec`; diagnostics keep rule order.
    pub fn validate(&self, spec: &PipelineSpec) -> ValidationReport {
        let diagnostics = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.validate(spec).into_iter().map(|mut diag| {
                    diag.rule = rule.name().to_string();
                    diag
                })
            })
            .collect();
        ValidationReport { diagnostics }
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

// ─── 1. spec version ────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            SpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. custom cleaning pattern must compile ────────────────────────────────

struct CustomPatternRule;

impl ValidationRule for CustomPatternRule {
    fn name(&self) -> &str {
        "custom_pattern"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        let Some(pattern) = spec.cleaning.custom_pattern.as_deref() else {
            return vec![];
        };
        match Regex::new(pattern) {
            Ok(_) => vec![],
            Err(err) => vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidPattern,
                    "/cleaning/custom_pattern",
                    format!("pattern {pattern:?} does not compile: {err}"),
                )
                .with_hint("Escape regex metacharacters such as ( ) [ ] with a backslash"),
            )],
        }
    }
}

// ─── 3. stopword list and stemmer must exist for the language ───────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "language"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if !stopwords::is_supported_language(&spec.stopwords.language) {
            out.push(ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::UnsupportedLanguage,
                    "/stopwords/language",
                    format!("no stopword list for {:?}", spec.stopwords.language),
                )
                .with_hint("Use a code such as \"en\", \"de\" or \"fr\""),
            ));
        }

        if !stemmer::is_supported_language(&spec.stemmer.language) {
            out.push(ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::UnsupportedLanguage,
                    "/stemmer/language",
                    format!("no Snowball stemmer for {:?}", spec.stemmer.language),
                )
                .with_hint("Use a name such as \"english\", \"german\" or \"french\""),
            ));
        }

        out
    }
}

// ─── 4. word cloud geometry ─────────────────────────────────────────────────

struct WordCloudRule;

impl ValidationRule for WordCloudRule {
    fn name(&self) -> &str {
        "word_cloud"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        let wc = &spec.word_cloud;
        let mut out = Vec::new();

        let positive: &[(&str, bool)] = &[
            ("width", wc.width > 0),
            ("height", wc.height > 0),
            ("max_words", wc.max_words > 0),
            ("min_font_size", wc.min_font_size > 0.0),
        ];
        for &(field, ok) in positive {
            if !ok {
                out.push(ValidationDiagnostic::error(SpecError::new(
                    ErrorCode::InvalidValue,
                    format!("/word_cloud/{field}"),
                    format!("{field} must be greater than 0"),
                )));
            }
        }

        if wc.min_font_size > wc.max_font_size {
            out.push(ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::InvalidValue,
                    "/word_cloud/max_font_size",
                    format!(
                        "max_font_size ({}) is smaller than min_font_size ({})",
                        wc.max_font_size, wc.min_font_size
                    ),
                )
                .with_hint("Swap the two values"),
            ));
        }

        out
    }
}

// ─── 5. settings for disabled stages have no effect ─────────────────────────

struct DisabledStageSettingsRule;

impl ValidationRule for DisabledStageSettingsRule {
    fn name(&self) -> &str {
        "disabled_stage_settings"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if !spec.stages.clean && spec.cleaning.custom_pattern.is_some() {
            out.push(ValidationDiagnostic::warning(
                SpecError::new(
                    ErrorCode::InvalidCombo,
                    "/cleaning/custom_pattern",
                    "custom_pattern is ignored because the clean stage is disabled",
                )
                .with_hint("Enable stages.clean or drop the pattern"),
            ));
        }

        let stopword_overrides = !spec.stopwords.extra.is_empty() || !spec.stopwords.keep.is_empty();
        if !spec.stages.remove_stopwords && stopword_overrides {
            out.push(ValidationDiagnostic::warning(
                SpecError::new(
                    ErrorCode::InvalidCombo,
                    "/stopwords",
                    "extra/keep stopwords are ignored because remove_stopwords is disabled",
                )
                .with_hint("Enable stages.remove_stopwords or drop the overrides"),
            ));
        }

        out
    }
}

// ─── 6. Runtime limits must be positive when set ────────────────────────────

struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        [
            ("max_chars", spec.runtime.max_chars),
            ("max_sentences", spec.runtime.max_sentences),
        ]
        .into_iter()
        .filter(|(_, limit)| *limit == Some(0))
        .map(|(field, _)| {
            ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::LimitExceeded,
                    format!("/runtime/{field}"),
                    "a limit of 0 rejects every article",
                )
                .with_hint(format!("Drop {field} for no limit")),
            )
        })
        .collect()
    }
}

// ─── 7. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &PipelineSpec) -> Vec<ValidationDiagnostic> {
        let sections: [(&str, &HashMap<String, serde_json::Value>); 7] = [
            ("", &spec.unknown_fields),
            ("/stages", &spec.stages.unknown_fields),
            ("/cleaning", &spec.cleaning.unknown_fields),
            ("/stopwords", &spec.stopwords.unknown_fields),
            ("/stemmer", &spec.stemmer.unknown_fields),
            ("/word_cloud", &spec.word_cloud.unknown_fields),
            ("/runtime", &spec.runtime.unknown_fields),
        ];
        let make = if spec.strict {
            ValidationDiagnostic::error
        } else {
            ValidationDiagnostic::warning
        };

        let mut out = Vec::new();
        for (prefix, extras) in sections {
            let mut keys: Vec<&String> = extras.keys().collect();
            keys.sort();
            out.extend(keys.into_iter().map(|key| {
                make(
                    SpecError::new(
                        ErrorCode::UnknownField,
                        format!("{prefix}/{key}"),
                        format!("{key:?} is not a recognised setting"),
                    )
                    .with_hint("Check the spelling, or remove it"),
                )
            }));
        }
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
