//! Structured spec diagnostics.
//!
//! A [`SpecError`] pins a problem to a JSON pointer inside the spec, with a
//! stable machine-readable [`ErrorCode`] and an optional fix-it hint.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Stable identifier for a class of spec problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// `v` is not a version this crate understands.
    UnsupportedVersion,
    /// A regex in the spec does not compile.
    InvalidPattern,
    /// No stopword list or stemmer exists for the language.
    UnsupportedLanguage,
    /// A value is out of its allowed range.
    InvalidValue,
    /// Settings that contradict each other or have no effect.
    InvalidCombo,
    /// A runtime limit is malformed or was exceeded.
    LimitExceeded,
    /// Field not part of the schema.
    UnknownField,
    /// Catch-all for custom rules.
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidPattern => "invalid_pattern",
            Self::UnsupportedLanguage => "unsupported_language",
            Self::InvalidValue => "invalid_value",
            Self::InvalidCombo => "invalid_combo",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found in a [`PipelineSpec`](super::spec::PipelineSpec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("[{code}] {path}: {message}")]
pub struct SpecError {
    pub code: ErrorCode,
    /// JSON pointer to the offending field (`""` for the whole spec)
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_path() {
        let err = SpecError::new(ErrorCode::InvalidPattern, "/cleaning/custom_pattern", "bad regex");
        assert_eq!(err.to_string(), "[invalid_pattern] /cleaning/custom_pattern: bad regex");
    }

    #[test]
    fn test_hint_serialization() {
        let plain = serde_json::to_value(SpecError::new(ErrorCode::InvalidValue, "/x", "m")).unwrap();
        assert!(plain.get("hint").is_none());
        assert_eq!(plain["code"], "invalid_value");

        let hinted = serde_json::to_value(
            SpecError::new(ErrorCode::InvalidValue, "/x", "m").with_hint("fix it"),
        )
        .unwrap();
        assert_eq!(hinted["hint"], "fix it");
    }
}
