//! Crate-wide error type.
//!
//! Every fallible operation in the library returns [`Result`]. Spec
//! validation has its own diagnostic model (see
//! [`crate::pipeline::errors::SpecError`]); a failing report is folded into
//! [`TextPrepError::Configuration`] when a pipeline is built from it.

use thiserror::Error;

/// Errors produced while configuring or running the preprocessing pipeline.
#[derive(Debug, Error)]
pub enum TextPrepError {
    /// Required input or setting is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input bytes are not valid UTF-8 text.
    #[error("encoding error: input is not valid UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// A caller-supplied cleaning pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Input exceeded a configured runtime limit.
    #[error("{limit} exceeded: {actual} > {max}")]
    LimitExceeded {
        limit: &'static str,
        actual: usize,
        max: usize,
    },

    /// The word-cloud font could not be parsed.
    #[error("font error: {0}")]
    Font(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TextPrepError {
    /// Shorthand for a [`TextPrepError::Configuration`] error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TextPrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_from_utf8() {
        let err = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
        let err: TextPrepError = err.into();
        assert!(matches!(err, TextPrepError::Encoding(_)));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_configuration_message() {
        let err = TextPrepError::configuration("missing required text");
        assert_eq!(err.to_string(), "configuration error: missing required text");
    }

    #[test]
    fn test_limit_exceeded_message() {
        let err = TextPrepError::LimitExceeded {
            limit: "max_chars",
            actual: 12,
            max: 10,
        };
        assert_eq!(err.to_string(), "max_chars exceeded: 12 > 10");
    }
}
