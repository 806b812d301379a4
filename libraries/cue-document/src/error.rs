//! Error types for playlist documents

use std::fmt;
use thiserror::Error;

/// Result type alias using `DocumentError`
pub type Result<T> = std::result::Result<T, DocumentError>;

/// A single structural problem found in a playlist document
///
/// Mirrors the `{path, message}` pairs reported by schema validators,
/// with `path` as a JSON pointer into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// Document errors
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not a well-formed playlist document
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but breaks one or more constraints
    #[error("Validation errors: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// The backing key-value store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_error() {
        let err = DocumentError::Invalid(vec![
            ValidationError::new("/media/0/url", "must not be empty"),
            ValidationError::new("/speed", "must be a positive number"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation errors: /media/0/url must not be empty, /speed must be a positive number"
        );
    }
}
