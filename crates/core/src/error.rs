//! Error taxonomy shared across the service.
//!
//! Validation failures carry a structured list of per-field violations so
//! the HTTP boundary can report every problem in one response instead of
//! failing on the first.

use serde::Serialize;

/// A single violated field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field as it appears in the submission.
    pub field: &'static str,
    /// Human-readable reason: missing, out of bounds, malformed.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field violation found in one submission.
///
/// Never constructed empty; `validate` only returns this when at least one
/// field was rejected.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("Validation failed for {} field(s)", .violations.len())]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// True when a violation names the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}
