//! Registration submission payload: normalization and validation.
//!
//! Submissions arrive as loose JSON. Profile fields may be sent top-level
//! (legacy clients) or nested under `extra` (current clients);
//! [`RegistrationPayload::normalize`] folds the legacy shape into the nested
//! one, and [`RegistrationPayload::validate`] checks every field and reports
//! all violations at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::error::{FieldViolation, ValidationErrors};

/// Maximum length of the `name` field (matches the column width).
pub const MAX_NAME_LENGTH: usize = 200;

/// Mobile numbers must be at least this long when present.
pub const MIN_MOBILE_LENGTH: usize = 10;

/// Mobile numbers must be at most this long (matches the column width).
pub const MAX_MOBILE_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// ExtraProfile
// ---------------------------------------------------------------------------

/// Profile sub-object of a submission.
///
/// The known fields are promoted to dedicated record columns on save.
/// Anything else clients send (`city`, ...) rides along in `other` and is
/// retained only inside the record's serialized `extra` blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    /// Fields without a dedicated column, preserved verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ExtraProfile {
    /// True when no field, known or unknown, is set.
    pub fn is_empty(&self) -> bool {
        self.mobile.is_none()
            && self.qualification.is_none()
            && self.experience.is_none()
            && self.other.is_empty()
    }

    /// City has no dedicated column; it travels in the blob when clients
    /// send it.
    pub fn city(&self) -> Option<&str> {
        self.other.get("city").and_then(Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// RegistrationPayload
// ---------------------------------------------------------------------------

/// Raw registration submission as received from the HTTP boundary.
///
/// Required fields are `Option` so a missing value surfaces as a field
/// violation rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationPayload {
    pub name: Option<String>,
    pub email: Option<String>,

    // Legacy top-level profile fields, folded into `extra` by `normalize`.
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,

    pub extra: Option<ExtraProfile>,
}

impl RegistrationPayload {
    /// Fold legacy top-level profile fields into the nested `extra` object.
    ///
    /// A nested value always wins; a top-level value only fills an absent
    /// nested slot. After this call the profile lives exclusively under
    /// `extra`.
    pub fn normalize(mut self) -> Self {
        let mut extra = self.extra.take().unwrap_or_default();
        if extra.mobile.is_none() {
            extra.mobile = self.mobile.take();
        }
        if extra.qualification.is_none() {
            extra.qualification = self.qualification.take();
        }
        if extra.experience.is_none() {
            extra.experience = self.experience.take();
        }
        Self {
            mobile: None,
            qualification: None,
            experience: None,
            extra: Some(extra),
            ..self
        }
    }

    /// Normalize, then check every field.
    ///
    /// Pure function of the payload. Returns all violations together so the
    /// boundary can report them in a single response.
    pub fn validate(self) -> Result<ValidRegistration, ValidationErrors> {
        let normalized = self.normalize();
        let extra = normalized.extra.unwrap_or_default();
        let mut violations = Vec::new();

        let name = match normalized.name {
            None => {
                violations.push(FieldViolation::new("name", "is required"));
                None
            }
            Some(n) if n.is_empty() => {
                violations.push(FieldViolation::new("name", "must not be empty"));
                None
            }
            Some(n) if n.chars().count() > MAX_NAME_LENGTH => {
                violations.push(FieldViolation::new(
                    "name",
                    format!("must be at most {MAX_NAME_LENGTH} characters"),
                ));
                None
            }
            Some(n) => Some(n),
        };

        let email = match normalized.email {
            None => {
                violations.push(FieldViolation::new("email", "is required"));
                None
            }
            Some(e) if !e.validate_email() => {
                violations.push(FieldViolation::new("email", "is not a valid email address"));
                None
            }
            Some(e) => Some(e),
        };

        if let Some(mobile) = &extra.mobile {
            let len = mobile.chars().count();
            if !(MIN_MOBILE_LENGTH..=MAX_MOBILE_LENGTH).contains(&len) {
                violations.push(FieldViolation::new(
                    "mobile",
                    format!("must be between {MIN_MOBILE_LENGTH} and {MAX_MOBILE_LENGTH} characters"),
                ));
            }
        }

        match (name, email) {
            (Some(name), Some(email)) if violations.is_empty() => Ok(ValidRegistration {
                name,
                email,
                extra,
            }),
            _ => Err(ValidationErrors::new(violations)),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidRegistration
// ---------------------------------------------------------------------------

/// A submission that passed validation, profile fields exclusively nested.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub extra: ExtraProfile,
}

impl ValidRegistration {
    /// Serialize the profile for the record's `extra` column.
    ///
    /// Returns `None` when the profile is empty. Serialization failure falls
    /// back to the debug representation instead of aborting the save.
    pub fn extra_json(&self) -> Option<String> {
        if self.extra.is_empty() {
            return None;
        }
        Some(serde_json::to_string(&self.extra).unwrap_or_else(|_| format!("{:?}", self.extra)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
