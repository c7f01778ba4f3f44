//! User entity model and DTOs.

use gep_core::registration::ValidRegistration;
use gep_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Rows are created once per unique email and never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    /// Serialized profile blob for fields without a dedicated column.
    pub extra: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user, flattened from a validated submission.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub extra: Option<String>,
}

impl From<&ValidRegistration> for CreateUser {
    /// Promote the known profile fields to dedicated columns and keep the
    /// whole profile, unknown keys included, in the serialized blob.
    fn from(registration: &ValidRegistration) -> Self {
        Self {
            name: registration.name.clone(),
            email: registration.email.clone(),
            mobile: registration.extra.mobile.clone(),
            qualification: registration.extra.qualification.clone(),
            experience: registration.extra.experience.clone(),
            extra: registration.extra_json(),
        }
    }
}
