//! Handler for the registration intake endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use gep_core::registration::RegistrationPayload;
use gep_core::types::{DbId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::registration;
use crate::state::AppState;

/// Public fields of a registration record, echoed on success.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub created_at: Timestamp,
    /// Human-readable confirmation note.
    pub message: &'static str,
}

/// POST /register
///
/// Validation failure maps to 422 with a field-level error list, a
/// duplicate email to 409, a storage fault to 500. Success returns 201
/// with the new record's public fields; both notification emails are
/// scheduled before the response is sent.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(payload) = payload
        .map_err(|rejection| AppError::BadRequest(format!("Invalid JSON: {}", rejection.body_text())))?;

    let outcome = registration::register(&state.pool, &state.mailer, payload).await?;

    if !outcome.created_new {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = outcome.user;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            mobile: user.mobile,
            qualification: user.qualification,
            experience: user.experience,
            created_at: user.created_at,
            message: "Registered successfully. Confirmation sent to your email.",
        }),
    ))
}
