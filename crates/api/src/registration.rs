//! Registration workflow: validate, persist, notify.

use gep_core::registration::RegistrationPayload;
use gep_db::models::user::{CreateUser, User};
use gep_db::repositories::UserRepo;
use gep_db::DbPool;
use gep_mailer::Mailer;

use crate::error::AppError;

/// Result of one registration attempt.
#[derive(Debug)]
pub struct RegistrationOutcome {
    pub user: User,
    /// False when the email was already registered; the submission is
    /// discarded and `user` is the pre-existing record.
    pub created_new: bool,
}

/// Run one submission through validate, find-or-create, and notify.
///
/// A validation failure propagates before anything is persisted or sent.
/// Both notifications are scheduled before returning but never awaited; a
/// send failure cannot fail the registration.
pub async fn register(
    pool: &DbPool,
    mailer: &Mailer,
    raw: RegistrationPayload,
) -> Result<RegistrationOutcome, AppError> {
    let registration = raw.validate()?;

    let input = CreateUser::from(&registration);
    let (user, created_new) = UserRepo::find_or_create(pool, &input).await?;

    if created_new {
        tracing::info!(user_id = user.id, email = %user.email, "User registered");
    } else {
        tracing::info!(user_id = user.id, email = %user.email, "Duplicate registration");
    }

    // The confirmation renders from the stored record; the admin alert may
    // fall back to profile fields from this submission when the stored
    // record predates them.
    let mobile = user.mobile.as_deref().or(registration.extra.mobile.as_deref());
    let city = registration.extra.city();

    mailer.send_confirmation(&user);
    mailer.send_admin_alert(&user, mobile, city);

    Ok(RegistrationOutcome { user, created_new })
}
