//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, mobile, qualification, experience, extra, created_at";

/// Unique index backing the email-uniqueness invariant.
const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// Provides lookup and creation for registered users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, mobile, qualification, experience, extra)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.mobile)
            .bind(&input.qualification)
            .bind(&input.experience)
            .bind(&input.extra)
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (exact, case-sensitive match).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Locate a user by email, creating the record if absent.
    ///
    /// Returns the record plus a flag indicating whether this call created
    /// it. On a duplicate email the submitted data is discarded and the
    /// existing record is returned unchanged. Two concurrent calls with the
    /// same email cannot both create: the loser hits the unique index and is
    /// handed the winner's row instead of an error.
    pub async fn find_or_create(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<(User, bool), sqlx::Error> {
        if let Some(existing) = Self::find_by_email(pool, &input.email).await? {
            return Ok((existing, false));
        }

        match Self::create(pool, input).await {
            Ok(user) => Ok((user, true)),
            Err(err) if is_email_conflict(&err) => {
                tracing::debug!(email = %input.email, "Lost insert race, returning existing user");
                let winner = Self::find_by_email(pool, &input.email)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((winner, false))
            }
            Err(err) => Err(err),
        }
    }
}

/// Unique-constraint violation on the email index (SQLSTATE 23505).
fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(EMAIL_CONSTRAINT)
        }
        _ => false,
    }
}
