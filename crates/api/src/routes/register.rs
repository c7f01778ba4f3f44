//! Route definitions for registration intake.
//!
//! Mounted at the application root by `build_app_router`.

use axum::routing::post;
use axum::Router;

use crate::handlers::register;
use crate::state::AppState;

/// Registration routes.
///
/// ```text
/// POST   /register   -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/register", post(register::register))
}
