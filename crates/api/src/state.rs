use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gep_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Notification mailer, constructed once at startup.
    pub mailer: Arc<gep_mailer::Mailer>,
}
