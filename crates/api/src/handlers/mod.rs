//! Request handlers for the registration API.
//!
//! Handlers delegate to the workflow and repositories in `gep_db` and map
//! errors via [`crate::error::AppError`].

pub mod register;
