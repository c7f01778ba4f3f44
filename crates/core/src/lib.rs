//! Domain layer for the partner registration service.
//!
//! Holds the submission payload types, normalization and validation rules,
//! and the error taxonomy shared by the storage and HTTP layers. This crate
//! performs no I/O.

pub mod error;
pub mod registration;
pub mod types;
