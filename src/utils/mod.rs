//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`db_error`] - sqlx error classification for the PostgreSQL store

pub mod code_generator;
pub mod db_error;
