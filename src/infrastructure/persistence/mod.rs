//! PostgreSQL store implementation.
//!
//! Queries are bound at runtime through SQLx prepared statements; the schema
//! lives in `migrations/` and is applied at startup.
//!
//! - [`PgLinkStore`] - Link storage with constraint-backed uniqueness

pub mod pg_link_store;

pub use pg_link_store::PgLinkStore;
