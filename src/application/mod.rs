//! Application layer orchestrating domain operations.
//!
//! Services consume the storage trait and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::link_registry::LinkRegistry`] - Link creation, resolution, and removal

pub mod services;
