//! Core domain entities.
//!
//! Entities are plain data structures. Creation input lives in a separate
//! `New*` struct so that store-assigned fields never appear in requests.
//!
//! - [`Link`] - A short code bound to a destination URL
//! - [`NewLink`] - Input for the store's unique-key insert

pub mod link;

pub use link::{Link, NewLink};
