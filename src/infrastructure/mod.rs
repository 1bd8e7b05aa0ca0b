//! Infrastructure layer implementing the domain's storage contract.
//!
//! # Modules
//!
//! - [`memory`] - Sharded in-process store
//! - [`persistence`] - PostgreSQL store

pub mod memory;
pub mod persistence;
