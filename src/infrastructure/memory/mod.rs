//! In-process store implementation.
//!
//! Used by `STORAGE_BACKEND=memory` and by the HTTP tests.

pub mod in_memory_link_store;

pub use in_memory_link_store::InMemoryLinkStore;
