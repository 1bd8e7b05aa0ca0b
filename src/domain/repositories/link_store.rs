//! Storage contract the link registry depends on.

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::StoreError;
use async_trait::async_trait;

/// Durable keyed storage for links.
///
/// Every method is a single atomic round trip to the backend. The registry
/// holds no locks of its own, so implementations carry the whole burden of
/// uniqueness and counter atomicity.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryLinkStore`] - Sharded in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a link only if no live link owns `new_link.code`.
    ///
    /// The insert attempt itself is the uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the code is taken.
    /// Returns [`StoreError::Backend`] on backend failures.
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Increments `clicks`, stamps `last_clicked_at`, and returns the updated
    /// link, as one indivisible step.
    ///
    /// Returns `Ok(None)` without side effects when the code is unknown.
    async fn increment_and_fetch(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Point lookup by code. Never mutates.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// All live links ordered by `created_at` descending, newest id first on ties.
    async fn list(&self) -> Result<Vec<Link>, StoreError>;

    /// Removes the link owning `code`.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none existed.
    async fn delete(&self, code: &str) -> Result<bool, StoreError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
