//! In-process implementation of the link store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::StoreError;
use crate::domain::repositories::LinkStore;

/// Link store backed by a `DashMap` keyed by code.
///
/// Sharded locks give the same guarantees the PostgreSQL store gets from its
/// unique constraint and row locks: the vacant-check and the insert happen
/// under one shard lock, and so do the increment and the snapshot returned
/// to the caller. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryLinkStore {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of live links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert_unique(&self, new_link: NewLink) -> Result<Link, StoreError> {
        match self.links.entry(new_link.code) {
            Entry::Occupied(occupied) => Err(StoreError::Conflict(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let link = Link::new(
                    id,
                    vacant.key().clone(),
                    new_link.original_url,
                    0,
                    Utc::now(),
                    None,
                );
                vacant.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn increment_and_fetch(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let Some(mut entry) = self.links.get_mut(code) else {
            return Ok(None);
        };

        let now = Utc::now();
        let link = entry.value_mut();
        link.clicks += 1;
        link.last_clicked_at = Some(link.last_clicked_at.map_or(now, |prev| prev.max(now)));

        Ok(Some(link.clone()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(links)
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
