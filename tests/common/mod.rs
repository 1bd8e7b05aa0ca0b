#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use link_registry::application::services::LinkRegistry;
use link_registry::domain::entities::{Link, NewLink};
use link_registry::domain::error::StoreError;
use link_registry::domain::repositories::LinkStore;
use link_registry::infrastructure::memory::InMemoryLinkStore;
use link_registry::routes::{app_router, router};
use link_registry::state::AppState;
use std::io;
use std::sync::Arc;

/// State backed by a fresh in-memory store.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkStore>) {
    let store = Arc::new(InMemoryLinkStore::new());
    (state_for(store.clone()), store)
}

pub fn state_for(store: Arc<dyn LinkStore>) -> AppState {
    AppState::new(Arc::new(LinkRegistry::new(store)))
}

/// Full application router over the given state.
pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// The service as `server::run` serves it, including path normalization.
pub fn make_app_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

pub async fn create_test_link(store: &InMemoryLinkStore, code: &str, url: &str) -> Link {
    store
        .insert_unique(NewLink {
            code: code.to_string(),
            original_url: url.to_string(),
        })
        .await
        .unwrap()
}

/// Store whose every operation fails, standing in for an unreachable database.
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::backend(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "connection refused by 10.0.0.5:5432",
    ))
}

#[async_trait]
impl LinkStore for UnreachableStore {
    async fn insert_unique(&self, _new_link: NewLink) -> Result<Link, StoreError> {
        Err(unreachable())
    }

    async fn increment_and_fetch(&self, _code: &str) -> Result<Option<Link>, StoreError> {
        Err(unreachable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, StoreError> {
        Err(unreachable())
    }

    async fn list(&self) -> Result<Vec<Link>, StoreError> {
        Err(unreachable())
    }

    async fn delete(&self, _code: &str) -> Result<bool, StoreError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }
}
