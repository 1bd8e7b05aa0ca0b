//! Registry behaviour against the in-memory store, including concurrent callers.

use link_registry::application::services::{CodePolicy, LinkRegistry};
use link_registry::domain::error::RegistryError;
use link_registry::domain::repositories::LinkStore;
use link_registry::infrastructure::memory::InMemoryLinkStore;
use std::sync::Arc;
use tokio::task::JoinSet;

fn registry() -> (Arc<LinkRegistry<InMemoryLinkStore>>, Arc<InMemoryLinkStore>) {
    let store = Arc::new(InMemoryLinkStore::new());
    (Arc::new(LinkRegistry::new(store.clone())), store)
}

#[tokio::test]
async fn test_create_resolve_delete_lifecycle() {
    let (registry, _store) = registry();

    let link = registry
        .create("https://example.com".to_string(), None)
        .await
        .unwrap();
    assert_eq!(link.clicks, 0);
    assert!(link.last_clicked_at.is_none());

    registry.resolve(&link.code).await.unwrap();
    let second = registry.resolve(&link.code).await.unwrap();
    assert_eq!(second.clicks, 2);
    assert!(second.last_clicked_at.is_some());

    registry.delete(&link.code).await.unwrap();

    let err = registry.resolve(&link.code).await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[tokio::test]
async fn test_requested_code_conflict_keeps_first_owner() {
    let (registry, store) = registry();

    registry
        .create("https://a.com".to_string(), Some("promo".to_string()))
        .await
        .unwrap();

    let err = registry
        .create("https://b.com".to_string(), Some("promo".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::CodeConflict(ref code) if code == "promo"));

    assert_eq!(store.len(), 1);
    let owner = store.find_by_code("promo").await.unwrap().unwrap();
    assert_eq!(owner.original_url, "https://a.com");
}

#[tokio::test]
async fn test_empty_url_persists_nothing() {
    let (registry, store) = registry();

    let err = registry.create(String::new(), None).await.unwrap_err();

    assert!(matches!(err, RegistryError::InvalidInput(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_generated_codes_escalate_when_space_is_tiny() {
    let store = Arc::new(InMemoryLinkStore::new());
    let registry = LinkRegistry::with_policy(store.clone(), CodePolicy::new(1, 3, 200).unwrap());

    // 62 one-character codes exist; creating more than that forces longer codes.
    for _ in 0..80 {
        registry
            .create("https://example.com".to_string(), None)
            .await
            .unwrap();
    }

    let links = store.list().await.unwrap();
    assert_eq!(links.len(), 80);
    assert!(links.iter().any(|l| l.code.len() > 1));
    assert!(links.iter().all(|l| l.code.len() <= 3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_code_have_one_winner() {
    let (registry, store) = registry();
    let mut tasks = JoinSet::new();

    for i in 0..32 {
        let registry = registry.clone();
        tasks.spawn(async move {
            registry
                .create(format!("https://example.com/{i}"), Some("race".to_string()))
                .await
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(RegistryError::CodeConflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 31);
    assert_eq!(store.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_lose_no_clicks() {
    let (registry, _store) = registry();
    registry
        .create("https://example.com".to_string(), Some("hot".to_string()))
        .await
        .unwrap();

    let mut tasks = JoinSet::new();
    for _ in 0..200 {
        let registry = registry.clone();
        tasks.spawn(async move { registry.resolve("hot").await });
    }

    let mut seen = Vec::new();
    while let Some(result) = tasks.join_next().await {
        seen.push(result.unwrap().unwrap().clicks);
    }

    // Every caller observed a distinct post-increment value.
    seen.sort_unstable();
    assert_eq!(seen, (1..=200).collect::<Vec<i64>>());

    let link = registry.get("hot").await.unwrap();
    assert_eq!(link.clicks, 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generated_creates_are_all_distinct() {
    let (registry, store) = registry();
    let mut tasks = JoinSet::new();

    for i in 0..100 {
        let registry = registry.clone();
        tasks.spawn(async move {
            registry
                .create(format!("https://example.com/{i}"), None)
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(store.len(), 100);
}
