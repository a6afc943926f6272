//! Read-through caching semantics of `CachedQuery`.

mod common;

use common::{tiered, FailingRemote, HealthyRemote};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vitrina_core::{VitrinaError, VitrinaResult};
use vitrina_service::{CachePolicy, CacheStatus, CachedQuery, OperationKind, RemoteCache};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Listing {
    items: Vec<String>,
}

#[derive(Debug)]
struct Query {
    name: &'static str,
    fresh: bool,
}

fn query(name: &'static str) -> Query {
    Query { name, fresh: false }
}

fn policy() -> CachePolicy<Query> {
    CachePolicy::new(Duration::from_secs(60), |q: &Query| format!("test:listing:{}", q.name))
        .with_bypass(|q: &Query| q.fresh)
}

/// Counts how often the wrapped operation actually runs.
#[derive(Default)]
struct Upstream {
    calls: AtomicUsize,
}

impl Upstream {
    async fn fetch(&self) -> VitrinaResult<Listing> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Listing {
            items: vec!["op-5".to_string(), "op-10".to_string()],
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[tokio::test]
async fn test_miss_runs_operation_once_then_hits() {
    let (store, _) = tiered(Some(HealthyRemote::new()));
    let cached = CachedQuery::new(store, policy());
    let upstream = Upstream::default();

    let first = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(first.status, CacheStatus::Miss);
    assert_eq!(upstream.calls(), 1);

    let second = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(second.status, CacheStatus::Hit);
    assert_eq!(second.body, first.body);
    assert_eq!(upstream.calls(), 1);

    let listing: Listing = serde_json::from_slice(&second.body).unwrap();
    assert_eq!(listing.items, ["op-5", "op-10"]);
}

#[tokio::test]
async fn test_hit_served_from_fallback_when_remote_fails() {
    let (store, _) = tiered(Some(Arc::new(FailingRemote)));
    let cached = CachedQuery::new(store, policy());
    let upstream = Upstream::default();

    for _ in 0..3 {
        cached
            .execute(OperationKind::Read, &query("all"), || upstream.fetch())
            .await
            .unwrap();
    }
    assert_eq!(upstream.calls(), 1);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let (store, memory) = tiered(None);
    let cached = CachedQuery::new(store, policy());
    let attempts = AtomicUsize::new(0);

    for _ in 0..2 {
        let result = cached
            .execute(OperationKind::Read, &query("all"), || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<Listing, _>(VitrinaError::Repository("upstream down".to_string()))
            })
            .await;
        assert!(matches!(result, Err(VitrinaError::Repository(_))));
    }

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert!(memory.is_empty());
}

#[tokio::test]
async fn test_bypass_and_mutation_skip_the_cache() {
    let (store, memory) = tiered(None);
    let cached = CachedQuery::new(store, policy());
    let upstream = Upstream::default();

    let fresh = Query {
        name: "all",
        fresh: true,
    };
    let bypassed = cached
        .execute(OperationKind::Read, &fresh, || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(bypassed.status, CacheStatus::Bypass);

    let mutation = cached
        .execute(OperationKind::Mutation, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(mutation.status, CacheStatus::Bypass);

    assert_eq!(upstream.calls(), 2);
    assert!(memory.is_empty());
}

#[tokio::test]
async fn test_corrupt_entry_is_treated_as_miss() {
    let remote = HealthyRemote::new();
    remote.put_raw("test:listing:all", b"{not json");
    let (store, _) = tiered(Some(remote.clone() as Arc<dyn RemoteCache>));
    let cached = CachedQuery::new(store, policy());
    let upstream = Upstream::default();

    let result = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(result.status, CacheStatus::Miss);
    assert_eq!(upstream.calls(), 1);

    let again = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(again.status, CacheStatus::Hit);
}

#[tokio::test]
async fn test_wrong_shape_entry_is_treated_as_miss() {
    let remote = HealthyRemote::new();
    remote.put_raw("test:listing:all", br#"{"unexpected":1}"#);
    let (store, _) = tiered(Some(remote as Arc<dyn RemoteCache>));
    let cached = CachedQuery::new(store, policy());
    let upstream = Upstream::default();

    let result = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(result.status, CacheStatus::Miss);
}

#[tokio::test]
async fn test_oversized_result_is_served_but_not_stored() {
    let (store, memory) = tiered(None);
    let cached = CachedQuery::new(store, policy().with_max_entry_bytes(8));
    let upstream = Upstream::default();

    for _ in 0..2 {
        let result = cached
            .execute(OperationKind::Read, &query("all"), || upstream.fetch())
            .await
            .unwrap();
        assert_eq!(result.status, CacheStatus::Miss);
    }
    assert_eq!(upstream.calls(), 2);
    assert!(memory.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_entry_recomputed_after_ttl() {
    let (store, _) = tiered(None);
    let cached = CachedQuery::new(
        store,
        CachePolicy::new(Duration::from_secs(5), |q: &Query| q.name.to_string()),
    );
    let upstream = Upstream::default();

    cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    tokio::time::advance(Duration::from_secs(5)).await;

    let after = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(after.status, CacheStatus::Miss);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn test_invalidate_forces_recompute() {
    let (store, _) = tiered(Some(HealthyRemote::new()));
    let cached = CachedQuery::new(store, policy());
    let upstream = Upstream::default();

    cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    cached.invalidate(&query("all")).await;

    let after = cached
        .execute(OperationKind::Read, &query("all"), || upstream.fetch())
        .await
        .unwrap();
    assert_eq!(after.status, CacheStatus::Miss);
    assert_eq!(upstream.calls(), 2);
}
