//! End-to-end tests of the catalog HTTP surface.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use vitrina_config::{CacheConfig, CatalogConfig, ServerConfig};
use vitrina_core::RawCatalogRecord;
use vitrina_repository::InMemoryCatalogRepository;
use vitrina_rest::{create_router, AppState};
use vitrina_service::{CatalogServiceImpl, MemoryStore, TieredCacheStore};

fn catalog() -> Vec<RawCatalogRecord> {
    serde_json::from_value(json!([
        { "id": 1, "slug": "recharge-op-5", "category": "services",
          "translations": [{ "locale": "ru", "title": "Перезарядка ОП-5" }] },
        { "id": 2, "slug": "op-10", "category": "extinguishers",
          "images": "[\"op10.jpg\", 7]",
          "translations": [
              { "locale": "ru", "title": "Огнетушитель ОП-10" },
              { "locale": "uzb", "title": "O't o'chirgich OP-10" }
          ] },
        { "id": 3, "slug": "op-5", "category": "extinguishers",
          "translations": [
              { "locale": "ru", "title": "Огнетушитель ОП-5" },
              { "locale": "en", "title": "Extinguisher OP-5" }
          ] },
        { "id": 4, "slug": "mpp-100", "category": "modules" },
        { "id": 5, "slug": "ou-5", "category": "extinguishers" }
    ]))
    .unwrap()
}

struct TestApp {
    router: Router,
    repository: Arc<InMemoryCatalogRepository>,
}

fn app() -> TestApp {
    let repository = Arc::new(InMemoryCatalogRepository::new(catalog()));
    let service = Arc::new(CatalogServiceImpl::new(Arc::clone(&repository)));
    let store = Arc::new(TieredCacheStore::memory_only(Arc::new(MemoryStore::new())));
    let state = AppState::new(
        service,
        store,
        &CacheConfig::default(),
        &CatalogConfig::default(),
    );

    TestApp {
        router: create_router(state, &ServerConfig::default()),
        repository,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cache = response
        .headers()
        .get("x-cache")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, cache, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn slugs(body: &Value) -> Vec<&str> {
    body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["slug"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_miss_then_hit() {
    let app = app();

    let (status, cache, first) = send(&app.router, get("/api/v1/catalog?lang=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(
        slugs(&first),
        ["op-5", "op-10", "ou-5", "mpp-100", "recharge-op-5"]
    );
    assert_eq!(first["locale"], "en");
    assert_eq!(first["content"][0]["title"], "Extinguisher OP-5");
    assert_eq!(first["content"][1]["title"], "Огнетушитель ОП-10");
    assert_eq!(first["content"][1]["images"], json!(["op10.jpg"]));

    let (_, cache, second) = send(&app.router, get("/api/v1/catalog?lang=en")).await;
    assert_eq!(cache.as_deref(), Some("HIT"));
    assert_eq!(second, first);
    assert_eq!(app.repository.fetch_count(), 1);
}

#[tokio::test]
async fn test_locales_share_order_but_not_cache_entries() {
    let app = app();

    let (_, _, en) = send(&app.router, get("/api/v1/catalog?lang=en")).await;
    let (_, cache, uz) = send(&app.router, get("/api/v1/catalog?lang=uzb")).await;
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(uz["locale"], "uz");
    assert_eq!(slugs(&uz), slugs(&en));
    assert_eq!(uz["content"][1]["title"], "O't o'chirgich OP-10");
}

#[tokio::test]
async fn test_nocache_bypasses() {
    let app = app();

    send(&app.router, get("/api/v1/catalog")).await;
    let (status, cache, _) = send(&app.router, get("/api/v1/catalog?nocache=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("BYPASS"));
    assert_eq!(app.repository.fetch_count(), 2);
}

#[tokio::test]
async fn test_category_and_pagination() {
    let app = app();

    let (_, _, body) = send(
        &app.router,
        get("/api/v1/catalog?category=Extinguishers&page=1&size=2"),
    )
    .await;
    assert_eq!(slugs(&body), ["ou-5"]);
    assert_eq!(body["total_elements"], 3);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["category"], "extinguishers");
}

#[tokio::test]
async fn test_category_casing_does_not_leak_through_cache() {
    let app = app();

    send(&app.router, get("/api/v1/catalog?category=EXTINGUISHERS")).await;
    let (_, cache, body) = send(&app.router, get("/api/v1/catalog?category=extinguishers")).await;
    assert_eq!(cache.as_deref(), Some("HIT"));
    assert_eq!(body["category"], "extinguishers");
}

#[tokio::test]
async fn test_category_named_all_does_not_shadow_full_listing() {
    let app = app();

    let (_, cache, filtered) = send(&app.router, get("/api/v1/catalog?category=all")).await;
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(filtered["total_elements"], 0);

    let (_, cache, everything) = send(&app.router, get("/api/v1/catalog")).await;
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(everything["total_elements"], 5);
    assert!(everything.get("category").is_none());
}

#[tokio::test]
async fn test_product_locale_from_cookie_and_header() {
    let app = app();

    let request = Request::builder()
        .uri("/api/v1/catalog/op-10")
        .header(header::COOKIE, "lang=uz")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();
    let (status, cache, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(body["title"], "O't o'chirgich OP-10");

    let request = Request::builder()
        .uri("/api/v1/catalog/op-5")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();
    let (_, _, body) = send(&app.router, request).await;
    assert_eq!(body["title"], "Extinguisher OP-5");
}

#[tokio::test]
async fn test_cyrillic_slug_lookup_matches_its_cache_key() {
    let records = serde_json::from_value(json!([
        { "id": 1, "slug": "ОП-5", "translations": [{ "locale": "ru", "title": "ОП-5" }] },
        { "id": 2, "slug": "cache" }
    ]))
    .unwrap();
    let repository = Arc::new(InMemoryCatalogRepository::new(records));
    let service = Arc::new(CatalogServiceImpl::new(Arc::clone(&repository)));
    let store = Arc::new(TieredCacheStore::memory_only(Arc::new(MemoryStore::new())));
    let state = AppState::new(service, store, &CacheConfig::default(), &CatalogConfig::default());
    let router = create_router(state, &ServerConfig::default());

    let (status, cache, body) = send(&router, get("/api/v1/catalog/%D0%BE%D0%BF-5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(body["slug"], "ОП-5");

    let (status, cache, _) = send(&router, get("/api/v1/catalog/%D0%9E%D0%9F-5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.as_deref(), Some("HIT"));

    let (status, _, body) = send(&router, get("/api/v1/catalog/cache")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "cache");
}

#[tokio::test]
async fn test_missing_product_is_not_cached() {
    let app = app();

    for _ in 0..2 {
        let (status, cache, body) = send(&app.router, get("/api/v1/catalog/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(cache.is_none());
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
    assert_eq!(app.repository.fetch_count(), 2);
}

#[tokio::test]
async fn test_invalidate_forces_recompute() {
    let app = app();

    send(&app.router, get("/api/v1/catalog?lang=ru")).await;

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/v1/catalog?lang=ru")
        .body(Body::empty())
        .unwrap();
    let (status, cache, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cache.is_none());
    assert_eq!(
        body["data"]["key"],
        "vitrina:cache:catalog:list:ru:*:0:24"
    );
    assert_eq!(body["data"]["backend"], "memory");

    let (_, cache, _) = send(&app.router, get("/api/v1/catalog?lang=ru")).await;
    assert_eq!(cache.as_deref(), Some("MISS"));
    assert_eq!(app.repository.fetch_count(), 2);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();
    for path in ["/health", "/ready", "/live"] {
        let (status, _, _) = send(&app.router, get(path)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
}
