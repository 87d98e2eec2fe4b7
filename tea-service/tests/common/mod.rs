//! Test helpers: drive the router in-process over an in-memory store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tea_service::config::TeaConfig;
use tea_service::services::{DocumentStore, InMemoryStore};
use tea_service::{build_router, AppState};
use tower::util::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

/// Config as if both database variables were set.
pub fn configured() -> TeaConfig {
    config_from(&[
        ("DATABASE_URL", "mongodb://localhost:27017"),
        ("DATABASE_NAME", "tea_test"),
    ])
}

pub fn config_from(vars: &[(&str, &str)]) -> TeaConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TeaConfig::from_lookup(CoreConfig::default(), |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

pub fn router_for(store: Arc<dyn DocumentStore>, config: TeaConfig) -> Router {
    build_router(AppState { config, store })
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        Self::with_store_and_config(store, configured())
    }

    pub fn with_store_and_config(store: InMemoryStore, config: TeaConfig) -> Self {
        let store = Arc::new(store);
        let router = router_for(store.clone(), config);
        TestApp { router, store }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(
            &self.router,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        send(
            &self.router,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Send `request` through a clone of `router` and decode the JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
