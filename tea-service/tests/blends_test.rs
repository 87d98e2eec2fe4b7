mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};
use tea_service::services::InMemoryStore;

fn chamomile() -> Value {
    json!({
        "name": "Calm Chamomile",
        "description": "A gentle bedtime blend",
        "ingredients": ["chamomile", "lavender"],
        "flavor_notes": "floral, honeyed",
        "caffeine_free": true,
        "price": 12.5,
        "image": "https://example.com/chamomile.png",
        "tags": ["sleep", "stress"]
    })
}

#[tokio::test]
async fn created_blend_is_listed_with_its_id() {
    let app = TestApp::new();
    let payload = chamomile();

    let (status, body) = app.post_json("/api/blends", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id should be a string").to_string();

    let (status, body) = app.get("/api/blends").await;
    assert_eq!(status, StatusCode::OK);

    let blends = body.as_array().unwrap();
    let stored = blends
        .iter()
        .find(|b| b["_id"] == id.as_str())
        .expect("created blend should be listed");

    for (field, value) in payload.as_object().unwrap() {
        assert_eq!(&stored[field], value, "field {} differs", field);
    }
    assert!(stored["created_at"].is_string());
    assert!(stored["updated_at"].is_string());
}

#[tokio::test]
async fn minimal_blend_gets_schema_defaults() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json("/api/blends", json!({ "name": "Plain Mint", "price": 4 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get("/api/blends").await;
    let blend = &body[0];
    assert_eq!(blend["caffeine_free"], true);
    assert_eq!(blend["ingredients"], json!([]));
    assert_eq!(blend["tags"], json!([]));
    assert!(blend["description"].is_null());
}

#[tokio::test]
async fn negative_price_is_rejected_and_not_stored() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/blends", json!({ "name": "Bad Deal", "price": -5 }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("price"));
    assert_eq!(app.store.count("teablend").await, 0);
}

#[tokio::test]
async fn missing_required_field_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/api/blends", json!({ "name": "No Price" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
    assert_eq!(app.store.count("teablend").await, 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.post_raw("/api/blends", "{\"name\": ").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn limit_bounds_the_result_count() {
    let app = TestApp::new();
    for i in 0..5 {
        app.post_json("/api/blends", json!({ "name": format!("Blend {}", i), "price": i }))
            .await;
    }

    let (status, body) = app.get("/api/blends?limit=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn twenty_is_both_default_and_maximum() {
    let app = TestApp::new();
    for i in 0..25 {
        app.post_json("/api/blends", json!({ "name": format!("Blend {}", i), "price": 1 }))
            .await;
    }

    let (_, body) = app.get("/api/blends").await;
    assert_eq!(body.as_array().unwrap().len(), 20);

    let (_, body) = app.get("/api/blends?limit=25").await;
    assert_eq!(body.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn zero_limit_returns_everything_up_to_the_cap() {
    let app = TestApp::new();
    for i in 0..5 {
        app.post_json("/api/blends", json!({ "name": format!("Blend {}", i), "price": 1 }))
            .await;
    }

    let (status, body) = app.get("/api/blends?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn non_numeric_limit_is_a_validation_error() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/blends?limit=lots").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn store_write_failure_is_a_server_error_with_detail() {
    let app = TestApp::with_store(InMemoryStore::failing("not master and slaveOk=false"));

    let (status, body) = app.post_json("/api/blends", chamomile()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "not master and slaveOk=false");
}

#[tokio::test]
async fn long_store_errors_are_truncated() {
    let app = TestApp::with_store(InMemoryStore::failing("e".repeat(1_000)));

    let (status, body) = app.post_json("/api/blends", chamomile()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"].as_str().unwrap().len(), 200);
}

#[tokio::test]
async fn listing_from_an_unavailable_store_fails() {
    let app = TestApp::with_store(InMemoryStore::unavailable());

    let (status, body) = app.get("/api/blends").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Database not available");
}
