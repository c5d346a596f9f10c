use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use ranch_ledger::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory store
pub fn setup_test_app() -> (Router, AppState) {
    let state = AppState::in_memory();
    (build_router(state.clone()), state)
}

/// Send a request and decode the JSON body (Null for an empty body)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[allow(dead_code)]
pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

#[allow(dead_code)]
pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

#[allow(dead_code)]
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Create a lot and return its id
#[allow(dead_code)]
pub async fn create_lot(app: &Router, name: &str, section: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/lots",
        serde_json::json!({ "name": name, "section": section }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "lot creation failed: {}", body);
    body["id"].as_i64().unwrap()
}

/// Create a product and return its id
#[allow(dead_code)]
pub async fn create_product(app: &Router, name: &str, category: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/products",
        serde_json::json!({ "name": name, "category": category }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "product creation failed: {}", body);
    body["id"].as_i64().unwrap()
}

/// Register an animal bought on 2025-01-15 and return its id
#[allow(dead_code)]
pub async fn create_livestock(app: &Router, tag: &str, lot_id: i64) -> i64 {
    let (status, body) = post(
        app,
        "/api/livestock",
        serde_json::json!({
            "tag": tag,
            "lot_id": lot_id,
            "entry_weight": "450.50",
            "purchase_unit_price": "25.50",
            "purchase_date": "2025-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "livestock creation failed: {}", body);
    body["id"].as_i64().unwrap()
}
