//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use product_catalog::{api::create_router, seed, AppState, MemoryProductStore};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

const DAY: Duration = Duration::from_secs(86_400);

fn create_state() -> AppState {
    AppState::with_store(Arc::new(MemoryProductStore::new()), DAY)
}

fn create_test_app() -> Router {
    create_router(create_state())
}

fn product_body(slug: &str) -> Value {
    json!({
        "product_name": "Product 1",
        "product_description": "Description for Product 1",
        "product_price": "299.99",
        "product_discount_price": "279.99",
        "product_quantity": 80,
        "product_images": "product1_image1.jpg,product1_image2.jpg",
        "product_manufacturer": "Product 1 Manufacturer",
        "product_status": "A",
        "product_slug": slug
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn send_raw(app: &Router, method: &str, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(app: &Router, slug: &str) -> Value {
    let response = send(app, "POST", "/api/products", Some(product_body(slug))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response).await
}

// == List Endpoint Tests ==

#[tokio::test]
async fn test_list_empty_returns_message() {
    let app = create_test_app();

    let response = send(&app, "GET", "/api/products", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["message"], "No products found");
}

#[tokio::test]
async fn test_list_reflects_create_after_cached_read() {
    let app = create_test_app();

    // Populate the cache with an empty listing first
    send(&app, "GET", "/api/products", None).await;
    create(&app, "product-1").await;

    let response = send(&app, "GET", "/api/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["product_slug"], "product-1");
}

// == Create Endpoint Tests ==

#[tokio::test]
async fn test_create_returns_created_product() {
    let app = create_test_app();

    let json = create(&app, "product-1").await;

    assert_eq!(json["id"], 1);
    assert_eq!(json["product_name"], "Product 1");
    assert_eq!(json["product_price"], "299.99");
    assert_eq!(json["product_discount_price"], "279.99");
    assert_eq!(json["product_quantity"], 80);
    assert_eq!(json["product_status"], "A");
    assert!(json.get("created_at").is_none());
    assert!(json.get("updated_at").is_none());
}

#[tokio::test]
async fn test_create_missing_fields_is_unprocessable() {
    let app = create_test_app();

    let response = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "product_name": "Only a name" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response).await;
    assert!(json["errors"].get("product_name").is_none());
    assert_eq!(
        json["errors"]["product_slug"][0],
        "The product slug field is required."
    );
}

#[tokio::test]
async fn test_create_unreadable_body_reports_field_errors() {
    let app = create_test_app();

    let valid_json = product_body("product-1").to_string();
    let cases = [
        ("application/json", "{not json"),
        ("text/plain", valid_json.as_str()),
        ("application/json", "[1, 2, 3]"),
    ];
    for (content_type, body) in cases {
        let response = send_raw(&app, "POST", "/api/products", content_type, body).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
        let json = body_to_json(response).await;
        assert_eq!(
            json["errors"]["product_name"][0],
            "The product name field is required."
        );
    }

    let listing = body_to_json(send(&app, "GET", "/api/products", None).await).await;
    assert_eq!(listing["message"], "No products found");
}

#[tokio::test]
async fn test_create_duplicate_slug_is_unprocessable() {
    let app = create_test_app();
    create(&app, "product-1").await;

    let response = send(&app, "POST", "/api/products", Some(product_body("product-1"))).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response).await;
    assert_eq!(
        json["errors"]["product_slug"][0],
        "The product slug has already been taken."
    );

    let listing = body_to_json(send(&app, "GET", "/api/products", None).await).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_invalid_status() {
    let app = create_test_app();
    let mut body = product_body("product-1");
    body["product_status"] = json!("X");

    let response = send(&app, "POST", "/api/products", Some(body)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response).await;
    assert_eq!(
        json["errors"]["product_status"][0],
        "The selected product status is invalid."
    );
}

// == Show Endpoint Tests ==

#[tokio::test]
async fn test_show_existing_product() {
    let app = create_test_app();
    let created = create(&app, "product-1").await;

    let response = send(&app, "GET", "/api/products/1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await, created);
}

#[tokio::test]
async fn test_show_not_found() {
    let app = create_test_app();

    for uri in ["/api/products/999", "/api/products/not-a-number"] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_to_json(response).await;
        assert_eq!(json["error"], "Product not found");
    }
}

// == Update Endpoint Tests ==

#[tokio::test]
async fn test_update_price_invalidates_listing() {
    let app = create_test_app();
    create(&app, "product-1").await;
    send(&app, "GET", "/api/products", None).await;

    let response = send(
        &app,
        "PUT",
        "/api/products/1",
        Some(json!({ "product_price": "199.99" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_to_json(response).await;
    assert_eq!(updated["product_price"], "199.99");
    assert_eq!(updated["product_name"], "Product 1");
    assert_eq!(updated["product_slug"], "product-1");

    let shown = body_to_json(send(&app, "GET", "/api/products/1", None).await).await;
    assert_eq!(shown, updated);

    let listing = body_to_json(send(&app, "GET", "/api/products", None).await).await;
    assert_eq!(listing[0]["product_price"], "199.99");
}

#[tokio::test]
async fn test_update_with_own_slug_succeeds() {
    let app = create_test_app();
    create(&app, "product-1").await;

    let response = send(
        &app,
        "PATCH",
        "/api/products/1",
        Some(json!({ "product_slug": "product-1", "product_quantity": 5 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["product_quantity"], 5);
}

#[tokio::test]
async fn test_update_to_other_products_slug_fails() {
    let app = create_test_app();
    create(&app, "product-1").await;
    create(&app, "product-2").await;

    let response = send(
        &app,
        "PUT",
        "/api/products/2",
        Some(json!({ "product_slug": "product-1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let app = create_test_app();

    let response = send(
        &app,
        "PUT",
        "/api/products/7",
        Some(json!({ "product_quantity": "lots" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_missing_product_with_malformed_body_is_not_found() {
    let app = create_test_app();

    let response = send_raw(&app, "PUT", "/api/products/7", "application/json", "{oops").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response).await;
    assert_eq!(json["error"], "Product not found");
}

#[tokio::test]
async fn test_update_clears_discount_with_null() {
    let app = create_test_app();
    create(&app, "product-1").await;

    let response = send(
        &app,
        "PUT",
        "/api/products/1",
        Some(json!({ "product_discount_price": null })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert!(json["product_discount_price"].is_null());
}

// == Delete Endpoint Tests ==

#[tokio::test]
async fn test_delete_product() {
    let app = create_test_app();
    create(&app, "product-1").await;
    send(&app, "GET", "/api/products", None).await;

    let response = send(&app, "DELETE", "/api/products/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", "/api/products/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/api/products/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listing = body_to_json(send(&app, "GET", "/api/products", None).await).await;
    assert_eq!(listing["message"], "No products found");
}

// == Stats / Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_track_listing_cache() {
    let app = create_test_app();

    send(&app, "GET", "/api/products", None).await;
    send(&app, "GET", "/api/products", None).await;
    create(&app, "product-1").await;

    let response = send(&app, "GET", "/stats", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["populations"], 1);
    assert_eq!(json["invalidations"], 1);
    assert_eq!(json["cached"], false);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Seeding ==

#[tokio::test]
async fn test_seeded_products_are_listed() {
    let state = create_state();
    seed::seed(&state.catalog).await.unwrap();
    let app = create_router(state);

    let listing = body_to_json(send(&app, "GET", "/api/products", None).await).await;
    let products = listing.as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["product_slug"], "product-1");
    assert_eq!(products[1]["product_discount_price"], "379.99");
}
