//! Integration tests for the API server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use kasir_api::{create_app, AppState};
use kasir_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn setup() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    create_app(AppState::new(db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
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
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Category "Minuman" with A = 3500 × 10 and B = 3000 × 40.
async fn stocked() -> (Router, i64, i64) {
    let app = setup().await;

    let (status, category) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Minuman", "description": "Drinks" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for (name, price, stock) in [("A", 3500, 10), ("B", 3000, 40)] {
        let (status, product) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({
                "name": name,
                "price": price,
                "stock": stock,
                "category_id": category_id
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(product["id"].as_i64().unwrap());
    }

    (app, ids[0], ids[1])
}

#[tokio::test]
async fn test_health_check() {
    let app = setup().await;

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
}

#[tokio::test]
async fn test_checkout_flow() {
    let (app, a, b) = stocked().await;

    let (status, sale) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": a, "quantity": 2 },
            { "product_id": b, "quantity": 1 }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["total_amount"], 10000);
    assert_eq!(sale["details"].as_array().unwrap().len(), 2);
    assert_eq!(sale["details"][0]["product_name"], "A");
    assert_eq!(sale["details"][0]["subtotal"], 7000);
    assert!(sale["created_at"].is_string());

    let (_, product) = send(&app, "GET", &format!("/api/products/{a}"), None).await;
    assert_eq!(product["stock"], 8);
    assert_eq!(product["category"]["name"], "Minuman");
    let (_, product) = send(&app, "GET", &format!("/api/products/{b}"), None).await;
    assert_eq!(product["stock"], 39);

    let id = sale["id"].as_i64().unwrap();
    let (status, stored) = send(&app, "GET", &format!("/api/transactions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, sale);
}

#[tokio::test]
async fn test_insufficient_stock_is_unprocessable() {
    let (app, a, _) = stocked().await;

    let (status, json) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": a, "quantity": 100 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INSUFFICIENT_STOCK");

    let (_, product) = send(&app, "GET", &format!("/api/products/{a}"), None).await;
    assert_eq!(product["stock"], 10);
}

#[tokio::test]
async fn test_checkout_rejections() {
    let (app, a, _) = stocked().await;

    let (status, json) = send(&app, "POST", "/api/checkout", Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");

    let (status, json) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": 9999, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");

    let (status, json) = send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": a, "quantity": "two" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_sales_summary() {
    let (app, a, b) = stocked().await;

    let (status, json) = send(&app, "GET", "/api/report/sales-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "total_revenue": 0,
            "total_transaction": 0,
            "best_seller": { "name": "-", "sold": 0 }
        })
    );

    send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [
            { "product_id": a, "quantity": 2 },
            { "product_id": b, "quantity": 1 }
        ]})),
    )
    .await;

    let (status, json) = send(&app, "GET", "/api/report/sales-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_revenue"], 10000);
    assert_eq!(json["total_transaction"], 1);
    assert_eq!(json["best_seller"]["name"], "A");
    assert_eq!(json["best_seller"]["sold"], 2);

    let (status, json) = send(
        &app,
        "GET",
        "/api/report/sales-summary?start=2001-01-01&end=2001-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_transaction"], 0);
}

#[tokio::test]
async fn test_sales_summary_rejects_bad_dates() {
    let app = setup().await;

    let (status, json) = send(
        &app,
        "GET",
        "/api/report/sales-summary?start=01-01-2026&end=2026-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");

    let (status, _) = send(
        &app,
        "GET",
        "/api/report/sales-summary?start=2026-02-01&end=2026-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_crud() {
    let (app, a, b) = stocked().await;

    let (status, list) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (_, list) = send(&app, "GET", "/api/products?name=a", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, product) = send(
        &app,
        "PUT",
        &format!("/api/products/{a}"),
        Some(json!({ "stock": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["stock"], 0);
    assert_eq!(product["price"], 3500);

    let (status, json) = send(
        &app,
        "PUT",
        &format!("/api/products/{a}"),
        Some(json!({ "stock": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/products/{a}"),
        Some(json!({ "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "DELETE", &format!("/api/products/{b}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, json) = send(&app, "GET", &format!("/api/products/{b}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_product_create_rejections() {
    let (app, _, _) = stocked().await;
    let (_, list) = send(&app, "GET", "/api/categories", None).await;
    let category_id = list[0]["id"].as_i64().unwrap();

    let (status, json) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "A", "price": 3500, "stock": 1, "category_id": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "C", "price": 1000, "stock": 1, "category_id": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "C", "price": 1000, "stock": -1, "category_id": category_id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_crud() {
    let app = setup().await;

    let (status, category) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "name": "Camilan" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["description"], "");
    let id = category["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/categories/{id}"),
        Some(json!({ "description": "Snacks" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Camilan");
    assert_eq!(updated["description"], "Snacks");

    let (_, list) = send(&app, "GET", "/api/categories?name=MIL", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_referenced_rows_cannot_be_deleted() {
    let (app, a, _) = stocked().await;

    send(
        &app,
        "POST",
        "/api/checkout",
        Some(json!({ "items": [{ "product_id": a, "quantity": 1 }] })),
    )
    .await;

    let (status, json) = send(&app, "DELETE", &format!("/api/products/{a}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");

    let (_, product) = send(&app, "GET", &format!("/api/products/{a}"), None).await;
    let category_id = product["category_id"].as_i64().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{category_id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_bad_path_and_missing_transaction() {
    let app = setup().await;

    let (status, json) = send(&app, "GET", "/api/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION");

    let (status, json) = send(&app, "GET", "/api/transactions/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Transaction not found: 1");
}
