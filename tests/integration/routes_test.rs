use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use paydesk::{routes::create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::fake_api::{test_config, FakePurchasesApi, VALID_TOKEN};

fn fake_api() -> FakePurchasesApi {
    FakePurchasesApi::new()
        .with_purchase(1, "Acme", "2024-01-01", 500.0)
        .with_purchase(2, "Globex", "2024-01-05", 120.0)
        .with_payment(2, 5, "2024-01-06", 20.0, Some("REF-5"))
}

fn app_with(api: FakePurchasesApi) -> Router {
    create_router(AppState::with_api(test_config(10), Arc::new(api)))
}

fn app() -> Router {
    app_with(fake_api())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (status, body) = send(app(), get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_requires_bearer_token() {
    let (status, body) = send(app(), get("/api/v1/purchase-payments", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_list_with_filters() {
    let (status, body) = send(
        app(),
        get("/api/v1/purchase-payments?vendor=Acme&page=1", Some(VALID_TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["rows"][0]["id"], -1);
    assert_eq!(body["rows"][0]["method"], "Not Paid");
    assert_eq!(body["rows"][0]["outstanding"], 500.0);

    let (_, body) = send(
        app(),
        get("/api/v1/purchase-payments?search=ref-5&date=2024-01", Some(VALID_TOKEN)),
    )
    .await;
    assert_eq!(body["totalRows"], 1);
    assert_eq!(body["rows"][0]["id"], 5);
}

#[tokio::test]
async fn test_stale_token_signals_forced_logout() {
    let (status, body) = send(app(), get("/api/v1/purchase-payments", Some("stale"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SESSION_EXPIRED");
    assert_eq!(body["error"]["details"]["forceLogout"], true);
}

#[tokio::test]
async fn test_add_payment_returns_record_and_reloaded_view() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/v1/purchases/1/payments",
            json!({
                "amount": 125.0,
                "method": "Card",
                "paymentDate": "2024-02-01",
                "referenceNumber": "CARD-77"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment"]["amount"], 125.0);
    let rows = body["view"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["referenceNumber"], "CARD-77");
    assert_eq!(rows[0]["outstanding"], 375.0);
    assert!(rows.iter().all(|r| r["id"] != -1));
}

#[tokio::test]
async fn test_add_invoice_payment() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/v1/invoices/44/payments",
            json!({ "amount": 60, "method": "Cash", "paymentDate": "2024-02-03" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment"]["purchaseId"], 44);
    assert_eq!(body["payment"]["paymentDate"], "2024-02-03");
    assert!(body["payment"].get("purchase_id").is_none());
}

#[tokio::test]
async fn test_recorded_payment_survives_failed_reload() {
    let mut api = fake_api();
    api.purchase_list_down = true;

    let (status, body) = send(
        app_with(api),
        post_json(
            "/api/v1/invoices/44/payments",
            json!({ "amount": 60, "method": "Cash", "paymentDate": "2024-02-03" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment"]["purchaseId"], 44);
    assert_eq!(body["payment"]["amount"], 60.0);
    assert!(body["view"].is_null());
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/purchases/1/payments")
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"amount\": "))
        .unwrap();

    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_query_and_path_use_error_envelope() {
    let (status, body) = send(
        app(),
        get("/api/v1/purchase-payments?page=abc", Some(VALID_TOKEN)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = send(
        app(),
        post_json(
            "/api/v1/purchases/abc/payments",
            json!({ "amount": 10, "method": "Cash", "paymentDate": "2024-02-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_add_payment_validation() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/v1/purchases/1/payments",
            json!({ "amount": 0, "method": "Cash", "paymentDate": "2024-02-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = send(
        app(),
        post_json(
            "/api/v1/purchases/1/payments",
            json!({ "amount": 10, "method": "Cash", "paymentDate": "01/02/2024" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
