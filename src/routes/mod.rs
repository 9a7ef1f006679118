// Route modules
pub mod payments;

use crate::{
    app_state::AppState,
    middleware::{bearer_auth_middleware, logging_middleware},
};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1_routes())
        .layer(cors)
        .with_state(state)
}

/// API v1 routes, all requiring a bearer credential
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/purchase-payments", get(payments::list_purchase_payments))
        .route("/purchases/{id}/payments", post(payments::add_purchase_payment))
        .route("/invoices/{id}/payments", post(payments::add_invoice_payment))
        .layer(middleware::from_fn(bearer_auth_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
