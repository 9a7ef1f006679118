use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

const MAX_LOGGED_BODY: usize = 2000;

/// Middleware that logs every request, and the body of failed responses
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "→ Request"
    );

    let response = next.run(request).await;
    let status = response.status();
    let latency = start.elapsed();

    if status.is_success() {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            "← Response"
        );
        return response;
    }

    // Error bodies are small JSON envelopes; read them for the log line
    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read response body: {}", e);
            Bytes::new()
        }
    };

    let response_body = String::from_utf8_lossy(&bytes);
    tracing::warn!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %latency.as_millis(),
        body = %truncate_body(&response_body, MAX_LOGGED_BODY),
        "← Response"
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Truncate body for logging, adding ellipsis if truncated
fn truncate_body(body: &str, max_len: usize) -> String {
    let body = body.trim();
    if body.len() <= max_len {
        return body.to_string();
    }

    let mut cut = max_len;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated, {} bytes total]", &body[..cut], body.len())
}
