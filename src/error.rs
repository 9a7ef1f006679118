use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The business API failed or answered with something unusable
    #[error("Backend error: {0}")]
    Backend(String),

    /// The business API rejected the forwarded credential (401)
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// The caller did not present a usable bearer credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
            ApiError::SessionExpired(_) | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the dashboard must drop its session and return to login
    pub fn forces_logout(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_code, message, details) = match self {
            ApiError::Backend(ref msg) => {
                tracing::error!("Backend error: {}", msg);
                (
                    "BACKEND_ERROR",
                    "Failed to load data from the business service".to_string(),
                    None,
                )
            }
            ApiError::SessionExpired(ref msg) => (
                "SESSION_EXPIRED",
                msg.clone(),
                Some(json!({ "forceLogout": true })),
            ),
            ApiError::Unauthorized(ref msg) => ("UNAUTHORIZED", msg.clone(), None),
            ApiError::BadRequest(ref msg) => ("BAD_REQUEST", msg.clone(), None),
            ApiError::NotFound(ref msg) => ("NOT_FOUND", msg.clone(), None),
            ApiError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": error_code,
            "message": message,
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        let body = json!({
            "success": false,
            "error": error,
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

/// `Json` extractor whose rejection uses the `ApiError` envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `Query` extractor whose rejection uses the `ApiError` envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// `Path` extractor whose rejection uses the `ApiError` envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

// Helper type for results
pub type Result<T> = std::result::Result<T, ApiError>;
