use crate::error::{ApiError, Result};
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

/// Caller credential, forwarded verbatim to the business API
///
/// The token is validated by the business API, not here; a rejection
/// comes back as a session-expired error.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// Bearer credential middleware
///
/// Extracts the Authorization header and stores the token in request
/// extensions. Returns 401 Unauthorized if the header is missing or malformed.
pub async fn bearer_auth_middleware(mut request: Request, next: Next) -> Result<Response> {
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization format, expected 'Bearer <token>'".to_string(),
            )
        })?
        .to_string();

    request.extensions_mut().insert(BearerToken(token));

    Ok(next.run(request).await)
}

/// Axum extractor for the bearer token
///
/// Only works on routes protected by bearer_auth_middleware.
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BearerToken>()
            .cloned()
            .ok_or_else(|| {
                ApiError::Unauthorized(
                    "Bearer token not found - route must be protected by bearer_auth_middleware"
                        .to_string(),
                )
            })
    }
}
