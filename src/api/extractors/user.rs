use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

/// Caller identity, injected as `X-User-Id` by the upstream auth layer.
/// Session handling itself is delegated; a missing header is a 401.
pub struct UserId(pub String);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| UserId(v.to_string()))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
