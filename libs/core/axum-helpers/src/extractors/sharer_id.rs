//! Caller identity extractor.
//!
//! Every authenticated ShareIt endpoint receives the acting user id in the
//! `X-Sharer-User-Id` header. There is no session or token layer; the
//! gateway in front of the service is trusted to set the header.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::Response,
};
use uuid::Uuid;

use crate::errors::error_response;

/// Header carrying the acting user's id.
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Extracts the caller's user id from the `X-Sharer-User-Id` header.
///
/// Rejects with 400 when the header is missing or is not a valid UUID.
/// Whether the id refers to an existing user is a service-layer concern.
///
/// # Example
/// ```ignore
/// use axum_helpers::SharerId;
///
/// async fn create_item(SharerId(owner): SharerId) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SharerId(pub Uuid);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(SHARER_USER_ID).ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                "BadRequest",
                format!("Missing {} header", SHARER_USER_ID),
            )
        })?;

        let id = value
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or_else(|| {
                error_response(
                    StatusCode::BAD_REQUEST,
                    "BadRequest",
                    format!("Invalid {} header", SHARER_USER_ID),
                )
            })?;

        Ok(SharerId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(SharerId(id): SharerId) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new().route("/whoami", get(whoami))
    }

    #[tokio::test]
    async fn test_extracts_valid_header() {
        let id = Uuid::now_v7();
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(SHARER_USER_ID, id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header_is_bad_request() {
        let response = app()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_header_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(SHARER_USER_ID, "not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
