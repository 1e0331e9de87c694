//! Application-specific readiness handler with a real database check.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Readiness check endpoint that pings the database connection.
///
/// Returns 200 with per-dependency status when healthy, 503 otherwise.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    match database::postgres::check_health(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "database": "healthy" }
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "checks": { "database": format!("Database ping failed: {}", e) }
                })),
            )
                .into_response()
        }
    }
}
