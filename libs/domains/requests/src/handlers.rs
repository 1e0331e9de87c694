use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{SharerId, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::RequestResult;
use crate::models::{CreateRequest, RequestResponse};
use crate::service::RequestService;

/// OpenAPI documentation for the item request endpoints
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(create_request, list_own, list_others, get_request),
    components(schemas(CreateRequest, RequestResponse, crate::models::AnswerItem)),
    tags((name = "requests", description = "Item requests"))
)]
pub struct ApiDoc;

/// Create the item requests router with all HTTP endpoints
pub fn router(service: Arc<RequestService>) -> Router {
    Router::new()
        .route("/", get(list_own).post(create_request))
        .route("/all", get(list_others))
        .route("/{id}", get(get_request))
        .with_state(service)
}

fn default_size() -> usize {
    20
}

/// Pagination query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    #[serde(default)]
    pub from: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

/// Create an item request
#[utoipa::path(
    post,
    path = "",
    tag = "requests",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = RequestResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_request(
    State(service): State<Arc<RequestService>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateRequest>,
) -> RequestResult<impl IntoResponse> {
    let request = service.create_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List the caller's own requests with answering items
#[utoipa::path(
    get,
    path = "",
    tag = "requests",
    responses(
        (status = 200, description = "Caller's requests", body = Vec<RequestResponse>),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_own(
    State(service): State<Arc<RequestService>>,
    SharerId(user_id): SharerId,
) -> RequestResult<Json<Vec<RequestResponse>>> {
    let requests = service.list_own(user_id).await?;
    Ok(Json(requests))
}

/// List other users' requests, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = "requests",
    params(PageQuery),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<RequestResponse>),
        (status = 400, description = "Invalid pagination"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_others(
    State(service): State<Arc<RequestService>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> RequestResult<Json<Vec<RequestResponse>>> {
    let requests = service.list_others(user_id, page.from, page.size).await?;
    Ok(Json(requests))
}

/// Get a single request with its answering items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "requests",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = RequestResponse),
        (status = 404, description = "Request or user not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_request(
    State(service): State<Arc<RequestService>>,
    SharerId(user_id): SharerId,
    Path(id): Path<Uuid>,
) -> RequestResult<Json<RequestResponse>> {
    let request = service.get_request(user_id, id).await?;
    Ok(Json(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRequestRepository;
    use axum::body::Body;
    use axum::http::Request;
    use axum_helpers::SHARER_USER_ID;
    use domain_items::repository::InMemoryItemRepository;
    use domain_users::repository::{InMemoryUserRepository, UserRepository};
    use domain_users::User;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn test_app() -> (Router, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = users
            .create(User::new("user@example.com".to_string(), "User".to_string()))
            .await
            .unwrap();

        let service = Arc::new(RequestService::new(
            Arc::new(InMemoryRequestRepository::new()),
            Arc::new(InMemoryItemRepository::new()),
            users,
        ));

        (router(service), user)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_request_returns_201() {
        let (app, user) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .header(SHARER_USER_ID, user.id.to_string())
                    .body(Body::from(r#"{"description":"need a drill"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["description"], "need a drill");
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn blank_description_returns_400() {
        let (app, user) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .header(SHARER_USER_ID, user.id.to_string())
                    .body(Body::from(r#"{"description":"   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_own_returns_created_requests() {
        let (app, user) = test_app().await;

        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .header(SHARER_USER_ID, user.id.to_string())
                    .body(Body::from(r#"{"description":"need a drill"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(SHARER_USER_ID, user.id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_missing_request_returns_404() {
        let (app, user) = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", Uuid::now_v7()))
                    .header(SHARER_USER_ID, user.id.to_string())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
