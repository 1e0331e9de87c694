use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{SharerId, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::{CommentResponse, CreateComment, CreateItem, ItemResponse, UpdateItem};
use crate::service::ItemService;

/// OpenAPI documentation for the items endpoints
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        list_owner_items,
        create_item,
        search_items,
        get_item,
        update_item,
        add_comment
    ),
    components(schemas(
        CreateItem,
        UpdateItem,
        ItemResponse,
        CreateComment,
        CommentResponse,
        crate::gateway::BookingSummary
    )),
    tags((name = "items", description = "Rental listings and comments"))
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/", get(list_owner_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
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

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub from: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

/// List the calling owner's items with booking annotations
#[utoipa::path(
    get,
    path = "",
    tag = "items",
    params(PageQuery),
    responses(
        (status = 200, description = "Owner's items", body = Vec<ItemResponse>),
        (status = 400, description = "Missing or invalid identity header"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_owner_items(
    State(service): State<Arc<ItemService>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageQuery>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    let items = service
        .list_owner_items(user_id, page.from, page.size)
        .await?;
    Ok(Json(items))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "",
    tag = "items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_item(
    State(service): State<Arc<ItemService>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse> {
    let item = service.create_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = "items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<ItemResponse>),
        (status = 400, description = "Invalid pagination"),
        (status = 500, description = "Internal server error")
    )
)]
async fn search_items(
    State(service): State<Arc<ItemService>>,
    Query(query): Query<SearchQuery>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    let items = service
        .search_items(&query.text, query.from, query.size)
        .await?;
    Ok(Json(items))
}

/// Get an item by ID; owners additionally see booking annotations
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 400, description = "Missing or invalid identity header"),
        (status = 404, description = "Item not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_item(
    State(service): State<Arc<ItemService>>,
    SharerId(user_id): SharerId,
    Path(id): Path<Uuid>,
) -> ItemResult<Json<ItemResponse>> {
    let item = service.get_item(user_id, id).await?;
    Ok(Json(item))
}

/// Partially update an item (owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Item not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn update_item(
    State(service): State<Arc<ItemService>>,
    SharerId(user_id): SharerId,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<ItemResponse>> {
    let item = service.update_item(user_id, id, input).await?;
    Ok(Json(item))
}

/// Comment on an item after a completed rental
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = "items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Item or user not found"),
        (status = 409, description = "Caller has no started booking of the item"),
        (status = 500, description = "Internal server error")
    )
)]
async fn add_comment(
    State(service): State<Arc<ItemService>>,
    SharerId(user_id): SharerId,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<Json<CommentResponse>> {
    let comment = service.add_comment(user_id, id, input).await?;
    Ok(Json(comment))
}
