use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{SharerId, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::BookingResult;
use crate::models::{BookingResponse, CreateBooking};
use crate::service::BookingService;

/// OpenAPI documentation for the bookings endpoints
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        create_booking,
        approve,
        get_booking,
        list_for_booker,
        list_for_owner
    ),
    components(schemas(CreateBooking, BookingResponse, crate::models::BookingStatus)),
    tags((name = "bookings", description = "Rental bookings and approvals"))
)]
pub struct ApiDoc;

/// Create the bookings router with all HTTP endpoints
pub fn router(service: Arc<BookingService>) -> Router {
    Router::new()
        .route("/", get(list_for_booker).post(create_booking))
        .route("/owner", get(list_for_owner))
        .route("/{id}", get(get_booking).patch(approve))
        .with_state(service)
}

fn default_state() -> String {
    "ALL".to_string()
}

fn default_size() -> usize {
    20
}

/// State filter and pagination query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct StateQuery {
    /// One of ALL, CURRENT, PAST, FUTURE, WAITING, REJECTED (case-sensitive)
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

/// Owner decision query parameter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApproveQuery {
    pub approved: bool,
}

/// Book an item for a date range
#[utoipa::path(
    post,
    path = "",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING status", body = BookingResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Item or user not found"),
        (status = 409, description = "Item unavailable or bad time window"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_booking(
    State(service): State<Arc<BookingService>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse> {
    let booking = service.create_booking(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a waiting booking (item owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID"),
        ApproveQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingResponse),
        (status = 403, description = "Caller does not own the item"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already decided"),
        (status = 500, description = "Internal server error")
    )
)]
async fn approve(
    State(service): State<Arc<BookingService>>,
    SharerId(user_id): SharerId,
    Path(id): Path<Uuid>,
    Query(query): Query<ApproveQuery>,
) -> BookingResult<Json<BookingResponse>> {
    let booking = service.approve(user_id, id, query.approved).await?;
    Ok(Json(booking))
}

/// Get a booking (booker or item owner only)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 403, description = "Caller is neither booker nor owner"),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_booking(
    State(service): State<Arc<BookingService>>,
    SharerId(user_id): SharerId,
    Path(id): Path<Uuid>,
) -> BookingResult<Json<BookingResponse>> {
    let booking = service.get_booking(user_id, id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings filtered by state
#[utoipa::path(
    get,
    path = "",
    tag = "bookings",
    params(StateQuery),
    responses(
        (status = 200, description = "Caller's bookings", body = Vec<BookingResponse>),
        (status = 404, description = "User not found"),
        (status = 409, description = "Unknown state keyword"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_for_booker(
    State(service): State<Arc<BookingService>>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .list_for_booker(user_id, &query.state, query.from, query.size)
        .await?;
    Ok(Json(bookings))
}

/// List bookings of the caller's items filtered by state
#[utoipa::path(
    get,
    path = "/owner",
    tag = "bookings",
    params(StateQuery),
    responses(
        (status = 200, description = "Bookings of the caller's items", body = Vec<BookingResponse>),
        (status = 404, description = "User not found"),
        (status = 409, description = "Unknown state keyword"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_for_owner(
    State(service): State<Arc<BookingService>>,
    SharerId(user_id): SharerId,
    Query(query): Query<StateQuery>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .list_for_owner(user_id, &query.state, query.from, query.size)
        .await?;
    Ok(Json(bookings))
}
