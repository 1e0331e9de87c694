use axum::Router;
use std::sync::Arc;

use domain_bookings::repository::BookingRepository;
use domain_bookings::{BookingService, PgBookingRepository, RepositoryBookingGateway};
use domain_items::repository::{CommentRepository, ItemRepository};
use domain_items::{ItemService, PgCommentRepository, PgItemRepository};
use domain_requests::{PgRequestRepository, RequestService};
use domain_users::repository::UserRepository;
use domain_users::{PgUserRepository, UserService};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// This function takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied).
/// Only Arc pointer clones remain when domains extract db connections (cheap).
pub fn routes(state: &crate::state::AppState) -> Router {
    let db = &state.db;

    let user_service = Arc::new(UserService::new(PgUserRepository::new(db.clone())));
    let users: Arc<dyn UserRepository> = user_service.repository();

    let items: Arc<dyn ItemRepository> = Arc::new(PgItemRepository::new(db.clone()));
    let comments: Arc<dyn CommentRepository> = Arc::new(PgCommentRepository::new(db.clone()));
    let bookings: Arc<dyn BookingRepository> = Arc::new(PgBookingRepository::new(db.clone()));

    // Bookings feed the items domain through the gateway seam, so the
    // two crates stay decoupled at the type level.
    let gateway = Arc::new(RepositoryBookingGateway::new(bookings.clone()));

    let item_service = Arc::new(ItemService::new(
        items.clone(),
        comments,
        users.clone(),
        gateway,
    ));
    let booking_service = Arc::new(BookingService::new(
        bookings,
        items.clone(),
        users.clone(),
    ));
    let request_service = Arc::new(RequestService::new(
        Arc::new(PgRequestRepository::new(db.clone())),
        items,
        users,
    ));

    Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest("/items", domain_items::handlers::router(item_service))
        .nest("/bookings", domain_bookings::handlers::router(booking_service))
        .nest("/requests", domain_requests::handlers::router(request_service))
}

/// Creates a router with the /ready endpoint that performs an actual health check.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`. The /ready endpoint pings the database connection.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
