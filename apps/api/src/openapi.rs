use utoipa::OpenApi;

/// Combined API documentation for the ShareIt backend.
///
/// Each domain crate documents its own endpoints; this nests them under
/// the paths used by `api::routes`.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ShareIt API",
        version = "0.1.0",
        description = "Peer-to-peer item rental: listings, bookings, approvals, comments, and item requests"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/items", api = domain_items::handlers::ApiDoc),
        (path = "/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/requests", api = domain_requests::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
