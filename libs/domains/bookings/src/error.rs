use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Cannot book your own item")]
    OwnItem,

    #[error("Item not available")]
    Unavailable(Uuid),

    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),

    #[error("Booking status already decided")]
    AlreadyDecided,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Convert BookingError to AppError for standardized error responses
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(id) => AppError::NotFound(format!("Booking {} not found", id)),
            BookingError::ItemNotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            BookingError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            // Owners cannot book their own items; reported as not found
            BookingError::OwnItem => {
                AppError::NotFound("Cannot book your own item".to_string())
            }
            BookingError::Unavailable(_) => AppError::Conflict("Item not available".to_string()),
            BookingError::InvalidTimeWindow(msg) => AppError::Conflict(msg),
            BookingError::AlreadyDecided => {
                AppError::Conflict("Booking status already decided".to_string())
            }
            BookingError::Unauthorized(msg) => AppError::Forbidden(msg),
            BookingError::UnknownState(state) => {
                AppError::Conflict(format!("Unknown state: {}", state))
            }
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookingError::Database(err.to_string())
    }
}
