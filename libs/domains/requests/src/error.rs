use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Item request not found: {0}")]
    NotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Convert RequestError to AppError for standardized error responses
impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(id) => {
                AppError::NotFound(format!("Item request {} not found", id))
            }
            RequestError::UserNotFound(id) => {
                AppError::NotFound(format!("User {} not found", id))
            }
            RequestError::Validation(msg) => AppError::BadRequest(msg),
            RequestError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for RequestError {
    fn from(err: sea_orm::DbErr) -> Self {
        RequestError::Database(err.to_string())
    }
}
