use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use cityinfo_core::city::{PatchError, ValidationErrors};
use cityinfo_core::storage::RepositoryError;

/// Body returned for every server-side failure.
pub const GENERIC_FAILURE: &str = "A problem happened while handling your request.";

/// Error type returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] RepositoryError),
    #[error("saving changes failed")]
    SaveFailed,
}

impl From<PatchError> for ApiError {
    fn from(err: PatchError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Validation(errors) => {
                tracing::warn!(error = %errors, "Rejected invalid request");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            Self::BadRequest(message) => {
                tracing::warn!(message = %message, "Rejected bad request");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "Unexpected repository failure");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
            }
            Self::SaveFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE).into_response()
            }
        }
    }
}
