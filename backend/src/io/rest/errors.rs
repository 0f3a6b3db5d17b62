//! API error type mapped to HTTP status codes.
//!
//! Every variant produces a JSON body `{"error": "message"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::capabilities::MalformedQuery;
use crate::domain::models::ValidationError;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed capability query or invalid request body (400).
    BadRequest(String),
    /// Resource not found (404).
    NotFound(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<MalformedQuery> for ApiError {
    fn from(err: MalformedQuery) -> Self {
        warn!("Rejecting request: {}", err);
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        warn!("Rejecting request: {}", err);
        ApiError::BadRequest(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(validation) = err.downcast_ref::<ValidationError>() {
            return validation.clone().into();
        }
        if let Some(malformed) = err.downcast_ref::<MalformedQuery>() {
            return malformed.clone().into();
        }
        error!("Internal error: {:#}", err);
        ApiError::Internal("Internal server error".to_string())
    }
}
