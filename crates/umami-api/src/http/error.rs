//! Application error type mapping to HTTP status codes and the flat error
//! body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use umami_types::chat::ErrorBody;
use umami_types::error::{AnswerError, RestaurantError, RetrievalError};

/// Message sent for every 500; details stay in the server log.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum AppError {
    /// 404 with the given message.
    NotFound(String),
    /// 400 with the given message.
    Validation(String),
    /// 500. The detail is logged, never sent.
    Internal(String),
}

impl AppError {
    pub fn restaurant_not_found() -> Self {
        AppError::NotFound("Restaurant not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RestaurantError> for AppError {
    fn from(e: RestaurantError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<RetrievalError> for AppError {
    fn from(e: RetrievalError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<AnswerError> for AppError {
    fn from(e: AnswerError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg,
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                INTERNAL_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}
