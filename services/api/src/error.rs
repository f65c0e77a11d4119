//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Join ids into the comma-separated form used in error messages
fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// A request field failed validation
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The path id did not resolve to a record
    #[error("{0} not found")]
    NotFound(&'static str),

    /// One or more referenced role ids do not exist
    #[error("Invalid role IDs: {}", join_ids(.0))]
    InvalidRoleIds(Vec<i64>),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    /// Build a field-level validation error
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({"error": message, "field": field}),
            ),
            ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, json!({"error": self.to_string()}))
            }
            ApiError::InvalidRoleIds(_) => {
                (StatusCode::BAD_REQUEST, json!({"error": self.to_string()}))
            }
            ApiError::InternalServerError | ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
