//! Error types for the Maintrack server

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Stable application error codes surfaced to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    DbFailure = 2,
    BadValue = 3,
    NoSuchData = 4,
    InsufficientStock = 5,
    ConsumedPartMissing = 6,
}

/// Per-field validation messages, keyed by the wire-format field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Append a validation message for a field
pub fn push_field(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Not enough stock for spare part {part_number}. Available: {available}, Consumed: {requested}")]
    InsufficientStock {
        part_number: String,
        available: i32,
        requested: i32,
    },

    #[error("Spare part with ID {0} not found")]
    ConsumedPartMissing(Uuid),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Per-field validation messages (validation failures only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::BadValue,
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::InsufficientStock {
                part_number,
                available,
                requested,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InsufficientStock,
                format!(
                    "Not enough stock for spare part {}. Available: {}, Consumed: {}",
                    part_number, available, requested
                ),
                None,
            ),
            AppError::ConsumedPartMissing(id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::ConsumedPartMissing,
                format!("Spare part with ID {} not found", id),
                None,
            ),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg, None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
