//! Application error types and handling

use crate::{email::MailError, validation::ValidationResult};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid field values: {0:?}")]
    Validation(ValidationResult),

    #[error("Email delivery failed: {0}")]
    Delivery(#[from] MailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required fields" }),
            ),
            AppError::Validation(result) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid field values", "fields": result.errors }),
            ),
            AppError::Delivery(err) => {
                tracing::error!(error = ?err, "Email delivery error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to send message" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
