//! HTTP response types and error mapping
//!
//! Every failure leaves the web layer as a JSON body of the form
//! `{"message": ..., "field": ...}` with `field` present only for
//! validation errors.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;

/// Error body returned by every JSON endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Offending request field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, body) = match error {
        AppError::Validation { message, field } => {
            (StatusCode::BAD_REQUEST, ErrorResponse { message, field })
        }
        AppError::NotFound { resource, .. } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(format!("{} not found", resource)),
        ),
        AppError::Unauthorized { message } => {
            (StatusCode::UNAUTHORIZED, ErrorResponse::new(message))
        }
        AppError::Configuration { message } => {
            tracing::warn!("Request hit unconfigured feature: {}", message);
            (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(message))
        }
        AppError::ExternalService { service, message } => {
            tracing::error!(service = %service, "External service error: {}", message);
            (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(format!("External service error ({})", service)),
            )
        }
        AppError::Repository(e) => {
            tracing::error!("Repository error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Data access failed"),
            )
        }
        AppError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error"),
            )
        }
    };

    (status, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}

/// Unparseable or mistyped JSON bodies become ordinary validation errors
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_body(rejection.body_text())
}
