//! API error handling.
//!
//! Every failure is rendered as HTTP 200 with an `{"error": ...}` body, which
//! is the contract existing clients of this API rely on. The kind is kept on
//! the error for logging and tests.

use std::any::Any;

use axum::{
    Json,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::{Error, Table};

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// Failure category of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    MissingParameter,
    NotFound,
    Unexpected,
}

impl ApiErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ApiErrorKind::MissingParameter => "MISSING_PARAMETER",
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::Unexpected => "UNEXPECTED",
        }
    }
}

/// API error type that can be converted to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_parameter(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::MissingParameter, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unexpected, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.kind.code(), message = %self.message, "Request failed");
        let body = ApiErrorResponse {
            error: self.message,
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingParameter { .. } => ApiError::missing_parameter("No state provided."),
            Error::NotFound {
                table: Table::Summary,
                region,
            } => ApiError::not_found(format!("No data found for {}.", region)),
            Error::NotFound {
                table: Table::History,
                region,
            } => ApiError::not_found(format!("No historical data found for {}.", region)),
            Error::Unexpected(msg) => ApiError::unexpected(msg),
            _ => {
                tracing::error!("Unexpected error: {}", err);
                ApiError::unexpected(err.to_string())
            }
        }
    }
}

/// Render a handler panic the same way as any other unexpected failure.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic message".to_string()
    };
    tracing::error!(panic = %message, "Handler panicked");

    let body = serde_json::to_vec(&ApiErrorResponse { error: message }).unwrap_or_default();
    let mut response = Response::new(Body::from(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    response
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
