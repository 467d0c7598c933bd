//! Maps domain `AppError` to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sharebox_core::error::{AppError, ErrorKind};

use crate::pages;

/// Wrapper that lets handlers return `AppError` through `?`.
///
/// Renders the error as a plain HTML status page; endpoints that prefer
/// redirect-with-flash handle their errors before this fallback applies.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Expired => StatusCode::GONE,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Storage | ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(error = %self.0, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        pages::message_page(status, &self.0.message).into_response()
    }
}
