//! Request handlers, organized by concern.

pub mod file;
pub mod health;
pub mod page;
pub mod share;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{Redirect, Response};
use tokio_util::io::ReaderStream;

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;

/// Redirect to the file listing carrying a flash message in the query
/// string. There is no server-side session; the listing page renders the
/// message straight from the query parameters.
pub(crate) fn flash_redirect(message: &str, kind: &str) -> Redirect {
    Redirect::to(&format!(
        "/list?flash={}&flash_kind={}",
        urlencoding::encode(message),
        urlencoding::encode(kind)
    ))
}

/// Build a streaming attachment response for a stored file.
pub(crate) fn attachment(name: &str, stream: ReaderStream<tokio::fs::File>) -> AppResult<Response> {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}
