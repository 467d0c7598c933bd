//! Share link creation and shared downloads.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::info;

use sharebox_core::error::ErrorKind;

use super::{attachment, flash_redirect};
use crate::error::ApiError;
use crate::pages;
use crate::state::AppState;

/// GET /share/{name} — mint a share link for an existing file.
///
/// The file's existence is checked here, once; the registry never looks
/// at the file again.
pub async fn create_share(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.store.exists(&name).await {
        return flash_redirect("File not found", "error").into_response();
    }

    let entry = state.registry.create(&name);
    let share_url = format!("http://{}/shared/{}", request_host(&headers), entry.token);

    pages::share_page(&name, &share_url, state.config.share.ttl_days).into_response()
}

/// GET /shared/{token} — resolve a token and stream the target file.
pub async fn shared_download(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let entry = match state.registry.resolve(&token) {
        Ok(entry) => entry,
        Err(e) if e.kind == ErrorKind::Expired => {
            return Ok(pages::message_page(StatusCode::GONE, &e.message).into_response());
        }
        Err(e) => {
            return Ok(pages::message_page(StatusCode::NOT_FOUND, &e.message).into_response());
        }
    };

    // The registry holds a weak reference: the file may have been deleted
    // after the link was minted.
    match state.store.open(&entry.file_name).await {
        Ok(stream) => {
            info!(file = %entry.file_name, "Shared download");
            Ok(attachment(&entry.file_name, stream)?)
        }
        Err(e) if e.kind == ErrorKind::NotFound => {
            Ok(pages::message_page(StatusCode::NOT_FOUND, "File not found").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn request_host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost")
}
