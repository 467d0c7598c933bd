//! Upload, download, and delete handlers.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::info;

use sharebox_core::error::ErrorKind;

use super::{attachment, flash_redirect};
use crate::error::ApiError;
use crate::pages;
use crate::state::AppState;

/// POST /upload — multipart upload of a single `file` field.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Ok(upload_error(e.status(), &format!("Upload failed: {e}"))),
        };
        if field.name() == Some("file") {
            file_name = field.file_name().map(String::from);
            data = match field.bytes().await {
                Ok(bytes) => Some(bytes),
                Err(e) => return Ok(upload_error(e.status(), &format!("Upload failed: {e}"))),
            };
        }
    }

    let Some(data) = data else {
        return Ok(upload_error(StatusCode::BAD_REQUEST, "No file part"));
    };
    let requested = match file_name {
        Some(name) if !name.is_empty() => name,
        _ => return Ok(upload_error(StatusCode::BAD_REQUEST, "No selected file")),
    };

    match state.store.save(data, &requested).await {
        Ok(stored) => {
            info!(name = %stored, "File uploaded");
            Ok(
                flash_redirect(&format!("File {stored} uploaded successfully!"), "success")
                    .into_response(),
            )
        }
        Err(e) if e.kind == ErrorKind::PayloadTooLarge => {
            Ok(upload_error(StatusCode::PAYLOAD_TOO_LARGE, &e.message))
        }
        Err(e) if e.kind == ErrorKind::Validation => {
            Ok(upload_error(StatusCode::BAD_REQUEST, &e.message))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /download/{name}
pub async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.open(&name).await {
        Ok(stream) => Ok(attachment(&name, stream)?),
        Err(e) if matches!(e.kind, ErrorKind::NotFound | ErrorKind::Validation) => {
            Ok(flash_redirect("File not found", "error").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET or POST /delete/{name}
pub async fn delete_file(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.delete(&name).await {
        Ok(()) => {
            info!(name = %name, "File deleted");
            flash_redirect(&format!("File {name} deleted successfully!"), "success")
        }
        Err(e) if matches!(e.kind, ErrorKind::NotFound | ErrorKind::Validation) => {
            flash_redirect("File not found", "error")
        }
        Err(e) => flash_redirect(&format!("Error deleting file: {}", e.message), "error"),
    }
    .into_response()
}

fn upload_error(status: StatusCode, message: &str) -> Response {
    (status, pages::index_page(Some(message))).into_response()
}
