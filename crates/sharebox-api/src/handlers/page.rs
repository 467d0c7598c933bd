//! HTML page handlers: upload form and file listing.

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::error::ApiError;
use crate::pages;
use crate::state::AppState;

/// Flash message carried on the `/list` redirect.
#[derive(Debug, Deserialize)]
pub struct FlashParams {
    /// Message text.
    pub flash: Option<String>,
    /// Message kind: `success` or `error`.
    pub flash_kind: Option<String>,
}

/// GET /
pub async fn index() -> Html<String> {
    pages::index_page(None)
}

/// GET /list
pub async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let files = state.store.list().await?;
    let flash = params
        .flash
        .as_deref()
        .map(|m| (m, params.flash_kind.as_deref().unwrap_or("info")));
    Ok(pages::files_page(&files, flash))
}
