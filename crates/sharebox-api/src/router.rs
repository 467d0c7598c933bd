//! Route definitions for the Sharebox HTTP surface.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
    routing::post,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Headroom added to the body limit for multipart framing overhead; the
/// store enforces the exact per-file maximum itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.store.max_upload_size_bytes() as usize + UPLOAD_OVERHEAD_BYTES;

    Router::new()
        .merge(page_routes())
        .merge(file_routes())
        .merge(share_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Upload form and file listing
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/list", get(handlers::page::list_files))
}

/// Upload, download, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::file::upload))
        .route("/download/{name}", get(handlers::file::download))
        .route(
            "/delete/{name}",
            get(handlers::file::delete_file).post(handlers::file::delete_file),
        )
}

/// Share link minting and public access
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share/{name}", get(handlers::share::create_share))
        .route("/shared/{token}", get(handlers::share::shared_download))
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
