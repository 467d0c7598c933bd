//! # sharebox-api
//!
//! HTTP layer for Sharebox: the axum router, request handlers, HTML page
//! rendering, and the mapping from domain errors to HTTP responses.

pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
