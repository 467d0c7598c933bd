//! Application state shared across all handlers.

use std::sync::Arc;

use sharebox_core::config::AppConfig;
use sharebox_share::ShareRegistry;
use sharebox_storage::LocalStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Uploaded file store
    pub store: Arc<LocalStore>,
    /// Share link registry
    pub registry: Arc<ShareRegistry>,
}
