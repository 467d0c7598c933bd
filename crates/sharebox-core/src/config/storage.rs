//! File storage configuration.

use serde::{Deserialize, Serialize};

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded files are stored.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
    /// Maximum upload size in bytes (default 16 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> u64 {
    16 * 1024 * 1024 // 16 MiB
}
