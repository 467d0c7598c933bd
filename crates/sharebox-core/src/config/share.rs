//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Share link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Number of days a share link stays valid after creation.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
        }
    }
}

fn default_ttl_days() -> i64 {
    7
}
