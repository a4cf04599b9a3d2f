use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::keys::KEY_PREFIX;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Prefix for every physical key, including the schema marker.
    pub prefix: String,
    /// Backing file for the durable tier. None keeps both tiers in memory.
    pub durable_path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefix: KEY_PREFIX.to_string(),
            durable_path: None,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_durable_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.durable_path = Some(path.into());
        self
    }
}
