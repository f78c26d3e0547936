use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the storage gateway.
///
/// Built once at startup and handed to [`Gateway::new`](crate::Gateway::new);
/// it is never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Directory holding the versioned store.
    pub storage_root: PathBuf,
    /// Prefix prepended to file names to form document URLs.
    pub url_prefix: String,
    /// Extension used when a create request carries no `type`.
    pub default_type: String,
    /// Number of commits returned by a history read without `depth`.
    pub history_depth: usize,
    /// Upper bound on random-name attempts for one anonymous create.
    pub max_allocation_attempts: u32,
    /// When `true`, search only returns documents marked public.
    pub search_public_only: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("data/store"),
            url_prefix: "/p/".into(),
            default_type: "pl".into(),
            history_depth: 5,
            max_allocation_attempts: 64,
            search_public_only: false,
        }
    }
}

impl GatewayConfig {
    /// A default configuration rooted at `storage_root`.
    pub fn with_root(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            ..Default::default()
        }
    }

    /// URL under which `file` is served.
    pub fn url_for(&self, file: &str) -> String {
        format!("{}{}", self.url_prefix, file)
    }
}
