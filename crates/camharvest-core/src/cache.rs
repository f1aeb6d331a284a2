//! File-existence caching for persisted tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Decides whether an already persisted output file is reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// An existing file is valid forever, regardless of age. Default.
    #[default]
    SkipIfExists,
    /// Always rebuild from the remote service and overwrite.
    Refresh,
}

impl CachePolicy {
    pub fn reuse(&self, path: &Path) -> bool {
        match self {
            CachePolicy::SkipIfExists => path.exists(),
            CachePolicy::Refresh => false,
        }
    }
}
