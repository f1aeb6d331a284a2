//! Credentials and `harvest.toml` configuration.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;
use crate::error::{HarvestError, HarvestResult};

pub const KEY_VAR: &str = "WINDYKEY";
pub const TOKEN_VAR: &str = "WINDYTOKEN";
pub const TOKEN2_VAR: &str = "WINDYTOKEN2";

pub const DEFAULT_CATALOG_URL: &str = "https://api.windy.com/api/webcams/v2";
pub const DEFAULT_ARCHIVE_URL: &str = "https://node.windy.com/webcams/v2.0/archive";

/// The three opaque credentials attached to outbound requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub token: String,
    pub token2: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, token: impl Into<String>, token2: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            token2: token2.into(),
        }
    }

    /// Read credentials from `WINDYKEY`, `WINDYTOKEN` and `WINDYTOKEN2`.
    pub fn from_env() -> HarvestResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`. Absent and empty values both count
    /// as missing, and every missing name is reported at once.
    pub fn from_lookup<F>(lookup: F) -> HarvestResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let key = read(KEY_VAR);
        let token = read(TOKEN_VAR);
        let token2 = read(TOKEN2_VAR);

        match (key, token, token2) {
            (Some(key), Some(token), Some(token2)) => Ok(Self { key, token, token2 }),
            (key, token, token2) => {
                let missing: Vec<&str> = [
                    (KEY_VAR, key.is_none()),
                    (TOKEN_VAR, token.is_none()),
                    (TOKEN2_VAR, token2.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(HarvestError::Config(format!(
                    "please check if {} are set",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .field("token", &"<redacted>")
            .field("token2", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub api: ApiConfig,
    pub throttle: ThrottleConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the "list popular cameras" endpoint.
    pub catalog_url: String,
    /// Root of the per-camera archive endpoint.
    pub archive_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Upper bound (exclusive) of the random sleep after each request.
    pub max_delay_secs: f64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { max_delay_secs: 2.0 }
    }
}

impl ThrottleConfig {
    pub fn max_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_delay_secs).unwrap_or(Duration::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("camharvest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub policy: CachePolicy,
}

impl HarvestConfig {
    pub fn from_file(path: &Path) -> HarvestResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HarvestError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| HarvestError::Config(format!("invalid {}: {e}", path.display())))
    }

    pub fn to_toml_string(&self) -> HarvestResult<String> {
        toml::to_string_pretty(self).map_err(|e| HarvestError::Config(e.to_string()))
    }
}
