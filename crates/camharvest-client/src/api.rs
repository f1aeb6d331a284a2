//! Endpoint construction for the webcam service.

use camharvest_core::Credentials;
use camharvest_core::config::ApiConfig;

/// Cameras requested per catalog page.
pub const PAGE_SIZE: usize = 50;

/// Builds catalog and archive requests with credentials attached.
#[derive(Debug, Clone)]
pub struct WindyApi {
    catalog_url: String,
    archive_url: String,
    credentials: Credentials,
}

impl WindyApi {
    pub fn new(config: &ApiConfig, credentials: Credentials) -> Self {
        Self {
            catalog_url: config.catalog_url.trim_end_matches('/').to_string(),
            archive_url: config.archive_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Catalog page starting at `offset`, most popular first.
    pub fn catalog_page_url(&self, offset: usize) -> String {
        format!(
            "{}/list/orderby=popularity,desc/limit={PAGE_SIZE},{offset}",
            self.catalog_url
        )
    }

    pub fn catalog_query(&self) -> Vec<(&str, &str)> {
        vec![
            ("key", self.credentials.key.as_str()),
            ("show", "webcams:location"),
        ]
    }

    pub fn archive_url(&self, camera_id: &str) -> String {
        format!("{}/{camera_id}", self.archive_url)
    }

    /// `uid` repeats `token2`; the service expects both.
    pub fn archive_query(&self) -> Vec<(&str, &str)> {
        vec![
            ("key", self.credentials.key.as_str()),
            ("token", self.credentials.token.as_str()),
            ("token2", self.credentials.token2.as_str()),
            ("uid", self.credentials.token2.as_str()),
        ]
    }
}
