//! In-memory [`Fetcher`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use camharvest_core::{HarvestError, HarvestResult};

use crate::fetch::{FetchResponse, Fetcher};

/// A request seen by [`FakeFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

/// Serves canned responses keyed by URL (query string excluded) and records
/// every request. Unrouted URLs fail with a transport error.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    routes: HashMap<String, (u16, Vec<u8>)>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.into(), (status, body.into()));
        self
    }

    pub fn json(self, url: impl Into<String>, body: &serde_json::Value) -> Self {
        self.route(url, 200, body.to_string())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Fetcher for FakeFetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> HarvestResult<FetchResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        let (status, body) = self.routes.get(url).ok_or_else(|| HarvestError::Transport {
            url: url.to_string(),
            reason: "no route".to_string(),
        })?;
        Ok(FetchResponse {
            url: url.to_string(),
            status: *status,
            body: body.clone(),
        })
    }
}
