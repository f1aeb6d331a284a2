//! Single GET requests, no retries.

use std::time::Duration;

use camharvest_core::config::HttpConfig;
use camharvest_core::{HarvestError, HarvestResult};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Raw outcome of one GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Final URL, query string included.
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON of shape `T`.
    pub fn json<T: DeserializeOwned>(&self) -> HarvestResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| HarvestError::Parse {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Issues GET requests.
///
/// A response with a non-success status is still `Ok`; only a request that
/// produced no response at all is an error.
pub trait Fetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> HarvestResult<FetchResponse>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> HarvestResult<FetchResponse> {
        (**self).get(url, query)
    }
}

/// [`Fetcher`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> HarvestResult<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| HarvestError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> HarvestResult<FetchResponse> {
        let transport = |e: reqwest::Error| HarvestError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let resp = self.client.get(url).query(query).send().map_err(transport)?;
        let final_url = resp.url().to_string();
        let status = resp.status().as_u16();
        let body = resp.bytes().map_err(transport)?.to_vec();

        debug!(url = %final_url, status, bytes = body.len(), "GET");
        Ok(FetchResponse {
            url: final_url,
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn serve_once(status: u16, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            let seen = request.url().to_string();
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            request.respond(response).unwrap();
            seen
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_http_fetcher_sends_query_and_returns_body() {
        let (base, handle) = serve_once(200, r#"{"ok":true}"#);
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();

        let resp = fetcher
            .get(&format!("{base}/archive/42"), &[("key", "k"), ("show", "webcams:location")])
            .unwrap();

        assert!(resp.is_success());
        assert_eq!(resp.body, br#"{"ok":true}"#);
        assert!(resp.url.ends_with("/archive/42?key=k&show=webcams%3Alocation"));
        assert_eq!(handle.join().unwrap(), "/archive/42?key=k&show=webcams%3Alocation");
    }

    #[test]
    fn test_http_fetcher_returns_error_status() {
        let (base, handle) = serve_once(404, "not here");
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();

        let resp = fetcher.get(&format!("{base}/missing"), &[]).unwrap();

        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
        assert_eq!(resp.body, b"not here");
        handle.join().unwrap();
    }

    #[test]
    fn test_http_fetcher_connection_refused_is_transport_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();

        let err = fetcher.get(&format!("http://{addr}/"), &[]).unwrap_err();
        assert!(matches!(err, HarvestError::Transport { .. }));
    }

    #[test]
    fn test_json_shape_mismatch_is_parse_error() {
        let resp = FetchResponse {
            url: "http://x/archive/1".into(),
            status: 200,
            body: b"<html>".to_vec(),
        };
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, HarvestError::Parse { .. }));
    }
}
