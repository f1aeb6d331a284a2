//! camharvest-client — talks to the webcam-hosting service.
//!
//! [`Fetcher`] is the single seam for outbound traffic: the pipeline only
//! ever calls `get`, so tests swap in [`testing::FakeFetcher`] while the
//! binary uses the blocking reqwest-backed [`HttpFetcher`].

pub mod api;
pub mod fetch;
pub mod wire;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use api::{PAGE_SIZE, WindyApi};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use wire::{ArchiveResponse, CatalogResponse, FrameDescriptor, WebcamEntry, WebcamLocation};
