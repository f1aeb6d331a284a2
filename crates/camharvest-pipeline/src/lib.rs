//! camharvest-pipeline — the sequential ingestion pipeline.
//!
//! Stages run strictly in order and hand off through the filesystem only:
//!
//! 1. [`Harvester::build_catalog`] pages through popular cameras into `cams.csv`.
//! 2. [`Harvester::build_all_listings`] writes one `url/<camid>.csv` per camera.
//! 3. [`Harvester::download_all`] fetches every listed frame into `img/`.
//!
//! Each outbound request is followed by one call to the configured
//! [`DelayStrategy`]. Existing tables are reused according to the
//! [`CachePolicy`]; images are always overwritten.

pub mod catalog;
pub mod download;
pub mod driver;
pub mod listing;

use camharvest_client::{Fetcher, WindyApi};
use camharvest_core::{CachePolicy, DelayStrategy};

pub use driver::{OutputLayout, RunSummary};
pub use listing::archive_entries;

/// Runs pipeline stages against one fetcher and delay strategy.
#[derive(Debug)]
pub struct Harvester<F, D> {
    fetcher: F,
    delay: D,
    api: WindyApi,
    cache: CachePolicy,
}

impl<F: Fetcher, D: DelayStrategy> Harvester<F, D> {
    pub fn new(fetcher: F, delay: D, api: WindyApi) -> Self {
        Self {
            fetcher,
            delay,
            api,
            cache: CachePolicy::default(),
        }
    }

    pub fn with_cache_policy(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }
}
