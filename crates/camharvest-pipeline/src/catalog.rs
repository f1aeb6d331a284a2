//! Camera catalog builder.

use std::collections::HashSet;
use std::path::Path;

use camharvest_client::{CatalogResponse, Fetcher, PAGE_SIZE};
use camharvest_core::table::{read_table, write_table};
use camharvest_core::{CameraRecord, DelayStrategy, HarvestResult};
use tracing::{info, warn};

use crate::Harvester;

impl<F: Fetcher, D: DelayStrategy> Harvester<F, D> {
    /// Page through popular cameras until `limit` is reached, a page comes
    /// back empty, or the service answers with a non-success status.
    ///
    /// An existing `output_path` is returned as-is when the cache policy
    /// allows it, without enforcing `limit`. Otherwise the accumulated
    /// table is always written, even when empty.
    pub fn build_catalog(&self, output_path: &Path, limit: usize) -> HarvestResult<Vec<CameraRecord>> {
        if self.cache.reuse(output_path) {
            info!(path = %output_path.display(), "Loading previously listed cameras");
            return read_table(output_path);
        }

        let query = self.api.catalog_query();
        let mut cameras = Vec::new();
        let mut seen = HashSet::new();

        for offset in (0..limit).step_by(PAGE_SIZE) {
            let resp = self.fetcher.get(&self.api.catalog_page_url(offset), &query)?;
            self.delay.wait_before_next_request();
            info!(url = %resp.url, "GET");

            if !resp.is_success() {
                warn!(status = resp.status, offset, "Catalog request unsuccessful, stopping");
                break;
            }

            let page: CatalogResponse = resp.json()?;
            if page.result.webcams.is_empty() {
                info!(offset, "No entries found in this range");
                break;
            }

            for entry in page.result.webcams {
                if !seen.insert(entry.id.clone()) {
                    warn!(id = %entry.id, offset, "Camera listed twice, keeping first occurrence");
                    continue;
                }
                cameras.push(CameraRecord::from(entry));
            }
        }

        write_table(output_path, &cameras)?;
        info!(count = cameras.len(), path = %output_path.display(), "Saved camera catalog");
        Ok(cameras)
    }
}
