//! Per-camera archive listings.

use std::path::Path;

use camharvest_client::{ArchiveResponse, Fetcher};
use camharvest_core::table::{read_table, write_table};
use camharvest_core::{
    ArchiveEntry, CameraRecord, DelayStrategy, HarvestError, HarvestResult, capture_stamp,
};
use tracing::{debug, info};

use crate::Harvester;

/// Flatten an archive response into listing rows.
///
/// Rows follow bucket order and frame order of the response; `seqid`
/// restarts at zero for every bucket. `source` is only used in errors.
pub fn archive_entries(
    camera_id: &str,
    archive: ArchiveResponse,
    source: &str,
) -> HarvestResult<Vec<ArchiveEntry>> {
    let mut entries = Vec::with_capacity(archive.frame_count());
    for (lapse, frames) in archive.buckets {
        for (seqid, frame) in frames.into_iter().enumerate() {
            let capturedon = frame
                .epoch_ms()
                .and_then(capture_stamp)
                .ok_or_else(|| HarvestError::Parse {
                    url: source.to_string(),
                    reason: format!("unusable timestamp {} in bucket {lapse}", frame.timestamp),
                })?;
            entries.push(ArchiveEntry {
                camid: camera_id.to_string(),
                lapse: lapse.clone(),
                seqid,
                url: frame.url,
                capturedon,
            });
        }
    }
    Ok(entries)
}

impl<F: Fetcher, D: DelayStrategy> Harvester<F, D> {
    /// Fetch and persist the archive listing of one camera.
    ///
    /// No retry: a failed request, an error status or an unexpected body
    /// shape aborts the listing.
    pub fn build_listing(
        &self,
        camera_id: &str,
        timezone: &str,
        output_path: &Path,
    ) -> HarvestResult<Vec<ArchiveEntry>> {
        if self.cache.reuse(output_path) {
            debug!(camera = camera_id, path = %output_path.display(), "Reusing archive listing");
            return read_table(output_path);
        }

        let resp = self
            .fetcher
            .get(&self.api.archive_url(camera_id), &self.api.archive_query())?;
        self.delay.wait_before_next_request();
        info!(url = %resp.url, "GET");

        if !resp.is_success() {
            return Err(HarvestError::Transport {
                url: resp.url,
                reason: format!("archive request returned status {}", resp.status),
            });
        }

        let archive: ArchiveResponse = resp.json()?;
        let entries = archive_entries(camera_id, archive, &resp.url)?;

        // Capture times stay in UTC; the camera's zone is informational only.
        debug!(camera = camera_id, timezone, frames = entries.len(), "Parsed archive");
        write_table(output_path, &entries)?;
        Ok(entries)
    }

    /// Build the listing of every camera, in catalog order, into
    /// `{listing_dir}/{camera_id}.csv`. The first failure aborts the run.
    ///
    /// Returns the number of listings now present.
    pub fn build_all_listings(&self, cameras: &[CameraRecord], listing_dir: &Path) -> HarvestResult<usize> {
        info!(cameras = cameras.len(), dir = %listing_dir.display(), "Building archive listings");
        std::fs::create_dir_all(listing_dir)?;

        for camera in cameras {
            let path = listing_dir.join(format!("{}.csv", camera.id));
            self.build_listing(&camera.id, &camera.timezone, &path)?;
        }
        Ok(cameras.len())
    }
}
