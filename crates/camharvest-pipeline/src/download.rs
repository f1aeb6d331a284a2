//! Image downloads.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use camharvest_client::Fetcher;
use camharvest_core::table::read_table;
use camharvest_core::{ArchiveEntry, DelayStrategy, HarvestResult, parse_capture_stamp};
use tracing::{info, warn};

use crate::Harvester;

impl<F: Fetcher, D: DelayStrategy> Harvester<F, D> {
    /// Download every row of a listing into `image_dir`.
    ///
    /// Files are named `{camid}-{capturedon}.jpg` and overwritten without
    /// checking. The body is written whatever the response status.
    ///
    /// Returns the number of distinct files written; frames of the same
    /// camera captured in the same second share one file.
    pub fn download_images(&self, entries: &[ArchiveEntry], image_dir: &Path) -> HarvestResult<usize> {
        let mut written = HashSet::new();

        for entry in entries {
            let name = entry.image_file_name();
            let resp = self.fetcher.get(&entry.url, &[])?;
            info!(url = %resp.url, "GET");

            if !resp.is_success() {
                warn!(status = resp.status, url = %resp.url, "Image request unsuccessful, writing body anyway");
            }
            if !written.insert(name.clone()) {
                warn!(
                    file = %name,
                    captured_at = ?parse_capture_stamp(&entry.capturedon),
                    lapse = %entry.lapse,
                    seqid = entry.seqid,
                    "Another frame of this listing already wrote this file, overwriting"
                );
            }

            fs::write(image_dir.join(&name), &resp.body)?;
            self.delay.wait_before_next_request();
        }

        Ok(written.len())
    }

    /// Download the images of every listing in `listing_dir`, in file name
    /// order. A missing `listing_dir` means there is nothing to do.
    ///
    /// Returns the number of images written.
    pub fn download_all(&self, listing_dir: &Path, image_dir: &Path) -> HarvestResult<usize> {
        if !listing_dir.is_dir() {
            info!(dir = %listing_dir.display(), "Listing directory does not exist, nothing to download");
            return Ok(0);
        }
        fs::create_dir_all(image_dir)?;

        let mut total = 0;
        for path in listing_files(listing_dir)? {
            let entries: Vec<ArchiveEntry> = read_table(&path)?;
            info!(listing = %path.display(), frames = entries.len(), "Downloading images");
            total += self.download_images(&entries, image_dir)?;
        }
        Ok(total)
    }
}

/// `.csv` files directly inside `dir`, sorted by name.
fn listing_files(dir: &Path) -> HarvestResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
