//! Pipeline driver — runs every stage in order.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use camharvest_client::Fetcher;
use camharvest_core::{DelayStrategy, HarvestResult};
use tracing::info;

use crate::Harvester;

/// Where each stage reads and writes under the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// `cams.csv`
    pub catalog_path: PathBuf,
    /// `url/`, one listing per camera.
    pub listing_dir: PathBuf,
    /// `img/`
    pub image_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            catalog_path: root.join("cams.csv"),
            listing_dir: root.join("url"),
            image_dir: root.join("img"),
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cameras: usize,
    pub listings: usize,
    pub images: usize,
    pub elapsed: Duration,
}

impl<F: Fetcher, D: DelayStrategy> Harvester<F, D> {
    /// Build the catalog, then every listing, then download every image.
    pub fn run(&self, output_dir: &Path, limit: usize) -> HarvestResult<RunSummary> {
        let started = Instant::now();

        if output_dir.is_dir() {
            info!(dir = %output_dir.display(), "Folder already exists, existing content will NOT be overwritten");
        } else {
            std::fs::create_dir_all(output_dir)?;
        }
        let layout = OutputLayout::new(output_dir);

        let cameras = self.build_catalog(&layout.catalog_path, limit)?;
        let listings = self.build_all_listings(&cameras, &layout.listing_dir)?;
        let images = self.download_all(&layout.listing_dir, &layout.image_dir)?;

        let summary = RunSummary {
            cameras: cameras.len(),
            listings,
            images,
            elapsed: started.elapsed(),
        };
        info!(
            cameras = summary.cameras,
            listings = summary.listings,
            images = summary.images,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "Elapsed time"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camharvest_client::testing::FakeFetcher;
    use camharvest_core::NoDelay;

    use crate::test_util::*;

    #[test]
    fn test_layout() {
        let layout = OutputLayout::new(Path::new("/data/run"));
        assert_eq!(layout.catalog_path, Path::new("/data/run/cams.csv"));
        assert_eq!(layout.listing_dir, Path::new("/data/run/url"));
        assert_eq!(layout.image_dir, Path::new("/data/run/img"));
    }

    #[test]
    fn test_run_creates_missing_output_dir() {
        let fake = FakeFetcher::new().json(page_url(0), &webcams(Vec::<u64>::new()));
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");

        let summary = Harvester::new(&fake, NoDelay, api()).run(&out, 2).unwrap();

        assert_eq!((summary.cameras, summary.listings, summary.images), (0, 0, 0));
        assert!(out.join("cams.csv").exists());
        assert!(out.join("url").is_dir());
        assert!(out.join("img").is_dir());
    }

    #[test]
    fn test_run_keeps_existing_output() {
        let fake = FakeFetcher::new();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cams.csv"),
            "id,status,city,country_code,continent_code,latitude,longitude,timezone\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("keep.txt"), "mine").unwrap();

        Harvester::new(&fake, NoDelay, api()).run(dir.path(), 2).unwrap();

        assert_eq!(fake.request_count(), 0);
        assert_eq!(std::fs::read_to_string(dir.path().join("keep.txt")).unwrap(), "mine");
    }
}
