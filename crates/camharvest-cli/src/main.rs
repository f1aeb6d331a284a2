use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use camharvest_client::{HttpFetcher, WindyApi};
use camharvest_core::{CachePolicy, Credentials, HarvestConfig, RandomDelay};
use camharvest_pipeline::Harvester;

/// Harvest popular webcams, their archive listings, and the archived frames.
///
/// Credentials are read from WINDYKEY, WINDYTOKEN and WINDYTOKEN2.
/// Files already present under --outdir are reused; images are refetched.
#[derive(Debug, Parser)]
#[command(name = "camharvest", version)]
struct Cli {
    /// Max number of cameras
    #[arg(long, default_value_t = 2)]
    limit: usize,
    /// Root of all output (cams.csv, url/, img/)
    #[arg(long, default_value_os_t = std::env::temp_dir())]
    outdir: PathBuf,
    /// Optional harvest.toml with endpoint, throttle and HTTP settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rebuild the catalog and listings even when their files exist
    #[arg(long)]
    refresh: bool,
    /// Override the upper bound of the random pause after each request, in seconds
    #[arg(long)]
    max_delay: Option<f64>,
}

impl Cli {
    fn harvest_config(&self) -> anyhow::Result<HarvestConfig> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::from_file(path)?,
            None => HarvestConfig::default(),
        };
        if self.refresh {
            config.cache.policy = CachePolicy::Refresh;
        }
        if let Some(secs) = self.max_delay {
            config.throttle.max_delay_secs = secs;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("camharvest=info".parse()?)
        )
        .init();

    let cli = Cli::parse();
    let credentials = Credentials::from_env()?;
    let config = cli.harvest_config()?;

    let fetcher = HttpFetcher::new(&config.http)?;
    let delay = RandomDelay::new(config.throttle.max_delay());
    let api = WindyApi::new(&config.api, credentials);
    let harvester = Harvester::new(fetcher, delay, api).with_cache_policy(config.cache.policy);

    info!(limit = cli.limit, outdir = %cli.outdir.display(), "Starting harvest");
    let summary = harvester
        .run(&cli.outdir, cli.limit)
        .with_context(|| format!("harvest into {} failed", cli.outdir.display()))?;

    println!(
        "✓ {} cameras, {} listings, {} images in {:.1}s",
        summary.cameras,
        summary.listings,
        summary.images,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
