// 📦 Batch Loader - runs once before the server starts
// SKUs → (3 sequential site fetches each) → immutable Snapshot

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::input::load_skus;
use crate::record::ComparisonRecord;
use crate::sites::{all_scrapers, fetch_fragment, SiteScraper};

/// Upper bound on SKUs fetched per run. Anything past it is ignored.
pub const MAX_SKUS: usize = 20;

/// Snapshot - The cached result of one batch run
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Vec<ComparisonRecord>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<ComparisonRecord>, loaded_at: DateTime<Utc>) -> Self {
        Snapshot { records, loaded_at }
    }

    pub fn records(&self) -> &[ComparisonRecord] {
        &self.records
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// BatchLoader - Runs every scraper for every SKU, strictly in sequence
pub struct BatchLoader<'a> {
    scrapers: Vec<Box<dyn SiteScraper>>,
    fetcher: &'a dyn PageFetcher,
}

impl<'a> BatchLoader<'a> {
    pub fn new(scrapers: Vec<Box<dyn SiteScraper>>, fetcher: &'a dyn PageFetcher) -> Self {
        BatchLoader {
            scrapers,
            fetcher,
        }
    }

    /// Fetch one SKU from every site and merge the fragments
    pub fn load_one(&self, sku: &str) -> ComparisonRecord {
        let fragments = self
            .scrapers
            .iter()
            .map(|scraper| fetch_fragment(scraper.as_ref(), self.fetcher, sku))
            .collect();

        ComparisonRecord::from_fragments(sku, fragments)
    }

    /// Process at most the first `MAX_SKUS` input rows
    ///
    /// Blank SKUs are skipped but still use up a slot.
    pub fn load(&self, skus: &[String]) -> Snapshot {
        info!("Starting to process {} SKUs...", skus.len().min(MAX_SKUS));

        let mut records = Vec::with_capacity(skus.len().min(MAX_SKUS));

        for (row, sku) in skus.iter().enumerate().take(MAX_SKUS) {
            if sku.is_empty() {
                warn!("Skipping input row {}: empty SKU", row + 1);
                continue;
            }
            info!("Processing SKU: {}", sku);
            records.push(self.load_one(sku));
        }

        if skus.len() > MAX_SKUS {
            info!(
                "Stopping after processing {} SKUs ({} not fetched).",
                MAX_SKUS,
                skus.len() - MAX_SKUS
            );
        }

        let unavailable = records
            .iter()
            .flat_map(|r| r.quotes.iter())
            .filter(|q| !q.is_available())
            .count();

        info!(
            "Finished processing {} SKUs ({} source quotes unavailable)",
            records.len(),
            unavailable
        );

        Snapshot::new(records, Utc::now())
    }
}

/// Startup step: read the SKU file and fetch everything over HTTP
///
/// Only I/O setup can fail here (unreadable CSV, client construction).
/// Site failures become sentinel values inside the snapshot.
pub fn load_snapshot(config: &Config) -> Result<Snapshot> {
    let skus = load_skus(&config.sku_csv)?;
    info!("Loaded {} SKUs from {}", skus.len(), config.sku_csv.display());

    let fetcher = HttpFetcher::new(&config.user_agent).context("Failed to create HTTP client")?;
    let loader = BatchLoader::new(all_scrapers(), &fetcher);

    Ok(loader.load(&skus))
}
