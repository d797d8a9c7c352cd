// SKU Compare - Core Library
// Exposes all modules for use in the CLI, the web server, and tests

pub mod config;
pub mod fetch;
pub mod html;
pub mod input;
pub mod loader;
pub mod logging;
pub mod lookup;
pub mod page;
pub mod record;
pub mod sites;

#[cfg(feature = "server")]
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use fetch::{FetchError, HttpFetcher, PageFetcher, ScrapeFailure};
pub use input::{load_skus, read_skus};
pub use loader::{load_snapshot, BatchLoader, Snapshot, MAX_SKUS};
pub use lookup::LookupService;
pub use record::{ComparisonRecord, Fragment, Site, SourceQuote, SENTINEL};
pub use sites::{
    all_scrapers, fetch_fragment, get_scraper,
    BinocentralScraper, BintelScraper, SiriusOpticsScraper, SiteScraper,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
