// SKU Compare - Web Server
// Fetch once at startup, then serve lookups from memory

use anyhow::{Context, Result};
use sku_compare::{load_snapshot, logging, web, Config, LookupService};

fn main() -> Result<()> {
    logging::init();

    println!("🌐 SKU Compare - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::from_env()?;

    // The batch uses a blocking HTTP client, so it has to finish before
    // the async runtime is created.
    let snapshot = load_snapshot(&config)?;
    println!("✓ Cached {} SKUs", snapshot.len());

    let app = web::create_app(LookupService::new(snapshot));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    println!("\n🚀 Server running on http://{}", config.bind_addr());
    println!("   Press Ctrl+C to stop\n");

    runtime.block_on(web::serve(&config.bind_addr(), app))
}
