use anyhow::Result;
use std::env;
use std::path::PathBuf;

use sku_compare::{load_snapshot, logging, Config};

/// One-shot mode: fetch every SKU once and print the flat records as JSON
///
/// Usage: sku-compare [CSV_PATH]
fn main() -> Result<()> {
    logging::init();

    let mut config = Config::from_env()?;
    if let Some(path) = env::args().nth(1) {
        config.sku_csv = PathBuf::from(path);
    }

    eprintln!("🔎 SKU Compare - fetching {}", config.sku_csv.display());
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let snapshot = load_snapshot(&config)?;

    let rows: Vec<_> = snapshot.records().iter().map(|r| r.field_map()).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);

    eprintln!("\n✓ {} SKUs fetched at {}", snapshot.len(), snapshot.loaded_at().to_rfc3339());

    Ok(())
}
