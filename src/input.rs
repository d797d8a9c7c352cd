// SKU Input - CSV → ordered list of identifiers

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One input row. Only the `SKU` column is read; any other columns
/// (product name, supplier code, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct SkuRow {
    #[serde(rename = "SKU")]
    pub sku: String,
}

/// Load SKUs from a CSV file, in file order
pub fn load_skus(csv_path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open SKU file: {}", csv_path.display()))?;

    read_skus(file).with_context(|| format!("Failed to read SKU file: {}", csv_path.display()))
}

/// Read SKUs from any CSV source with a header row
///
/// Values are kept verbatim, empty ones included: a blank row still
/// occupies its place in the batch.
pub fn read_skus<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut skus = Vec::new();

    for (line_num, result) in rdr.deserialize().enumerate() {
        let row: SkuRow = result
            .with_context(|| format!("Failed to parse CSV line {}", line_num + 2))?;
        skus.push(row.sku);
    }

    Ok(skus)
}
