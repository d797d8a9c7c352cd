// Comparison Records - one per SKU
// Fragments come out of the site scrapers with optional fields,
// quotes are the merged form where every gap is the sentinel.

use std::collections::BTreeMap;

/// Placeholder for any field that could not be extracted
pub const SENTINEL: &str = "N/A";

// ============================================================================
// SITES
// ============================================================================

/// Site - Which retailer a fragment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Binocentral,
    Bintel,
    SiriusOptics,
}

impl Site {
    /// All sites, in the order they are fetched and displayed
    pub const ALL: [Site; 3] = [Site::Binocentral, Site::Bintel, Site::SiriusOptics];

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            Site::Binocentral => "Binocentral",
            Site::Bintel => "Bintel",
            Site::SiriusOptics => "Sirius Optics",
        }
    }

    /// Label of the price field in the flat record
    pub fn price_label(&self) -> &'static str {
        match self {
            Site::Bintel => "Current Price Max",
            Site::Binocentral | Site::SiriusOptics => "Price",
        }
    }

    /// Label of the stock field in the flat record
    pub fn stock_label(&self) -> &'static str {
        match self {
            Site::Binocentral => "Stock Info",
            Site::Bintel | Site::SiriusOptics => "Stock Status",
        }
    }

    /// Site-specific extra fields, beyond price/stock/url
    pub fn extra_fields(&self) -> &'static [&'static str] {
        match self {
            Site::Binocentral => &["Price Amount"],
            Site::Bintel => &["Button Text"],
            Site::SiriusOptics => &[],
        }
    }

    fn key(&self, label: &str) -> String {
        format!("{} {}", self.name(), label)
    }
}

// ============================================================================
// FRAGMENT (scraper output)
// ============================================================================

/// Fragment - Partial record produced by one site's scraper
///
/// Every extracted field is optional; `url` is the URL that was actually
/// attempted and is always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub site: Site,
    pub url: String,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub extras: Vec<(&'static str, Option<String>)>,
}

impl Fragment {
    /// Empty fragment for `site`, with every field (extras included) absent
    pub fn new(site: Site, url: impl Into<String>) -> Self {
        Fragment {
            site,
            url: url.into(),
            price: None,
            stock: None,
            extras: site.extra_fields().iter().map(|name| (*name, None)).collect(),
        }
    }

    /// Fragment for a failed fetch: nothing extracted, URL preserved
    pub fn unavailable(site: Site, url: impl Into<String>) -> Self {
        Fragment::new(site, url)
    }

    /// Builder pattern: set price
    pub fn with_price(mut self, price: Option<String>) -> Self {
        self.price = price;
        self
    }

    /// Builder pattern: set stock status
    pub fn with_stock(mut self, stock: Option<String>) -> Self {
        self.stock = stock;
        self
    }

    /// Builder pattern: set an extra field
    ///
    /// Names that are not declared by `Site::extra_fields` are ignored.
    pub fn with_extra(mut self, name: &str, value: Option<String>) -> Self {
        if let Some(slot) = self.extras.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        }
        self
    }

    /// Merge step: substitute the sentinel for every absent value
    pub fn into_quote(self) -> SourceQuote {
        let fill = |v: Option<String>| v.unwrap_or_else(|| SENTINEL.to_string());

        SourceQuote {
            site: self.site,
            price: fill(self.price),
            stock_status: fill(self.stock),
            url: self.url,
            extras: self
                .extras
                .into_iter()
                .map(|(name, value)| (name.to_string(), fill(value)))
                .collect(),
        }
    }
}

// ============================================================================
// QUOTE & RECORD (merged, immutable)
// ============================================================================

/// SourceQuote - One site's merged, sentinel-filled values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuote {
    pub site: Site,
    pub price: String,
    pub stock_status: String,
    pub url: String,
    pub extras: Vec<(String, String)>,
}

impl SourceQuote {
    /// Look up an extra field by name
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True if at least one extracted field is not the sentinel
    pub fn is_available(&self) -> bool {
        self.price != SENTINEL
            || self.stock_status != SENTINEL
            || self.extras.iter().any(|(_, v)| v != SENTINEL)
    }
}

/// ComparisonRecord - SKU plus one quote per site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRecord {
    pub sku: String,
    pub quotes: Vec<SourceQuote>,
}

impl ComparisonRecord {
    /// Merge fragments with the SKU into a record
    pub fn from_fragments(sku: impl Into<String>, fragments: Vec<Fragment>) -> Self {
        ComparisonRecord {
            sku: sku.into(),
            quotes: fragments.into_iter().map(Fragment::into_quote).collect(),
        }
    }

    /// Quote for a given site, if the record has one
    pub fn quote(&self, site: Site) -> Option<&SourceQuote> {
        self.quotes.iter().find(|q| q.site == site)
    }

    /// Flat field-name → value view, e.g. "Bintel Stock Status"
    pub fn field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("SKU".to_string(), self.sku.clone());

        for quote in &self.quotes {
            let site = quote.site;
            map.insert(site.key(site.price_label()), quote.price.clone());
            map.insert(site.key(site.stock_label()), quote.stock_status.clone());
            map.insert(site.key("Search URL"), quote.url.clone());
            for (name, value) in &quote.extras {
                map.insert(site.key(name), value.clone());
            }
        }

        map
    }
}

// ============================================================================
// TESTS
// ============================================================================
