// 🔭 Site Scrapers
// One scraper per retailer; every scraper turns a SKU into a Fragment

use reqwest::Url;
use scraper::Html;
use tracing::warn;

use crate::fetch::{FetchError, PageFetcher, ScrapeFailure};
use crate::html::{all_texts, first, first_attr, first_text};
use crate::record::{Fragment, Site};

// ============================================================================
// CORE TRAIT
// ============================================================================

/// SiteScraper - Fetch and extract one site's fields for a SKU
///
/// `scrape` returns `Err` only when nothing useful can be extracted
/// (request failed, or a required element such as a product link is
/// missing). Individual missing fields stay `None` in the fragment.
pub trait SiteScraper: Send + Sync {
    /// The site this scraper handles
    fn site(&self) -> Site;

    /// URL of the site's search page for `sku`
    fn search_url(&self, sku: &str) -> String;

    /// Fetch and extract
    fn scrape(&self, fetcher: &dyn PageFetcher, sku: &str) -> Result<Fragment, ScrapeFailure>;
}

/// Error boundary around a scraper: never fails, logs and returns an
/// all-sentinel fragment with the attempted URL instead.
pub fn fetch_fragment(scraper: &dyn SiteScraper, fetcher: &dyn PageFetcher, sku: &str) -> Fragment {
    match scraper.scrape(fetcher, sku) {
        Ok(fragment) => fragment,
        Err(failure) => {
            warn!(
                "{} unavailable for SKU {}: {}",
                scraper.site().name(),
                sku,
                failure
            );
            Fragment::unavailable(scraper.site(), failure.url)
        }
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Get the scraper for a site
pub fn get_scraper(site: Site) -> Box<dyn SiteScraper> {
    match site {
        Site::Binocentral => Box::new(BinocentralScraper::new()),
        Site::Bintel => Box::new(BintelScraper::new()),
        Site::SiriusOptics => Box::new(SiriusOpticsScraper::new()),
    }
}

/// One scraper per site, in `Site::ALL` order
pub fn all_scrapers() -> Vec<Box<dyn SiteScraper>> {
    Site::ALL.iter().map(|site| get_scraper(*site)).collect()
}

fn fetch_document(fetcher: &dyn PageFetcher, url: &str) -> Result<Html, ScrapeFailure> {
    let body = fetcher.fetch(url).map_err(|e| ScrapeFailure::at(url, e))?;
    Ok(Html::parse_document(&body))
}

// ============================================================================
// BINOCENTRAL
// ============================================================================

/// Binocentral: search page → first product link → product page
pub struct BinocentralScraper {
    base_url: String,
}

impl BinocentralScraper {
    pub fn new() -> Self {
        Self::with_base_url("https://binocentral.com.au")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        BinocentralScraper {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute product page URL from the search results
    fn product_url(&self, search_url: &str, search: &Html) -> Result<String, FetchError> {
        let href = first(search.root_element(), "a.product-item-link")?
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(FetchError::MissingElement("a.product-item-link"))?;

        let base = Url::parse(search_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        let url = base
            .join(href)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", href, e)))?;

        Ok(url.to_string())
    }

    fn extract_product(&self, url: &str, page: &Html) -> Result<Fragment, FetchError> {
        let root = page.root_element();

        let stock = first_text(root, "div.stock.other span")?;

        let (price, amount) =
            match first(root, "span.price-container.price-final_price.tax.weee")? {
                Some(container) => (
                    first_text(container, "span.price")?,
                    first_attr(container, "span.price-wrapper", "data-price-amount")?,
                ),
                None => (None, None),
            };

        Ok(Fragment::new(Site::Binocentral, url)
            .with_stock(stock)
            .with_price(price)
            .with_extra("Price Amount", amount))
    }
}

impl Default for BinocentralScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteScraper for BinocentralScraper {
    fn site(&self) -> Site {
        Site::Binocentral
    }

    fn search_url(&self, sku: &str) -> String {
        format!(
            "{}/catalogsearch/result/?q={}",
            self.base_url,
            urlencoding::encode(sku)
        )
    }

    fn scrape(&self, fetcher: &dyn PageFetcher, sku: &str) -> Result<Fragment, ScrapeFailure> {
        let search_url = self.search_url(sku);
        let search = fetch_document(fetcher, &search_url)?;

        let product_url = self
            .product_url(&search_url, &search)
            .map_err(|e| ScrapeFailure::at(&search_url, e))?;

        let page = fetch_document(fetcher, &product_url)?;
        self.extract_product(&product_url, &page)
            .map_err(|e| ScrapeFailure::at(&product_url, e))
    }
}

// ============================================================================
// BINTEL
// ============================================================================

/// Bintel: everything is read off the search results page
pub struct BintelScraper {
    base_url: String,
}

impl BintelScraper {
    pub fn new() -> Self {
        Self::with_base_url("https://bintel.com.au")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        BintelScraper {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn extract(&self, url: &str, page: &Html) -> Result<Fragment, FetchError> {
        let root = page.root_element();

        let price = match first(root, "div.price.productitem__price")? {
            Some(container) => first_text(container, "span[data-price-max]")?,
            None => None,
        };

        // Stock is spread over several spans (one per store)
        let stock = match first(root, "div.product-stock-level-wrapper")? {
            Some(container) => {
                let levels = all_texts(container, "span")?;
                if levels.is_empty() {
                    None
                } else {
                    Some(levels.join(", "))
                }
            }
            None => None,
        };

        let button = match first(root, "button.productitem--action-atc")? {
            Some(button) => first_text(button, "span.atc-button--text")?,
            None => None,
        };

        Ok(Fragment::new(Site::Bintel, url)
            .with_price(price)
            .with_stock(stock)
            .with_extra("Button Text", button))
    }
}

impl Default for BintelScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteScraper for BintelScraper {
    fn site(&self) -> Site {
        Site::Bintel
    }

    fn search_url(&self, sku: &str) -> String {
        format!("{}/search?q={}", self.base_url, urlencoding::encode(sku))
    }

    fn scrape(&self, fetcher: &dyn PageFetcher, sku: &str) -> Result<Fragment, ScrapeFailure> {
        let url = self.search_url(sku);
        let page = fetch_document(fetcher, &url)?;
        self.extract(&url, &page).map_err(|e| ScrapeFailure::at(&url, e))
    }
}

// ============================================================================
// SIRIUS OPTICS
// ============================================================================

/// Sirius Optics: first price and stock badge on the search page
pub struct SiriusOpticsScraper {
    base_url: String,
}

impl SiriusOpticsScraper {
    pub fn new() -> Self {
        Self::with_base_url("https://www.sirius-optics.com.au")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        SiriusOpticsScraper {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for SiriusOpticsScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteScraper for SiriusOpticsScraper {
    fn site(&self) -> Site {
        Site::SiriusOptics
    }

    fn search_url(&self, sku: &str) -> String {
        format!(
            "{}/catalogsearch/result/?cat=0&q={}",
            self.base_url,
            urlencoding::encode(sku)
        )
    }

    fn scrape(&self, fetcher: &dyn PageFetcher, sku: &str) -> Result<Fragment, ScrapeFailure> {
        let url = self.search_url(sku);
        let page = fetch_document(fetcher, &url)?;
        let root = page.root_element();

        let extract = || -> Result<Fragment, FetchError> {
            Ok(Fragment::new(Site::SiriusOptics, url.as_str())
                .with_price(first_text(root, "span.price")?)
                .with_stock(first_text(root, "span.amstockstatus")?))
        };

        extract().map_err(|e| ScrapeFailure::at(&url, e))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    //! Canned search/product pages shaped like the real sites' markup

    pub const BINOCENTRAL_PRODUCT: &str = "https://binocentral.com.au/celestron-nexstar-8se.html";

    pub fn binocentral_search(href: &str) -> String {
        format!(
            r#"<html><body><ol class="products">
                 <li><a class="product-item-link" href="{}">Celestron NexStar 8SE</a></li>
               </ol></body></html>"#,
            href
        )
    }

    pub fn binocentral_product(price: &str) -> String {
        format!(
            r#"<html><body>
                 <div class="stock other"><span> In stock </span></div>
                 <span class="price-container price-final_price tax weee">
                   <span class="price-wrapper" data-price-amount="199">
                     <span class="price">{}</span>
                   </span>
                 </span>
               </body></html>"#,
            price
        )
    }

    pub fn bintel_search(price: &str) -> String {
        format!(
            r#"<html><body>
                 <div class="price productitem__price">
                   <span data-price-max="19900">{}</span>
                 </div>
                 <div class="product-stock-level-wrapper">
                   <span>In stock</span><span> </span><span>Ships in 1-2 days</span>
                 </div>
                 <button class="productitem--action-atc">
                   <span class="atc-button--text">Add to cart</span>
                 </button>
               </body></html>"#,
            price
        )
    }

    pub fn sirius_search(price: &str) -> String {
        format!(
            r#"<html><body>
                 <span class="price">{}</span>
                 <span class="amstockstatus">Available</span>
               </body></html>"#,
            price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::fetch::stub::StubFetcher;
    use crate::record::SENTINEL;

    #[test]
    fn test_search_urls() {
        assert_eq!(
            BinocentralScraper::new().search_url("22450"),
            "https://binocentral.com.au/catalogsearch/result/?q=22450"
        );
        assert_eq!(
            BintelScraper::new().search_url("22450"),
            "https://bintel.com.au/search?q=22450"
        );
        assert_eq!(
            SiriusOpticsScraper::new().search_url("22450"),
            "https://www.sirius-optics.com.au/catalogsearch/result/?cat=0&q=22450"
        );
    }

    #[test]
    fn test_search_url_encodes_sku() {
        assert_eq!(
            BintelScraper::new().search_url("AB 12&x"),
            "https://bintel.com.au/search?q=AB%2012%26x"
        );
    }

    #[test]
    fn test_factory_order() {
        let sites: Vec<Site> = all_scrapers().iter().map(|s| s.site()).collect();
        assert_eq!(sites, Site::ALL.to_vec());
        assert_eq!(get_scraper(Site::Bintel).site(), Site::Bintel);
    }

    #[test]
    fn test_binocentral_follows_product_link() {
        let scraper = BinocentralScraper::new();
        let fetcher = StubFetcher::new()
            .page(&scraper.search_url("22450"), &binocentral_search(BINOCENTRAL_PRODUCT))
            .page(BINOCENTRAL_PRODUCT, &binocentral_product("$199"));

        let quote = scraper.scrape(&fetcher, "22450").unwrap().into_quote();

        assert_eq!(quote.price, "$199");
        assert_eq!(quote.stock_status, "In stock");
        assert_eq!(quote.extra("Price Amount"), Some("199"));
        assert_eq!(quote.url, BINOCENTRAL_PRODUCT);
    }

    #[test]
    fn test_binocentral_relative_link_is_resolved() {
        let scraper = BinocentralScraper::new();
        let fetcher = StubFetcher::new()
            .page(&scraper.search_url("22450"), &binocentral_search("/celestron-nexstar-8se.html"))
            .page(BINOCENTRAL_PRODUCT, &binocentral_product("$199"));

        let fragment = scraper.scrape(&fetcher, "22450").unwrap();
        assert_eq!(fragment.url, BINOCENTRAL_PRODUCT);
    }

    #[test]
    fn test_binocentral_missing_link_keeps_search_url() {
        let scraper = BinocentralScraper::new();
        let search_url = scraper.search_url("22450");
        let fetcher = StubFetcher::new().page(&search_url, "<html><body>No results</body></html>");

        let failure = scraper.scrape(&fetcher, "22450").unwrap_err();
        assert_eq!(failure.url, search_url);
        assert!(matches!(failure.source, FetchError::MissingElement(_)));
    }

    #[test]
    fn test_binocentral_product_page_failure_keeps_product_url() {
        let scraper = BinocentralScraper::new();
        let fetcher = StubFetcher::new()
            .page(&scraper.search_url("22450"), &binocentral_search(BINOCENTRAL_PRODUCT))
            .status(BINOCENTRAL_PRODUCT, 500);

        let fragment = fetch_fragment(&scraper, &fetcher, "22450");
        assert_eq!(fragment.url, BINOCENTRAL_PRODUCT);
        assert_eq!(fragment.price, None);
    }

    #[test]
    fn test_bintel_extracts_fields() {
        let scraper = BintelScraper::new();
        let fetcher = StubFetcher::new().page(&scraper.search_url("22450"), &bintel_search("$199"));

        let quote = scraper.scrape(&fetcher, "22450").unwrap().into_quote();

        assert_eq!(quote.price, "$199");
        assert_eq!(quote.stock_status, "In stock, Ships in 1-2 days");
        assert_eq!(quote.extra("Button Text"), Some("Add to cart"));
        assert_eq!(quote.url, "https://bintel.com.au/search?q=22450");
    }

    #[test]
    fn test_bintel_partial_markup_leaves_other_fields() {
        let scraper = BintelScraper::new();
        let html = r#"<div class="price productitem__price"><span data-price-max="1">$5</span></div>"#;
        let fetcher = StubFetcher::new().page(&scraper.search_url("9"), html);

        let quote = scraper.scrape(&fetcher, "9").unwrap().into_quote();

        assert_eq!(quote.price, "$5");
        assert_eq!(quote.stock_status, SENTINEL);
        assert_eq!(quote.extra("Button Text"), Some(SENTINEL));
    }

    #[test]
    fn test_sirius_extracts_fields() {
        let scraper = SiriusOpticsScraper::new();
        let fetcher = StubFetcher::new().page(&scraper.search_url("22450"), &sirius_search("$199"));

        let quote = scraper.scrape(&fetcher, "22450").unwrap().into_quote();

        assert_eq!(quote.price, "$199");
        assert_eq!(quote.stock_status, "Available");
    }

    #[test]
    fn test_fetch_fragment_on_network_failure_is_all_sentinel() {
        let scraper = SiriusOpticsScraper::new();
        let fetcher = StubFetcher::new().status(&scraper.search_url("22450"), 503);

        let quote = fetch_fragment(&scraper, &fetcher, "22450").into_quote();

        assert_eq!(quote.price, SENTINEL);
        assert_eq!(quote.stock_status, SENTINEL);
        assert_eq!(quote.url, scraper.search_url("22450"));
    }
}
