// HTML page for the lookup tool
// Search form, then either the comparison table or a not-found message.

use chrono::{DateTime, Utc};

use crate::record::{ComparisonRecord, Site};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SKU Comparison Tool</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>
        body { background-color: #f8f9fa; }
        .container { max-width: 800px; margin-top: 50px; }
        .header { text-align: center; margin-bottom: 30px; }
        .search-form { display: flex; justify-content: center; margin-bottom: 30px; }
        .search-form input[type="text"] { width: 300px; margin-right: 10px; }
        .table-container { margin-top: 20px; }
        .error-message { text-align: center; color: #dc3545; margin-top: 20px; }
        .loaded-at { text-align: center; color: #6c757d; margin-top: 30px; font-size: 0.85em; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1 class="display-4">SKU Comparison Tool</h1>
            <p class="lead">Search for an SKU to compare prices and stock across suppliers.</p>
        </div>
"#;

const FOOT: &str = r#"    </div>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>
"#;

/// Escape text for use in element content and double-quoted attributes
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the whole page
///
/// * `sku` - the searched SKU, `None` when nothing was searched
/// * `record` - the match for `sku`, if any
pub fn render(sku: Option<&str>, record: Option<&ComparisonRecord>, loaded_at: DateTime<Utc>) -> String {
    let mut html = String::from(HEAD);

    html.push_str(&format!(
        r#"        <form method="GET" action="/" class="search-form">
            <input type="text" name="sku" class="form-control" placeholder="Enter SKU (e.g., 22450)" value="{}" required>
            <button type="submit" class="btn btn-primary">Search</button>
        </form>
"#,
        escape(sku.unwrap_or(""))
    ));

    match (sku, record) {
        (_, Some(record)) => html.push_str(&comparison_table(record)),
        (Some(sku), None) => html.push_str(&format!(
            r#"        <div class="error-message">
            <p>SKU "{}" not found. Please try another SKU.</p>
        </div>
"#,
            escape(sku)
        )),
        (None, None) => {}
    }

    html.push_str(&format!(
        "        <p class=\"loaded-at\">Prices fetched {}</p>\n",
        loaded_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str(FOOT);
    html
}

fn comparison_table(record: &ComparisonRecord) -> String {
    let mut rows = String::new();

    for site in Site::ALL {
        let Some(quote) = record.quote(site) else {
            continue;
        };
        rows.push_str(&format!(
            r#"                    <tr>
                        <td>{name}</td>
                        <td>{price}</td>
                        <td>{stock}</td>
                        <td><a href="{url}" target="_blank" class="btn btn-sm btn-success">Buy from {name}</a></td>
                    </tr>
"#,
            name = site.name(),
            price = escape(&quote.price),
            stock = escape(&quote.stock_status),
            url = escape(&quote.url),
        ));
    }

    format!(
        r#"        <div class="table-container">
            <h3>Comparison for SKU: {}</h3>
            <table class="table table-striped table-bordered">
                <thead class="table-dark">
                    <tr>
                        <th>Supplier</th>
                        <th>Price</th>
                        <th>Stock Status</th>
                        <th>Buy Link</th>
                    </tr>
                </thead>
                <tbody>
{}                </tbody>
            </table>
        </div>
"#,
        escape(&record.sku),
        rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Fragment, SENTINEL};

    fn record() -> ComparisonRecord {
        ComparisonRecord::from_fragments(
            "22450",
            vec![
                Fragment::new(Site::Binocentral, "https://binocentral.com.au/p.html")
                    .with_price(Some("$199".to_string())),
                Fragment::unavailable(Site::Bintel, "https://bintel.com.au/search?q=22450"),
                Fragment::new(Site::SiriusOptics, "https://s/?cat=0&q=22450")
                    .with_stock(Some("Available".to_string())),
            ],
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn test_no_search_has_form_only() {
        let html = render(None, None, Utc::now());
        assert!(html.contains("<form"));
        assert!(!html.contains("not found"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_table_has_three_rows() {
        let rec = record();
        let html = render(Some("22450"), Some(&rec), Utc::now());

        assert!(html.contains("Comparison for SKU: 22450"));
        assert_eq!(html.matches("Buy from ").count(), 3);
        assert!(html.contains("<td>$199</td>"));
        assert!(html.contains(&format!("<td>{}</td>", SENTINEL)));
        assert!(html.contains("https://s/?cat=0&amp;q=22450"));
        assert!(html.contains(r#"value="22450""#));
    }

    #[test]
    fn test_not_found_message_is_escaped() {
        let html = render(Some("<b>x</b>"), None, Utc::now());
        assert!(html.contains("SKU \"&lt;b&gt;x&lt;/b&gt;\" not found. Please try another SKU."));
        assert!(!html.contains("<b>x</b>"));
    }
}
