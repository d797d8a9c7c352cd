//! HTML lookups on top of `scraper`
//!
//! Each lookup answers `Option<String>`: a missing element and an element
//! with only whitespace are both `None`.

use scraper::{ElementRef, Selector};

use crate::fetch::FetchError;

pub fn selector(css: &'static str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|_| FetchError::InvalidSelector(css))
}

/// First descendant of `scope` matching `css`
pub fn first<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<Option<ElementRef<'a>>, FetchError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next())
}

/// Trimmed text content of an element, `None` when blank
pub fn text_of(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Text of the first match
pub fn first_text(scope: ElementRef<'_>, css: &'static str) -> Result<Option<String>, FetchError> {
    Ok(first(scope, css)?.and_then(text_of))
}

/// Attribute of the first match
pub fn first_attr(
    scope: ElementRef<'_>,
    css: &'static str,
    attr: &str,
) -> Result<Option<String>, FetchError> {
    Ok(first(scope, css)?
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string))
}

/// Non-blank texts of every match, in document order
pub fn all_texts(scope: ElementRef<'_>, css: &'static str) -> Result<Vec<String>, FetchError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).filter_map(text_of).collect())
}
