//! HTML field extraction
//!
//! Maps raw page content to a [`ScrapedItem`]. This is a deliberately
//! generic placeholder contract: `title` comes from the first `<h1>` and
//! `description` from the standard meta tag. Site-specific deployments
//! swap in their own selectors here.

use crate::ScrapedItem;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Errors produced while extracting fields from a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no document root in page at {url}")]
    NoRoot { url: String },
}

/// Extracts structured fields from an HTML page
///
/// Pure and deterministic; no I/O. Missing fields degrade to empty
/// strings rather than failing. Only markup so broken that no element
/// tree exists at all is an error, which callers treat as a per-item
/// skip.
pub fn extract(html: &str, url: &Url) -> Result<ScrapedItem, ExtractError> {
    let document = Html::parse_document(html);

    document
        .tree
        .root()
        .children()
        .find_map(ElementRef::wrap)
        .ok_or_else(|| ExtractError::NoRoot {
            url: url.to_string(),
        })?;

    let title = first_text(&document, "h1").unwrap_or_default();
    let description = meta_description(&document).unwrap_or_default();

    Ok(ScrapedItem {
        title,
        description,
        url: url.to_string(),
    })
}

/// Returns the trimmed text of the first element matching the selector
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Returns the content attribute of `<meta name="description">`
fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}
