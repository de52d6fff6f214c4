//! HTML parser for extracting title, text content and links
//!
//! This module turns a fetched HTML body into the pieces the crawler needs:
//! the page title, the visible text content (which feeds the word index),
//! and the absolute, normalized outbound links.

use crate::url::normalize_url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from the <title> tag), if present and non-empty
    pub title: Option<String>,

    /// Concatenated text content of the page
    pub content: String,

    /// Outbound links, absolute and normalized
    pub links: Vec<Url>,
}

/// Terminal per-URL parse failure
#[derive(Debug, Error)]
#[error("HTML parse error: {0}")]
pub struct ParseError(String);

/// Parses HTML content and extracts title, text and links
///
/// # Link Extraction Rules
///
/// - `<a href="...">` targets are resolved against the fetched page's URL
/// - `javascript:`, `mailto:`, `tel:` and `data:` targets are dropped
/// - fragment-only targets (same-page anchors) are dropped
/// - whatever survives is passed through [`normalize_url`]; non-HTTP(S)
///   results are dropped
/// - duplicates within one page are collapsed
///
/// # Arguments
///
/// * `html` - The HTML body
/// * `base_url` - The URL the body was fetched from, for resolving
///   relative links
pub fn parse_page(html: &str, base_url: &Url) -> Result<ParsedPage, ParseError> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let content = extract_text(&document);
    let links = extract_links(&document, base_url)?;

    Ok(ParsedPage {
        title,
        content,
        links,
    })
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<Option<String>, ParseError> {
    let selector = Selector::parse("title").map_err(|e| ParseError(e.to_string()))?;

    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Collects the text content of the whole document
///
/// Text nodes are joined and whitespace is collapsed, so the result is one
/// line of words suitable for tokenization.
fn extract_text(document: &Html) -> String {
    let joined = document.root_element().text().collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts all valid outbound links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Result<Vec<Url>, ParseError> {
    let selector = Selector::parse("a[href]").map_err(|e| ParseError(e.to_string()))?;

    let mut links = HashSet::new();
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(href, base_url) {
                links.insert(url);
            }
        }
    }

    Ok(links.into_iter().collect())
}

/// Resolves a link href to an absolute, normalized URL
///
/// Returns None for links the crawler never follows: special schemes,
/// same-page anchors, and anything that fails normalization.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn link_strings(parsed: &ParsedPage) -> Vec<String> {
        let mut links: Vec<String> = parsed.links.iter().map(|u| u.to_string()).collect();
        links.sort();
        links
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_title_whitespace_trimmed() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_empty_title_is_none() {
        let html = r#"<html><head><title>   </title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_extract_text_content() {
        let html = r#"<html><body><p>Hello   world</p><div>again</div></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(parsed.content, "Hello world again");
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(link_strings(&parsed), vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(link_strings(&parsed), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_link_fragment_dropped_by_normalization() {
        let html = r#"<html><body><a href="/other#section">Link</a></body></html>"#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(link_strings(&parsed), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">JS</a>
                <a href="mailto:test@example.com">Mail</a>
                <a href="tel:+1234567890">Tel</a>
                <a href="data:text/html,x">Data</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_duplicate_links_collapsed() {
        let html = r#"
            <html><body>
                <a href="/page1">One</a>
                <a href="/page1">One again</a>
                <a href="/page1#part">One with fragment</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(link_strings(&parsed), vec!["https://example.com/page1"]);
    }

    #[test]
    fn test_multiple_links() {
        let html = r#"
            <html><body>
                <a href="/page1">Link 1</a>
                <a href="/page2">Link 2</a>
                <a href="https://other.com/page3">Link 3</a>
            </body></html>
        "#;
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(parsed.links.len(), 3);
    }

    #[test]
    fn test_malformed_html_still_parses() {
        // html5ever is error-tolerant; broken markup yields a best-effort DOM
        let html = "<html><body><p>unclosed <a href='/x'>link";
        let parsed = parse_page(html, &base_url()).unwrap();
        assert_eq!(link_strings(&parsed), vec!["https://example.com/x"]);
        assert!(parsed.content.contains("unclosed"));
    }
}
