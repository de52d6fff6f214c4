//! HTTP fetcher implementation
//!
//! This module handles the HTTP side of the crawl:
//! - Building the shared HTTP client with the crawler user agent
//! - Fetching pages and validating their Content-Type
//! - Classifying failures into one terminal error kind
//!
//! Every failure here is terminal for the URL being fetched. There are no
//! retries: a URL gets one pass per run.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A successfully fetched HTML page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,
    /// The media type from the Content-Type header (always `text/html` here)
    pub content_type: String,
    /// Decoded page body
    pub body: String,
}

/// Terminal per-URL fetch failure
///
/// One kind covers every way a fetch can fail; the worker loop handles all
/// variants identically by marking the URL invalid.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("no Content-Type header")]
    MissingContentType,

    #[error("unreadable Content-Type header")]
    InvalidContentType,

    #[error("not HTML: {0}")]
    WrongContentType(String),

    #[error("body is not valid UTF-8")]
    Decode,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Builds the HTTP client shared by all workers
///
/// # Arguments
///
/// * `user_agent` - The fixed user-agent string sent with every request
/// * `timeout` - Total per-request timeout; a slow page fails its URL
///   instead of blocking the pool
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Extracts the media type from a Content-Type header value
///
/// `text/html; charset=utf-8` becomes `text/html`.
pub fn parse_media_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Fetches one URL with full error classification
///
/// Issues a GET request and returns the decoded body, or the terminal
/// failure for this URL:
/// - network errors and timeouts
/// - non-2xx status codes
/// - missing, unreadable or non-`text/html` Content-Type
/// - a body that is not valid UTF-8
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let header = response
        .headers()
        .get(CONTENT_TYPE)
        .ok_or(FetchError::MissingContentType)?;
    let header = header
        .to_str()
        .map_err(|_| FetchError::InvalidContentType)?;

    let content_type = parse_media_type(header);
    if content_type != "text/html" {
        return Err(FetchError::WrongContentType(content_type));
    }

    let final_url = response.url().clone();
    let bytes = response.bytes().await.map_err(classify_transport)?;
    let body = String::from_utf8(bytes.to_vec()).map_err(|_| FetchError::Decode)?;

    Ok(FetchedPage {
        final_url,
        content_type,
        body,
    })
}

fn classify_transport(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}
