use crate::UrlError;
use url::Url;

/// Normalizes a URL so that equivalent URLs compare equal
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Only HTTP and HTTPS schemes are accepted
/// 3. Lowercase the host (done by the parser)
/// 4. Percent-encode unsafe characters in path and query; the parser uses
///    the component-specific safe sets, so a space in the path becomes
///    `%20` while already-encoded sequences are left alone
/// 5. Empty path becomes `/`
/// 6. Remove the fragment
///
/// The result is idempotent: normalizing an already-normalized URL returns
/// it unchanged.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Malformed input or unsupported scheme
///
/// # Examples
///
/// ```
/// use inkseek::url::normalize_url;
///
/// let url = normalize_url("http://Example.COM/a b#frag").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/a%20b");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
