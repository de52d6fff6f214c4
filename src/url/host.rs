use url::Url;

/// Extracts the host key from a URL
///
/// Returns the lowercase host, with the port appended when the URL carries
/// an explicit one. This is the key into the frontier's host-policy table,
/// so two ports on one machine are treated as distinct hosts with their own
/// robots.txt and politeness timer.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use inkseek::url::extract_host;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://example.com:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com:8080".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
