use url::Url;

/// Extracts the crawl authority (host plus explicit port) from a URL
///
/// The host is lowercased by the URL parser. Default ports are dropped, so
/// `https://example.com:443/` and `https://example.com/` share an authority.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_auditor::url::extract_authority;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
