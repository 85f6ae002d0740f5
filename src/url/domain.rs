use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host, followed by `:port` when the URL carries a
/// non-default port. Two URLs belong to the same site exactly when their
/// domains compare equal.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use article_scout::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Derives a stable site identifier from a homepage URL
///
/// The identifier is the domain with every non-alphanumeric character
/// replaced by `_`, suitable as a registry key or file stem.
///
/// ```
/// use url::Url;
/// use article_scout::url::site_id;
///
/// let url = Url::parse("https://blog.example.com/").unwrap();
/// assert_eq!(site_id(&url), "blog_example_com");
/// ```
pub fn site_id(url: &Url) -> String {
    extract_domain(url)
        .unwrap_or_default()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
