//! Redirect target validation and normalization.
//!
//! The sole gate preventing open-redirect and script-scheme injection when a
//! tag's stored target is attacker-influenced. Runs on every resolution:
//! cached state never bypasses current policy, because the policy may tighten
//! after an entry was written.

use url::Url;

/// Errors that can occur while validating a redirect target.
#[derive(Debug, thiserror::Error)]
pub enum InvalidRedirectTarget {
    #[error("Invalid redirect URL: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS redirect targets are allowed")]
    UnsupportedScheme,

    #[error("Failed to normalize redirect URL: {0}")]
    NormalizationFailed(String),
}

/// Validates and normalizes an arbitrary redirect target.
///
/// # Rules
///
/// 1. **Scheme**: only `http` and `https` are allowed; `javascript:`, `data:`,
///    `file:` and friends are rejected
/// 2. **Hostname**: lowercased
/// 3. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 4. **Fragments**: removed
/// 5. **Path and query**: preserved as-is
///
/// # Errors
///
/// Returns [`InvalidRedirectTarget::InvalidFormat`] for malformed URLs and
/// [`InvalidRedirectTarget::UnsupportedScheme`] for non-HTTP(S) schemes.
pub fn sanitize_redirect(input: &str) -> Result<String, InvalidRedirectTarget> {
    let mut url =
        Url::parse(input).map_err(|e| InvalidRedirectTarget::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(InvalidRedirectTarget::UnsupportedScheme),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            InvalidRedirectTarget::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            InvalidRedirectTarget::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_https() {
        let result = sanitize_redirect("https://example.com/x");
        assert_eq!(result.unwrap(), "https://example.com/x");
    }

    #[test]
    fn test_sanitize_http() {
        let result = sanitize_redirect("http://example.com");
        assert_eq!(result.unwrap(), "http://example.com/");
    }

    #[test]
    fn test_sanitize_lowercases_host() {
        let result = sanitize_redirect("https://EXAMPLE.COM/Path");
        assert_eq!(result.unwrap(), "https://example.com/Path");
    }

    #[test]
    fn test_sanitize_removes_default_port() {
        assert_eq!(
            sanitize_redirect("https://example.com:443/path").unwrap(),
            "https://example.com/path"
        );
        assert_eq!(
            sanitize_redirect("http://example.com:80/path").unwrap(),
            "http://example.com/path"
        );
    }

    #[test]
    fn test_sanitize_keeps_custom_port() {
        assert_eq!(
            sanitize_redirect("https://example.com:8443/path").unwrap(),
            "https://example.com:8443/path"
        );
    }

    #[test]
    fn test_sanitize_removes_fragment() {
        assert_eq!(
            sanitize_redirect("https://example.com/page?k=v#section").unwrap(),
            "https://example.com/page?k=v"
        );
    }

    #[test]
    fn test_sanitize_rejects_javascript_scheme() {
        let result = sanitize_redirect("javascript:alert(1)");
        assert!(matches!(
            result.unwrap_err(),
            InvalidRedirectTarget::UnsupportedScheme
        ));
    }

    #[test]
    fn test_sanitize_rejects_data_scheme() {
        let result = sanitize_redirect("data:text/html,<script>1</script>");
        assert!(matches!(
            result.unwrap_err(),
            InvalidRedirectTarget::UnsupportedScheme
        ));
    }

    #[test]
    fn test_sanitize_rejects_ftp_scheme() {
        let result = sanitize_redirect("ftp://x.com");
        assert!(matches!(
            result.unwrap_err(),
            InvalidRedirectTarget::UnsupportedScheme
        ));
    }

    #[test]
    fn test_sanitize_rejects_malformed() {
        let result = sanitize_redirect("not a url");
        assert!(matches!(
            result.unwrap_err(),
            InvalidRedirectTarget::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_sanitize_rejects_empty() {
        assert!(sanitize_redirect("").is_err());
    }

    #[test]
    fn test_sanitize_rejects_relative() {
        assert!(sanitize_redirect("/just/a/path").is_err());
    }

    #[test]
    fn test_sanitize_preserves_query() {
        assert_eq!(
            sanitize_redirect("https://example.com/s?q=rust&lang=en").unwrap(),
            "https://example.com/s?q=rust&lang=en"
        );
    }
}
