//! Target URL checks.

use url::Url;

/// Reasons a target URL is refused.
#[derive(Debug, thiserror::Error)]
pub enum TargetUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// The URL is stored exactly as given; nothing is rewritten.
///
/// # Security
///
/// Rejects schemes such as `javascript:`, `data:` or `file:` so a redirect can
/// never point at them.
pub fn validate_target_url(input: &str) -> Result<(), TargetUrlError> {
    let url = Url::parse(input).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_target_url("https://example.com").is_ok());
        assert!(validate_target_url("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_target_url("https://EXAMPLE.COM:8443/Path").is_ok());
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_target_url("not-a-url"),
            Err(TargetUrlError::InvalidFormat(_))
        ));
        assert!(validate_target_url("").is_err());
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com",
        ] {
            assert!(
                matches!(
                    validate_target_url(input),
                    Err(TargetUrlError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }
}
