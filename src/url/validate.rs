use crate::url::domain::extract_host;
use crate::{UrlError, UrlResult};
use url::Url;

/// Checks that a resolved link is an absolute URL with a host
///
/// Links failing it are dropped before probing. Any scheme passes here; a
/// scheme the transport cannot speak fails later as a network error.
pub fn ensure_absolute(url: &Url) -> UrlResult<()> {
    if extract_host(url).is_none() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(())
}

/// Checks that a URL is an absolute http(s) URL with a host
///
/// The audited page itself must pass this, since it is fetched over HTTP.
pub fn ensure_probeable(url: &Url) -> UrlResult<()> {
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::InvalidScheme(other.to_string())),
    }

    if extract_host(url).is_none() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(())
}

/// Parses the audited page's URL
///
/// # Returns
///
/// * `Ok(Url)` - An absolute http(s) URL with a host
/// * `Err(UrlError)` - The string is not a usable page URL
pub fn parse_page_url(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;
    ensure_probeable(&url)?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(parse_page_url("https://example.com/").is_ok());
        assert!(parse_page_url("http://127.0.0.1:3000/page").is_ok());
        assert!(parse_page_url("  https://example.com/padded  ").is_ok());
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(parse_page_url("/just/a/path"), Err(UrlError::Parse(_))));
        assert!(matches!(parse_page_url("example.com"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            parse_page_url("ftp://example.com/file"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(
            parse_page_url("file:///etc/hosts"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_ensure_probeable_requires_host() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert!(ensure_probeable(&url).is_err());
    }

    #[test]
    fn test_ensure_absolute_accepts_any_scheme_with_host() {
        let ftp = Url::parse("ftp://files.example.com/x").unwrap();
        assert!(ensure_absolute(&ftp).is_ok());
        assert!(ensure_probeable(&ftp).is_err());

        let data = Url::parse("data:text/plain,hello").unwrap();
        assert!(matches!(ensure_absolute(&data), Err(UrlError::MissingHost(_))));
    }
}
