use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Parse a service base URL. Only http(s) URLs that can carry path segments are accepted.
pub fn parse_base_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    let supported = matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base();
    supported.then_some(url)
}

/// Append percent-encoded path segments to a base URL
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

pub fn build_client(
    timeout: Option<Duration>,
    cookies: Option<Arc<SessionJar>>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(cookies) = cookies {
        builder = builder.cookie_provider(cookies);
    }
    builder.build()
}

/// Cookie jar for the account service that can be emptied on logout.
/// Expiry and deletion follow the `Set-Cookie` attributes the service sends.
#[derive(Default)]
pub struct SessionJar {
    jar: RwLock<Jar>,
}

impl SessionJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the jar from a saved `Cookie` header value (`a=1; b=2`)
    pub fn restore(&self, header: &str, url: &Url) {
        let jar = self.jar.read().unwrap_or_else(|e| e.into_inner());
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.add_cookie_str(&format!("{}; Path=/", pair), url);
        }
    }

    /// `Cookie` header value that would be sent to `url`
    pub fn header_value(&self, url: &Url) -> Option<String> {
        self.cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    pub fn clear(&self) {
        *self.jar.write().unwrap_or_else(|e| e.into_inner()) = Jar::default();
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.read().unwrap_or_else(|e| e.into_inner()).cookies(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("https://restcountries.com/v3.1").is_some());
        assert!(parse_base_url("http://localhost:5000/api/").is_some());
        assert!(parse_base_url("ftp://example.com").is_none());
        assert!(parse_base_url("mailto:someone@example.com").is_none());
        assert!(parse_base_url("not a url").is_none());
    }

    #[test]
    fn test_endpoint_appends_and_encodes_segments() {
        let base = parse_base_url("https://restcountries.com/v3.1").unwrap();
        assert_eq!(
            endpoint(&base, &["name", "united states"]).as_str(),
            "https://restcountries.com/v3.1/name/united%20states"
        );

        let trailing = parse_base_url("http://localhost:5000/api/").unwrap();
        assert_eq!(
            endpoint(&trailing, &["removeFav", "USA"]).as_str(),
            "http://localhost:5000/api/removeFav/USA"
        );
    }

    #[test]
    fn test_endpoint_does_not_allow_path_escape() {
        let base = parse_base_url("https://restcountries.com/v3.1").unwrap();
        let url = endpoint(&base, &["name", "a/b"]);
        assert_eq!(url.as_str(), "https://restcountries.com/v3.1/name/a%2Fb");
    }

    fn account_url() -> Url {
        parse_base_url("http://localhost:5000/api").unwrap()
    }

    #[test]
    fn test_jar_restores_saved_header() {
        let url = account_url();
        let jar = SessionJar::new();
        jar.restore("connect.sid=abc; theme=dark", &url);

        let header = jar.header_value(&url).unwrap();
        assert!(header.contains("connect.sid=abc"));
        assert!(header.contains("theme=dark"));
    }

    #[test]
    fn test_jar_replaces_cookie_by_name() {
        let url = account_url();
        let jar = SessionJar::new();
        jar.restore("connect.sid=old", &url);

        let update = HeaderValue::from_static("connect.sid=new; Path=/; HttpOnly");
        jar.set_cookies(&mut std::iter::once(&update), &url);

        assert_eq!(jar.header_value(&url).as_deref(), Some("connect.sid=new"));
    }

    #[test]
    fn test_jar_honours_expired_cookie() {
        let url = account_url();
        let jar = SessionJar::new();
        jar.restore("connect.sid=abc", &url);

        let expired = HeaderValue::from_static("connect.sid=; Max-Age=0; Path=/");
        jar.set_cookies(&mut std::iter::once(&expired), &url);

        assert_eq!(jar.header_value(&url), None);
    }

    #[test]
    fn test_jar_clear() {
        let url = account_url();
        let jar = SessionJar::new();
        jar.restore("connect.sid=abc", &url);
        jar.clear();
        assert_eq!(jar.header_value(&url), None);
    }
}
