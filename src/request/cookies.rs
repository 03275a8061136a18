use http::header::COOKIE;
use http::HeaderMap;

/// Cookies sent with a request, in the order they appeared.
///
/// The jar is filled by the upstream cookie parser ([`CookieJar::from_headers`]
/// in the bundled transport adapter) before the request reaches the
/// dispatcher, and travels on the request as a plain field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<(String, String)>,
}

impl CookieJar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single `Cookie` header value (`a=b; c=d`).
    ///
    /// Pairs without a name are skipped; a pair without `=` yields an empty
    /// value. Values wrapped in double quotes are unwrapped.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let mut jar = Self::new();
        jar.extend_from_header(header);
        jar
    }

    /// Parse every `Cookie` header present in `headers`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = Self::new();
        for value in headers.get_all(COOKIE) {
            jar.extend_from_header(&String::from_utf8_lossy(value.as_bytes()));
        }
        jar
    }

    fn extend_from_header(&mut self, header: &str) {
        for pair in header.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let name = parts.next().unwrap_or("").trim();
            if name.is_empty() {
                continue;
            }
            let value = parts.next().unwrap_or("").trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            self.cookies.push((name.to_string(), value.to_string()));
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.push((name.into(), value.into()));
    }

    /// Value of the first cookie called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(|(k, _)| k.as_str())
    }
}
