use super::CookieJar;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use std::io::{self, Cursor, Read};

/// Inbound transport boundary: everything the dispatch core needs from the
/// HTTP server for one request.
///
/// The method is kept as the raw string the client sent so unknown verbs can
/// fail closed inside the dispatcher instead of at the transport.
pub struct TransportRequest {
    method: String,
    target: String,
    headers: HeaderMap,
    cookies: CookieJar,
    body: Box<dyn Read + Send>,
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .finish_non_exhaustive()
    }
}

impl TransportRequest {
    /// A request with no headers, no cookies and an empty body.
    ///
    /// `target` is the request target as sent on the wire: a path plus an
    /// optional `?query`.
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            headers: HeaderMap::new(),
            cookies: CookieJar::new(),
            body: Box::new(io::empty()),
        }
    }

    /// Append a header, keeping earlier values for the same name.
    ///
    /// # Errors
    ///
    /// Fails when `name` or `value` is not a valid HTTP header token.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, http::Error> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.append(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Attach the cookie jar produced by the upstream cookie parser.
    #[must_use]
    pub fn with_cookies(mut self, cookies: CookieJar) -> Self {
        self.cookies = cookies;
        self
    }

    /// Fill the cookie jar from the request's own `Cookie` headers.
    #[must_use]
    pub fn with_cookies_from_headers(mut self) -> Self {
        self.cookies = CookieJar::from_headers(&self.headers);
        self
    }

    #[must_use]
    pub fn with_body<R>(mut self, body: R) -> Self
    where
        R: Read + Send + 'static,
    {
        self.body = Box::new(body);
        self
    }

    #[must_use]
    pub fn with_body_bytes(self, body: impl Into<Vec<u8>>) -> Self {
        self.with_body(Cursor::new(body.into()))
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Path part of the target, before any `?`.
    #[must_use]
    pub fn path(&self) -> &str {
        self.target
            .split_once('?')
            .map_or(self.target.as_str(), |(p, _)| p)
    }

    /// Raw query string after `?`, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub(crate) fn into_parts(self) -> TransportParts {
        TransportParts {
            method: self.method,
            target: self.target,
            headers: self.headers,
            cookies: self.cookies,
            body: self.body,
        }
    }
}

pub(crate) struct TransportParts {
    pub method: String,
    pub target: String,
    pub headers: HeaderMap,
    pub cookies: CookieJar,
    pub body: Box<dyn Read + Send>,
}

/// Ensure the path starts with exactly one `/`.
///
/// Some transports strip the leading slash and some clients double it, so all
/// leading slashes are dropped and a single one is put back.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push('/');
    out.push_str(trimmed);
    out
}
