use super::transport::{normalize_path, TransportParts};
use super::{BodyError, CookieJar, TransportRequest};
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use crate::router::{MatchResult, ParamVec};
use http::HeaderMap;
use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

/// Request-scoped accessor surface handed to operation handlers.
///
/// Built by the dispatcher from the [`TransportRequest`] and the selected
/// route's [`MatchResult`]. Every parameter accessor returns a `Vec<String>`
/// that is empty when the key is unset, so "no value" and "empty list" are the
/// same thing for callers.
///
/// The body is a single-use stream: the first `read_*` call consumes it and any
/// later one fails with [`BodyError::AlreadyConsumed`].
pub struct RequestView {
    request_id: RequestId,
    method: String,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    cookies: CookieJar,
    raw_params: ParamVec,
    decoded_params: OnceCell<Vec<(Arc<str>, String)>>,
    query_pairs: OnceCell<Vec<(String, String)>>,
    body: Option<Box<dyn Read + Send>>,
}

impl fmt::Debug for RequestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestView")
            .field("request_id", &self.request_id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("path_params", &self.raw_params)
            .field("body_consumed", &self.body.is_none())
            .finish_non_exhaustive()
    }
}

impl RequestView {
    /// Bind a transport request to the match result of its selected route.
    #[must_use]
    pub fn new(request: TransportRequest, matched: MatchResult) -> Self {
        let TransportParts {
            method,
            target,
            headers,
            cookies,
            body,
        } = request.into_parts();

        let (path, query) = match target.split_once('?') {
            Some((p, q)) => (normalize_path(p), Some(q.to_string())),
            None => (normalize_path(&target), None),
        };

        let request_id = RequestId::from_header_or_new(
            headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
        );

        Self {
            request_id,
            method,
            path,
            query,
            headers,
            cookies,
            raw_params: matched.into_params(),
            decoded_params: OnceCell::new(),
            query_pairs: OnceCell::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Normalized request path (single leading slash, no query).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Every decoded path capture as `(name, value)`, in template order.
    #[must_use]
    pub fn path_parameters(&self) -> &[(Arc<str>, String)] {
        self.decoded_params.get_or_init(|| {
            self.raw_params
                .iter()
                .map(|(name, raw)| {
                    let bytes = urlencoding::decode_binary(raw.as_bytes());
                    (Arc::clone(name), String::from_utf8_lossy(&bytes).into_owned())
                })
                .collect()
        })
    }

    /// Every decoded query pair, in the order they appeared.
    #[must_use]
    pub fn query_parameters(&self) -> &[(String, String)] {
        self.query_pairs.get_or_init(|| match &self.query {
            Some(q) => url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            None => Vec::new(),
        })
    }

    /// Percent-decoded values captured for `{name}`, in template order.
    ///
    /// Decoding happens once per request, on first access. `+` is kept as-is.
    #[must_use]
    pub fn path_parameter(&self, name: &str) -> Vec<String> {
        self.path_parameters()
            .iter()
            .filter(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// All query values bound to `name`, in the order they appeared.
    #[must_use]
    pub fn query_parameter(&self, name: &str) -> Vec<String> {
        self.query_parameters()
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// First occurrence of header `name` (case-insensitive).
    ///
    /// Repeated headers are not aggregated.
    #[must_use]
    pub fn header_parameter(&self, name: &str) -> Vec<String> {
        self.headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .into_iter()
            .collect()
    }

    /// Value of cookie `name` from the request's cookie jar.
    #[must_use]
    pub fn cookie_parameter(&self, name: &str) -> Vec<String> {
        self.cookies
            .get(name)
            .map(str::to_string)
            .into_iter()
            .collect()
    }

    fn take_body(&mut self) -> Result<Vec<u8>, BodyError> {
        let mut reader = self.body.take().ok_or(BodyError::AlreadyConsumed)?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read the whole body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`BodyError::AlreadyConsumed`] on a second read, [`BodyError::Io`] or
    /// [`BodyError::Utf8`] otherwise.
    pub fn read_body_string(&mut self) -> Result<String, BodyError> {
        let bytes = self.take_body()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Read the body and parse it as a JSON object.
    ///
    /// # Errors
    ///
    /// [`BodyError::Json`] when the text is not JSON and
    /// [`BodyError::NotAnObject`] when the root value is not an object, plus
    /// the errors of [`read_body_string`](Self::read_body_string).
    pub fn read_json_body(&mut self) -> Result<Map<String, Value>, BodyError> {
        let text = self.read_body_string()?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            other => Err(BodyError::not_an_object(&other)),
        }
    }

    /// Read an `application/x-www-form-urlencoded` body.
    ///
    /// Every key maps to exactly one value; when a key repeats, the first
    /// occurrence wins. Use
    /// [`read_url_encoded_body_multi`](Self::read_url_encoded_body_multi) to
    /// keep every value.
    ///
    /// # Errors
    ///
    /// See [`read_body_string`](Self::read_body_string).
    pub fn read_url_encoded_body(&mut self) -> Result<HashMap<String, Vec<String>>, BodyError> {
        let text = self.read_body_string()?;
        let mut form: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in url::form_urlencoded::parse(text.as_bytes()) {
            form.entry(k.into_owned())
                .or_insert_with(|| vec![v.into_owned()]);
        }
        Ok(form)
    }

    /// Read an `application/x-www-form-urlencoded` body keeping every value of
    /// repeated keys, in order.
    ///
    /// # Errors
    ///
    /// See [`read_body_string`](Self::read_body_string).
    pub fn read_url_encoded_body_multi(
        &mut self,
    ) -> Result<HashMap<String, Vec<String>>, BodyError> {
        let text = self.read_body_string()?;
        let mut form: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in url::form_urlencoded::parse(text.as_bytes()) {
            form.entry(k.into_owned()).or_default().push(v.into_owned());
        }
        Ok(form)
    }
}
