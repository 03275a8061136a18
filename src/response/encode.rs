#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_clone)]

use super::{MediaType, OperationResponse, ResponseBody};
use http::header::CONTENT_TYPE;
use http::HeaderMap;

/// Outbound transport boundary: status, flattened headers and the encoded
/// body, ready to be written by the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl TransportResponse {
    /// Status-only response.
    #[must_use]
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Plain-text response under `text/plain; charset=utf-8`.
    #[must_use]
    pub fn plain_text(status: u16, message: &str) -> Self {
        let content_type = MediaType::text_plain();
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(CONTENT_TYPE, content_type.header_value().clone());
        Self {
            status,
            headers,
            body: Some(content_type.encode_text(message)),
        }
    }

    /// The answer for a request no route selected.
    #[must_use]
    pub fn not_found() -> Self {
        Self::plain_text(404, "Not Found.")
    }

    /// First value of header `name` as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().unwrap_or_default()
    }
}

impl From<OperationResponse> for TransportResponse {
    fn from(response: OperationResponse) -> Self {
        encode(response)
    }
}

/// Turn a handler's typed response into bytes and flat headers.
///
/// - JSON values are written compactly.
/// - Text is encoded under the declared charset (see
///   [`MediaType::encode_text`]).
/// - Binary bytes pass through.
/// - `Empty` produces the status alone; declared headers are discarded.
///
/// For body-bearing kinds the handler's headers are flattened to their first
/// value and `Content-Type` is then set from the body's media type, replacing
/// any value the handler declared.
#[must_use]
pub fn encode(response: OperationResponse) -> TransportResponse {
    let (status, headers, body) = response.into_parts();

    let (content_type, bytes) = match body {
        ResponseBody::Json {
            content_type,
            value,
        } => {
            // Serializing a `Value` cannot fail: keys are already strings.
            let bytes = serde_json::to_vec(&value).unwrap_or_default();
            (content_type, bytes)
        }
        ResponseBody::Text {
            content_type,
            value,
        } => {
            let bytes = content_type.encode_text(&value);
            (content_type, bytes)
        }
        ResponseBody::Binary {
            content_type,
            bytes,
        } => (content_type, bytes),
        ResponseBody::Empty => return TransportResponse::status_only(status),
    };

    let mut flat = flatten_first(headers);
    flat.insert(CONTENT_TYPE, content_type.header_value().clone());

    TransportResponse {
        status,
        headers: flat,
        body: Some(bytes),
    }
}

/// Keep only the first value of every header name.
fn flatten_first(headers: HeaderMap) -> HeaderMap {
    let mut flat = HeaderMap::with_capacity(headers.keys_len() + 1);
    // Owned iteration yields `Some(name)` for the first value of each name and
    // `None` for the values that follow it.
    for (name, value) in headers {
        if let Some(name) = name {
            flat.insert(name, value);
        }
    }
    flat
}
