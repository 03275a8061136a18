use super::MediaType;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use serde::Serialize;
use serde_json::Value;

/// Body of an [`OperationResponse`], tagged by kind.
///
/// Every body-bearing variant carries its own content type, so a response
/// without a body has no content type to get wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json {
        content_type: MediaType,
        value: Value,
    },
    Text {
        content_type: MediaType,
        value: String,
    },
    Binary {
        content_type: MediaType,
        bytes: Vec<u8>,
    },
    Empty,
}

impl ResponseBody {
    #[must_use]
    pub fn content_type(&self) -> Option<&MediaType> {
        match self {
            ResponseBody::Json { content_type, .. }
            | ResponseBody::Text { content_type, .. }
            | ResponseBody::Binary { content_type, .. } => Some(content_type),
            ResponseBody::Empty => None,
        }
    }
}

/// Typed result of an operation handler.
///
/// Headers are a multimap; the encoder keeps the first value per name.
#[derive(Debug, Clone)]
pub struct OperationResponse {
    status: u16,
    headers: HeaderMap,
    body: ResponseBody,
}

impl OperationResponse {
    fn with_body(status: u16, body: ResponseBody) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// JSON body under `application/json`.
    #[must_use]
    pub fn json(status: u16, value: Value) -> Self {
        Self::with_body(
            status,
            ResponseBody::Json {
                content_type: MediaType::json(),
                value,
            },
        )
    }

    /// JSON body under a caller-chosen JSON media type such as
    /// `application/problem+json`.
    #[must_use]
    pub fn json_as(status: u16, content_type: MediaType, value: Value) -> Self {
        debug_assert!(
            content_type.is_json(),
            "JSON body declared with non-JSON content type {content_type}"
        );
        Self::with_body(
            status,
            ResponseBody::Json {
                content_type,
                value,
            },
        )
    }

    /// Serialize a typed response model into a JSON body.
    ///
    /// # Errors
    ///
    /// Fails when `T`'s `Serialize` impl fails (e.g. non-string map keys).
    pub fn to_json<T: Serialize>(status: u16, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::json(status, serde_json::to_value(body)?))
    }

    /// Text body under `text/plain; charset=utf-8`.
    #[must_use]
    pub fn text(status: u16, value: impl Into<String>) -> Self {
        Self::with_body(
            status,
            ResponseBody::Text {
                content_type: MediaType::text_plain(),
                value: value.into(),
            },
        )
    }

    /// Text body under a string-compatible media type. The declared charset
    /// decides how the encoder turns `value` into bytes.
    #[must_use]
    pub fn text_as(status: u16, content_type: MediaType, value: impl Into<String>) -> Self {
        debug_assert!(
            content_type.is_string_compatible(),
            "text body declared with non-text content type {content_type}"
        );
        Self::with_body(
            status,
            ResponseBody::Text {
                content_type,
                value: value.into(),
            },
        )
    }

    #[must_use]
    pub fn binary(status: u16, content_type: MediaType, bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_body(
            status,
            ResponseBody::Binary {
                content_type,
                bytes: bytes.into(),
            },
        )
    }

    /// Status only. Declared headers are dropped by the encoder.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::with_body(status, ResponseBody::Empty)
    }

    /// Append a header value, keeping earlier values for the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// String form of [`with_header`](Self::with_header).
    ///
    /// # Errors
    ///
    /// Fails when `name` or `value` is not a valid header token.
    pub fn header(self, name: &str, value: &str) -> Result<Self, http::Error> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        Ok(self.with_header(name, value))
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    #[must_use]
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&MediaType> {
        self.body.content_type()
    }

    #[must_use]
    pub fn into_parts(self) -> (u16, HeaderMap, ResponseBody) {
        (self.status, self.headers, self.body)
    }
}
