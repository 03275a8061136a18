use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// HTTP verbs an operation can be bound to.
///
/// Parsing is case-sensitive, as HTTP methods are. Anything outside this set
/// (including `TRACE`, `CONNECT` and extension methods) fails closed: no route
/// can ever be selected for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

/// Returned when a transport method string is not a supported operation verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl OperationMethod {
    /// Every supported verb, in declaration order.
    pub const ALL: [OperationMethod; 7] = [
        OperationMethod::Get,
        OperationMethod::Post,
        OperationMethod::Put,
        OperationMethod::Delete,
        OperationMethod::Patch,
        OperationMethod::Head,
        OperationMethod::Options,
    ];

    /// Upper-case wire token (`"GET"`, `"POST"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OperationMethod::Get => "GET",
            OperationMethod::Post => "POST",
            OperationMethod::Put => "PUT",
            OperationMethod::Delete => "DELETE",
            OperationMethod::Patch => "PATCH",
            OperationMethod::Head => "HEAD",
            OperationMethod::Options => "OPTIONS",
        }
    }

    /// Parse a raw transport method, returning `None` for anything unsupported.
    #[must_use]
    pub fn from_transport(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    /// Map an OpenAPI path-item key (`get`, `post`, ...) to a verb.
    #[must_use]
    pub fn from_openapi_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(key))
    }
}

impl FromStr for OperationMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for OperationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OperationMethod> for http::Method {
    fn from(method: OperationMethod) -> Self {
        match method {
            OperationMethod::Get => http::Method::GET,
            OperationMethod::Post => http::Method::POST,
            OperationMethod::Put => http::Method::PUT,
            OperationMethod::Delete => http::Method::DELETE,
            OperationMethod::Patch => http::Method::PATCH,
            OperationMethod::Head => http::Method::HEAD,
            OperationMethod::Options => http::Method::OPTIONS,
        }
    }
}

impl TryFrom<&http::Method> for OperationMethod {
    type Error = UnknownMethod;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}
