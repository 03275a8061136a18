use std::io;
use std::string::FromUtf8Error;

/// Failures of the body-reading operations on a
/// [`RequestView`](super::RequestView).
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// A body-reading operation already ran for this request.
    #[error("request body already consumed")]
    AlreadyConsumed,
    /// The transport failed while the body stream was being read.
    #[error("failed to read request body: {0}")]
    Io(#[from] io::Error),
    /// The body is not valid UTF-8 text.
    #[error("request body is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    /// The body is not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The body is valid JSON but its root is not an object.
    #[error("request body must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl BodyError {
    pub(crate) fn not_an_object(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        BodyError::NotAnObject { found }
    }
}
