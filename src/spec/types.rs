use crate::route::OperationMethod;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// One operation declared under `paths` in an OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSpec {
    pub method: OperationMethod,
    /// Path template, prefixed with the first server's base path.
    pub path: String,
    /// `operationId`, or `<method>_<segments>` when the document omits it.
    pub operation_id: String,
    /// Value of an `x-handler-*` extension, falling back to `operation_id`.
    pub handler_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document has no `paths` object")]
    MissingPaths,
}
