use super::types::{OperationSpec, SpecError};
use crate::handler::OperationHandler;
use crate::route::{OperationMethod, RouteConfig, RouteTable, RouteTableBuilder};
use crate::router::RouteError;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

/// Read an OpenAPI document (`.yaml`/`.yml` as YAML, anything else as JSON)
/// and list its operations in document order.
///
/// # Errors
///
/// See [`SpecError`].
pub fn load_operations(path: impl AsRef<Path>) -> Result<Vec<OperationSpec>, SpecError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        parse_yaml(&content)
    } else {
        parse_json(&content)
    }
}

/// # Errors
///
/// See [`SpecError`].
pub fn parse_yaml(content: &str) -> Result<Vec<OperationSpec>, SpecError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(content)?;
    operations_from_value(&yaml_to_json(doc))
}

/// # Errors
///
/// See [`SpecError`].
pub fn parse_json(content: &str) -> Result<Vec<OperationSpec>, SpecError> {
    let doc: Value = serde_json::from_str(content)?;
    operations_from_value(&doc)
}

/// List the operations of an already parsed document.
///
/// Path-item keys that are not HTTP verbs (`parameters`, `summary`,
/// `x-*`, `trace`, ...) are skipped.
///
/// # Errors
///
/// [`SpecError::MissingPaths`] when `paths` is absent or not an object.
pub fn operations_from_value(doc: &Value) -> Result<Vec<OperationSpec>, SpecError> {
    let paths = doc
        .get("paths")
        .and_then(Value::as_object)
        .ok_or(SpecError::MissingPaths)?;
    let base_path = base_path(doc);

    let mut operations = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        for (key, operation) in item {
            let Some(method) = OperationMethod::from_openapi_key(key) else {
                continue;
            };
            let Some(operation) = operation.as_object() else {
                continue;
            };
            let operation_id = operation
                .get("operationId")
                .and_then(Value::as_str)
                .map_or_else(|| operation_slug(method, path), str::to_string);
            let handler_name = handler_extension(operation).unwrap_or_else(|| operation_id.clone());

            operations.push(OperationSpec {
                method,
                path: format!("{base_path}{path}"),
                operation_id,
                handler_name,
            });
        }
    }
    Ok(operations)
}

fn handler_extension(operation: &Map<String, Value>) -> Option<String> {
    operation.iter().find_map(|(key, val)| {
        if key.starts_with("x-handler") {
            val.as_str().map(str::to_string)
        } else {
            None
        }
    })
}

/// Path of the first `servers` entry without its trailing slash, or empty.
fn base_path(doc: &Value) -> String {
    let Some(url_str) = doc
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|s| s.first())
        .and_then(|s| s.get("url"))
        .and_then(Value::as_str)
    else {
        return String::new();
    };
    url::Url::parse(url_str)
        .or_else(|_| url::Url::parse(&format!("http://dummy{url_str}")))
        .map(|u| u.path().trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// `GET /widgets/{id}` becomes `get_widgets_id`; `GET /` becomes `get_root`.
#[must_use]
pub fn operation_slug(method: OperationMethod, path: &str) -> String {
    let mut slug = method.as_str().to_ascii_lowercase();
    let mut any = false;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let cleaned: String = segment
            .chars()
            .filter(|c| *c != '{' && *c != '}')
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        slug.push('_');
        slug.push_str(&cleaned);
        any = true;
    }
    if !any {
        slug.push_str("_root");
    }
    slug
}

/// Build a route table from loaded operations, in document order.
///
/// `resolve` picks the handler for each operation; operations it returns
/// `None` for are left unregistered.
///
/// # Errors
///
/// Returns a [`RouteError`] for the first path that does not compile.
pub fn bind_operations<F>(
    mut builder: RouteTableBuilder,
    operations: &[OperationSpec],
    mut resolve: F,
) -> Result<RouteTable, RouteError>
where
    F: FnMut(&OperationSpec) -> Option<Arc<dyn OperationHandler>>,
{
    for op in operations {
        if let Some(handler) = resolve(op) {
            builder.push(RouteConfig::new(
                op.method,
                &op.path,
                &op.operation_id,
                handler,
            )?);
        }
    }
    Ok(builder.build())
}

/// Map keys become strings so the document fits `serde_json::Value`; YAML
/// allows `200:` as an integer key under `responses`.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter()
                .filter_map(|(k, v)| yaml_key(k).map(|k| (k, yaml_to_json(v))))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value as Yaml;
    match key {
        Yaml::String(s) => Some(s),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
