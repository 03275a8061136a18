use crate::handler::{HandlerResult, OperationHandler};
use crate::request::RequestView;
use crate::response::OperationResponse;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Placeholder handler: answers 200 with a JSON description of the request.
///
/// Used by `brrtcore serve` to bring up every operation of a document before
/// real handlers exist.
#[derive(Debug, Clone)]
pub struct EchoHandler {
    operation_id: Arc<str>,
}

impl EchoHandler {
    pub fn new(operation_id: impl Into<Arc<str>>) -> Self {
        Self {
            operation_id: operation_id.into(),
        }
    }
}

impl OperationHandler for EchoHandler {
    fn handle(&self, mut request: RequestView) -> HandlerResult {
        let params: Map<String, Value> = request
            .path_parameters()
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect();
        let query: Vec<Value> = request
            .query_parameters()
            .iter()
            .map(|(k, v)| json!([k, v]))
            .collect();

        let text = request.read_body_string()?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(OperationResponse::json(
            200,
            json!({
                "operation_id": &*self.operation_id,
                "request_id": request.request_id(),
                "method": request.method(),
                "path": request.path(),
                "params": params,
                "query": query,
                "body": body,
            }),
        ))
    }
}
