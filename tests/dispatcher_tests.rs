//! Integration tests for request dispatch
//!
//! Exercises the full in-process pipeline: `TransportRequest` → route
//! selection → `RequestView` → handler → encoder → `TransportResponse`,
//! without a socket.

use brrtcore::diagnostics::Severity;
use brrtcore::dispatcher::Dispatcher;
use brrtcore::handler::{HandlerResult, ResponseError};
use brrtcore::request::{RequestView, TransportRequest};
use brrtcore::response::OperationResponse;
use brrtcore::route::{OperationMethod, RouteTable};
use http::header::{HeaderName, HeaderValue};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const X_FOO: HeaderName = HeaderName::from_static("x-foo");

mod common;
use common::diagnostics::RecordingDiagnostics;

fn labelled(label: &'static str) -> impl Fn(RequestView) -> HandlerResult {
    move |req: RequestView| -> HandlerResult {
        Ok(OperationResponse::json(
            200,
            json!({ "route": label, "params": req.path_parameters().len() }),
        ))
    }
}

fn route_label(dispatcher: &Dispatcher, method: &str, target: &str) -> Option<String> {
    let res = dispatcher
        .dispatch(TransportRequest::new(method, target))
        .unwrap();
    if res.status == 404 {
        return None;
    }
    let body: Value = serde_json::from_slice(res.body_bytes()).unwrap();
    body["route"].as_str().map(str::to_string)
}

fn widget_table() -> RouteTable {
    RouteTable::builder()
        .route(OperationMethod::Get, "/widgets", "listWidgets", labelled("list"))
        .unwrap()
        .route(OperationMethod::Get, "/widgets/{id}", "getWidget", labelled("get"))
        .unwrap()
        .route(OperationMethod::Post, "/widgets", "createWidget", labelled("create"))
        .unwrap()
        .build()
}

#[test]
fn test_method_and_path_select_route() {
    let dispatcher = Dispatcher::new(widget_table());
    assert_eq!(route_label(&dispatcher, "GET", "/widgets").as_deref(), Some("list"));
    assert_eq!(route_label(&dispatcher, "GET", "/widgets/7").as_deref(), Some("get"));
    assert_eq!(route_label(&dispatcher, "POST", "/widgets").as_deref(), Some("create"));
}

#[test]
fn test_no_route_answers_404() {
    let dispatcher = Dispatcher::new(widget_table());
    let res = dispatcher
        .dispatch(TransportRequest::new("DELETE", "/widgets/7"))
        .unwrap();
    assert_eq!(res.status, 404);
    assert_eq!(res.body_bytes(), b"Not Found.");
    assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    assert_eq!(res.headers.len(), 1);
}

#[test]
fn test_prefix_match_is_not_selected() {
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/users", "listUsers", labelled("users"))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);

    assert_eq!(route_label(&dispatcher, "GET", "/users/7"), None);
    assert_eq!(route_label(&dispatcher, "GET", "/users/"), None);
    assert_eq!(route_label(&dispatcher, "GET", "/usersX"), None);
    assert_eq!(route_label(&dispatcher, "GET", "/users").as_deref(), Some("users"));
}

#[test]
fn test_shorter_path_does_not_match_longer_template() {
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/users/{id}", "getUser", labelled("user"))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);
    assert_eq!(route_label(&dispatcher, "GET", "/users"), None);
}

#[test]
fn test_first_registered_route_wins() {
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/widgets/{id}", "getWidget", labelled("param"))
        .unwrap()
        .route(OperationMethod::Get, "/widgets/special", "special", labelled("literal"))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);
    assert_eq!(
        route_label(&dispatcher, "GET", "/widgets/special").as_deref(),
        Some("param")
    );

    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/widgets/special", "special", labelled("literal"))
        .unwrap()
        .route(OperationMethod::Get, "/widgets/{id}", "getWidget", labelled("param"))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);
    assert_eq!(
        route_label(&dispatcher, "GET", "/widgets/special").as_deref(),
        Some("literal")
    );
    assert_eq!(
        route_label(&dispatcher, "GET", "/widgets/other").as_deref(),
        Some("param")
    );
}

#[test]
fn test_root_matches_only_root() {
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/", "root", labelled("root"))
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);
    assert_eq!(route_label(&dispatcher, "GET", "/").as_deref(), Some("root"));
    assert_eq!(route_label(&dispatcher, "GET", "").as_deref(), Some("root"));
    assert_eq!(route_label(&dispatcher, "GET", "/x"), None);
}

#[test]
fn test_unknown_and_lowercase_methods_fail_closed() {
    let dispatcher = Dispatcher::new(widget_table());
    assert_eq!(route_label(&dispatcher, "BREW", "/widgets"), None);
    assert_eq!(route_label(&dispatcher, "get", "/widgets"), None);
    assert_eq!(route_label(&dispatcher, "TRACE", "/widgets"), None);
}

#[test]
fn test_path_normalization_and_query_split() {
    let dispatcher = Dispatcher::new(widget_table());
    assert_eq!(route_label(&dispatcher, "GET", "widgets/7").as_deref(), Some("get"));
    assert_eq!(route_label(&dispatcher, "GET", "//widgets/7").as_deref(), Some("get"));
    assert_eq!(
        route_label(&dispatcher, "GET", "/widgets/7?expand=true").as_deref(),
        Some("get")
    );
}

#[test]
fn test_selection_is_idempotent() {
    let dispatcher = Dispatcher::new(widget_table());
    let first = dispatcher
        .select(OperationMethod::Get, "/widgets/42")
        .map(|(route, m)| (route.operation_id().to_string(), m.params().to_vec()));
    let second = dispatcher
        .select(OperationMethod::Get, "/widgets/42")
        .map(|(route, m)| (route.operation_id().to_string(), m.params().to_vec()));
    assert_eq!(first, second);
    assert_eq!(first.unwrap().0, "getWidget");
}

#[test]
fn test_declared_error_uses_status_and_message() {
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let table = RouteTable::builder()
        .route(
            OperationMethod::Post,
            "/widgets",
            "createWidget",
            |_req: RequestView| -> HandlerResult {
                Err(ResponseError::bad_request("bad input").into())
            },
        )
        .unwrap()
        .build();
    let dispatcher = Dispatcher::with_diagnostics(table, diagnostics.clone());

    let res = dispatcher
        .dispatch(TransportRequest::new("POST", "/widgets"))
        .unwrap();
    assert_eq!(res.status, 400);
    assert_eq!(res.body_bytes(), b"bad input");
    assert_eq!(diagnostics.count(Severity::Warn), 0);
}

#[test]
fn test_unclassified_error_is_logged_and_propagated() {
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/boom", "explode", |_req: RequestView| -> HandlerResult {
            Err(anyhow::anyhow!("database unreachable").into())
        })
        .unwrap()
        .build();
    let dispatcher = Dispatcher::with_diagnostics(table, diagnostics.clone());

    let err = dispatcher
        .dispatch(TransportRequest::new("GET", "/boom"))
        .unwrap_err();
    assert_eq!(&*err.operation_id, "explode");
    assert!(err.to_string().contains("database unreachable"));

    let warnings: Vec<String> = diagnostics
        .events()
        .into_iter()
        .filter(|(s, _)| *s == Severity::Warn)
        .map(|(_, m)| m)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("explode"));
}

#[test]
fn test_routing_miss_logs_at_debug() {
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let dispatcher = Dispatcher::with_diagnostics(widget_table(), diagnostics.clone());
    dispatcher
        .dispatch(TransportRequest::new("GET", "/nothing"))
        .unwrap();
    assert_eq!(diagnostics.count(Severity::Debug), 1);
    assert_eq!(diagnostics.count(Severity::Warn), 0);
}

#[test]
fn test_json_response_round_trip() {
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/a", "getA", |_req: RequestView| -> HandlerResult {
            Ok(OperationResponse::json(200, json!({"a": 1}))
                .with_header(X_FOO, HeaderValue::from_static("1"))
                .with_header(X_FOO, HeaderValue::from_static("2")))
        })
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);

    let res = dispatcher.dispatch(TransportRequest::new("GET", "/a")).unwrap();
    assert_eq!(res.status, 200);
    let body: Value = serde_json::from_slice(res.body_bytes()).unwrap();
    assert_eq!(body, json!({"a": 1}));
    assert_eq!(res.headers.get_all("content-type").iter().count(), 1);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.header("x-foo"), Some("1"));
}

#[test]
fn test_handler_runs_once_per_dispatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let table = RouteTable::builder()
        .route(OperationMethod::Get, "/count", "count", move |_req: RequestView| -> HandlerResult {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(OperationResponse::empty(204))
        })
        .unwrap()
        .build();
    let dispatcher = Dispatcher::new(table);

    for _ in 0..3 {
        let res = dispatcher
            .dispatch(TransportRequest::new("GET", "/count"))
            .unwrap();
        assert_eq!(res.status, 204);
        assert!(res.body.is_none());
    }
    dispatcher
        .dispatch(TransportRequest::new("GET", "/count/extra"))
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    let dispatcher = Dispatcher::new(widget_table());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            std::thread::spawn(move || {
                let target = format!("/widgets/{i}");
                let res = dispatcher
                    .dispatch(TransportRequest::new("GET", target))
                    .unwrap();
                res.status
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 200);
    }
}
