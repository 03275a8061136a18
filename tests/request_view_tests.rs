//! Tests for the handler-facing request accessors
//!
//! Each test builds a `RequestView` from a `TransportRequest` and the match
//! result of a compiled pattern, the same way the dispatcher does.

use brrtcore::request::{BodyError, CookieJar, RequestView, TransportRequest};
use brrtcore::router::UriPattern;
use std::io::{self, Read};

fn view(template: &str, request: TransportRequest) -> RequestView {
    let pattern = UriPattern::compile(template).unwrap();
    let path = brrtcore::request::normalize_path(request.path());
    let matched = pattern.match_path(&path).unwrap();
    assert!(matched.is_full(), "{path} should fully match {template}");
    RequestView::new(request, matched)
}

#[test]
fn test_path_parameter_is_percent_decoded() {
    let req = view(
        "/files/{name}",
        TransportRequest::new("GET", "/files/a%20b%2Fc+d"),
    );
    assert_eq!(req.path_parameter("name"), vec!["a b/c+d".to_string()]);
    assert!(req.path_parameter("missing").is_empty());
}

#[test]
fn test_path_parameter_invalid_utf8_is_lossy() {
    let req = view("/files/{name}", TransportRequest::new("GET", "/files/%FF"));
    assert_eq!(req.path_parameter("name"), vec!["\u{FFFD}".to_string()]);
}

#[test]
fn test_duplicate_path_parameter_names_return_all_values() {
    let req = view(
        "/pairs/{id}/{id}",
        TransportRequest::new("GET", "/pairs/1/2"),
    );
    assert_eq!(req.path_parameter("id"), vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn test_query_parameter_keeps_every_value_in_order() {
    let req = view(
        "/search",
        TransportRequest::new("GET", "/search?tag=a&q=hello+world&tag=b&tag=a%26c"),
    );
    assert_eq!(
        req.query_parameter("tag"),
        vec!["a".to_string(), "b".to_string(), "a&c".to_string()]
    );
    assert_eq!(req.query_parameter("q"), vec!["hello world".to_string()]);
    assert!(req.query_parameter("none").is_empty());
    assert_eq!(req.query_string(), Some("tag=a&q=hello+world&tag=b&tag=a%26c"));
}

#[test]
fn test_header_parameter_first_occurrence_case_insensitive() {
    let request = TransportRequest::new("GET", "/h")
        .header("X-Trace", "one")
        .unwrap()
        .header("x-trace", "two")
        .unwrap();
    let req = view("/h", request);
    assert_eq!(req.header_parameter("x-TRACE"), vec!["one".to_string()]);
    assert!(req.header_parameter("x-missing").is_empty());
}

#[test]
fn test_cookie_parameter_reads_the_jar() {
    let mut jar = CookieJar::new();
    jar.insert("session", "abc");
    let req = view("/c", TransportRequest::new("GET", "/c").with_cookies(jar));
    assert_eq!(req.cookie_parameter("session"), vec!["abc".to_string()]);
    assert!(req.cookie_parameter("other").is_empty());
}

#[test]
fn test_request_id_reused_from_header() {
    let id = brrtcore::ids::RequestId::new();
    let request = TransportRequest::new("GET", "/r")
        .header("X-Request-Id", &id.to_string())
        .unwrap();
    let req = view("/r", request);
    assert_eq!(req.request_id(), id);
}

#[test]
fn test_read_json_body() {
    let mut req = view(
        "/j",
        TransportRequest::new("POST", "/j").with_body_bytes(r#"{"name":"Rex","age":3}"#),
    );
    let body = req.read_json_body().unwrap();
    assert_eq!(body["name"], "Rex");
    assert_eq!(body["age"], 3);
}

#[test]
fn test_read_json_body_rejects_non_objects_and_garbage() {
    let mut req = view(
        "/j",
        TransportRequest::new("POST", "/j").with_body_bytes("[1,2]"),
    );
    assert!(matches!(
        req.read_json_body(),
        Err(BodyError::NotAnObject { found: "array" })
    ));

    let mut req = view(
        "/j",
        TransportRequest::new("POST", "/j").with_body_bytes("{not json"),
    );
    assert!(matches!(req.read_json_body(), Err(BodyError::Json(_))));
}

#[test]
fn test_body_is_single_use() {
    let mut req = view(
        "/b",
        TransportRequest::new("POST", "/b").with_body_bytes("hello"),
    );
    assert_eq!(req.read_body_string().unwrap(), "hello");
    assert!(matches!(
        req.read_body_string(),
        Err(BodyError::AlreadyConsumed)
    ));
    assert!(matches!(req.read_json_body(), Err(BodyError::AlreadyConsumed)));
    assert!(matches!(
        req.read_url_encoded_body(),
        Err(BodyError::AlreadyConsumed)
    ));
}

#[test]
fn test_body_must_be_utf8() {
    let mut req = view(
        "/b",
        TransportRequest::new("POST", "/b").with_body_bytes(vec![0xC3, 0x28]),
    );
    assert!(matches!(req.read_body_string(), Err(BodyError::Utf8(_))));
}

#[test]
fn test_body_io_error_surfaces() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }
    let mut req = view("/b", TransportRequest::new("POST", "/b").with_body(Broken));
    assert!(matches!(req.read_body_string(), Err(BodyError::Io(_))));
}

#[test]
fn test_url_encoded_body_first_value_wins() {
    let mut req = view(
        "/form",
        TransportRequest::new("POST", "/form").with_body_bytes("a=1&b=two+words&a=2"),
    );
    let form = req.read_url_encoded_body().unwrap();
    assert_eq!(form["a"], vec!["1".to_string()]);
    assert_eq!(form["b"], vec!["two words".to_string()]);
}

#[test]
fn test_url_encoded_body_multi_keeps_all_values() {
    let mut req = view(
        "/form",
        TransportRequest::new("POST", "/form").with_body_bytes("a=1&b=x&a=2"),
    );
    let form = req.read_url_encoded_body_multi().unwrap();
    assert_eq!(form["a"], vec!["1".to_string(), "2".to_string()]);
    assert_eq!(form["b"], vec!["x".to_string()]);
}

#[test]
fn test_view_exposes_normalized_path() {
    let req = view("/x/{id}", TransportRequest::new("GET", "//x/1?q=1"));
    assert_eq!(req.path(), "/x/1");
    assert_eq!(req.method(), "GET");
}
