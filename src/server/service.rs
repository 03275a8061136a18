use crate::dispatcher::Dispatcher;
use crate::request::TransportRequest;
use crate::response::TransportResponse;
use dashmap::DashMap;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use may_minihttp::{HttpService, Request, Response};
use once_cell::sync::Lazy;
use std::io::{self, Read};
use std::panic::{self, AssertUnwindSafe};

/// Most header lines a `may_minihttp::Response` can hold, `Content-Type`
/// included.
pub const MAX_RESPONSE_HEADERS: usize = 16;

/// Upper bound on cached header lines other than `Content-Type`.
pub const MAX_INTERNED_HEADER_LINES: usize = 4096;

/// `may_minihttp` only accepts `&'static str` header lines. Each distinct line
/// is leaked once and reused while the cache has room; past the cap lines are
/// leaked per response without being cached.
static HEADER_LINES: Lazy<DashMap<String, &'static str>> = Lazy::new(DashMap::new);

/// `Content-Type` lines, uncapped: one entry per media type served.
static CONTENT_TYPE_LINES: Lazy<DashMap<String, &'static str>> = Lazy::new(DashMap::new);

fn leak_line(line: String) -> &'static str {
    Box::leak(line.into_boxed_str())
}

fn cached_line(cache: &DashMap<String, &'static str>, line: String) -> &'static str {
    if let Some(existing) = cache.get(&line) {
        return *existing;
    }
    let leaked = leak_line(line.clone());
    *cache.entry(line).or_insert(leaked)
}

fn intern_header_line(line: String) -> &'static str {
    if HEADER_LINES.len() >= MAX_INTERNED_HEADER_LINES && !HEADER_LINES.contains_key(&line) {
        return leak_line(line);
    }
    cached_line(&HEADER_LINES, line)
}

fn content_type_line(value: &HeaderValue) -> &'static str {
    let line = format!("content-type: {}", String::from_utf8_lossy(value.as_bytes()));
    cached_line(&CONTENT_TYPE_LINES, line)
}

/// Header lines in write order, `Content-Type` first. `Err` carries the
/// header count when it exceeds [`MAX_RESPONSE_HEADERS`].
fn header_lines(headers: &HeaderMap) -> Result<Vec<&'static str>, usize> {
    if headers.len() > MAX_RESPONSE_HEADERS {
        return Err(headers.len());
    }
    let mut lines = Vec::with_capacity(headers.len());
    if let Some(value) = headers.get(CONTENT_TYPE) {
        lines.push(content_type_line(value));
    }
    for (name, value) in headers {
        if *name == CONTENT_TYPE {
            continue;
        }
        lines.push(intern_header_line(format!(
            "{}: {}",
            name.as_str(),
            String::from_utf8_lossy(value.as_bytes())
        )));
    }
    Ok(lines)
}

fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// `may_minihttp` service that feeds every request through a [`Dispatcher`].
///
/// The request body is read into memory before dispatch and the `Cookie`
/// header is parsed into the request's jar. Dispatch errors and handler
/// panics are answered with `500 Internal Server Error`.
#[derive(Clone, Debug)]
pub struct DispatchService {
    dispatcher: Dispatcher,
}

impl DispatchService {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn transport_request(req: Request) -> io::Result<TransportRequest> {
        let method = req.method().to_string();
        let target = req.path().to_string();

        let mut headers = HeaderMap::with_capacity(req.headers().len());
        for header in req.headers() {
            // httparse already rejected malformed lines; skip what `http` refuses.
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(header.name.as_bytes()),
                HeaderValue::from_bytes(header.value),
            ) {
                headers.append(name, value);
            }
        }

        let mut body = Vec::new();
        req.body().read_to_end(&mut body)?;

        Ok(TransportRequest::new(method, target)
            .with_headers(headers)
            .with_cookies_from_headers()
            .with_body_bytes(body))
    }

    fn write_response(&self, out: TransportResponse, res: &mut Response) {
        let lines = match header_lines(&out.headers) {
            Ok(lines) => lines,
            Err(count) => {
                self.dispatcher.diagnostics().error(format_args!(
                    "Too many response headers, answering 500 headers={} limit={}",
                    count, MAX_RESPONSE_HEADERS
                ));
                Self::internal_error(res);
                return;
            }
        };

        res.status_code(usize::from(out.status), status_reason(out.status));
        for line in lines {
            res.header(line);
        }
        if let Some(body) = out.body {
            res.body_vec(body);
        }
    }

    fn internal_error(res: &mut Response) {
        res.status_code(500, "Internal Server Error");
    }
}

impl HttpService for DispatchService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let request = Self::transport_request(req)?;

        let dispatcher = &self.dispatcher;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| dispatcher.dispatch(request)));

        match outcome {
            Ok(Ok(out)) => self.write_response(out, res),
            Ok(Err(err)) => {
                self.dispatcher.diagnostics().error(format_args!(
                    "Dispatch failed, answering 500 operation_id={} error={}",
                    err.operation_id, err.source
                ));
                Self::internal_error(res);
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                self.dispatcher.diagnostics().error(format_args!(
                    "Handler panicked, answering 500 panic={}",
                    message
                ));
                Self::internal_error(res);
            }
        }
        Ok(())
    }
}
