//! Dispatcher core module - hot path for request dispatch.
//!
//! Selection walks the route table in registration order and allocates only
//! the normalized path and the match captures. Error paths format freely.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::handler::HandlerError;
use crate::request::{normalize_path, RequestView, TransportRequest};
use crate::response::{encode, TransportResponse};
use crate::route::{OperationMethod, RouteConfig, RouteTable};
use crate::router::MatchResult;
use std::fmt;
use std::sync::Arc;

/// An unclassified handler failure handed back to the transport.
///
/// Declared failures ([`crate::handler::ResponseError`]) never surface here;
/// the dispatcher answers those itself.
#[derive(Debug, thiserror::Error)]
#[error("operation {operation_id} failed: {source}")]
pub struct DispatchError {
    pub operation_id: Arc<str>,
    #[source]
    pub source: HandlerError,
}

/// Selects the route for a request, runs its handler and encodes the result.
///
/// Cheap to clone: the table and the diagnostics sink are shared. Holds no
/// per-request state, so one instance can serve every connection.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Dispatcher logging through `tracing`.
    #[must_use]
    pub fn new(table: impl Into<Arc<RouteTable>>) -> Self {
        Self::with_diagnostics(table, Arc::new(TracingDiagnostics))
    }

    #[must_use]
    pub fn with_diagnostics(
        table: impl Into<Arc<RouteTable>>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            table: table.into(),
            diagnostics,
        }
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Arc<dyn Diagnostics> {
        &self.diagnostics
    }

    /// First route, in registration order, whose method equals `method` and
    /// whose pattern matches all of `path`.
    ///
    /// `path` must already be normalized and free of a query string. Pure:
    /// calling it twice with the same input selects the same route.
    #[must_use]
    pub fn select(
        &self,
        method: OperationMethod,
        path: &str,
    ) -> Option<(&RouteConfig, MatchResult)> {
        self.table
            .iter()
            .find_map(|route| route.full_match(method, path).map(|m| (route, m)))
    }

    /// Dispatch one request.
    ///
    /// Unknown methods and unmatched paths get the 404 answer. A handler's
    /// declared [`ResponseError`](crate::handler::ResponseError) becomes that
    /// status with the message as a text body.
    ///
    /// # Errors
    ///
    /// Any other handler failure is logged at warn and returned unchanged,
    /// tagged with the operation id.
    pub fn dispatch(&self, request: TransportRequest) -> Result<TransportResponse, DispatchError> {
        let Some(method) = OperationMethod::from_transport(request.method()) else {
            self.diagnostics.debug(format_args!(
                "No route: unknown method method={:?} target={}",
                request.method(),
                request.target()
            ));
            return Ok(self.not_found());
        };

        let path = normalize_path(request.path());
        let Some((route, matched)) = self.select(method, &path) else {
            self.diagnostics.debug(format_args!(
                "No route matched method={} path={}",
                method, path
            ));
            return Ok(self.not_found());
        };

        self.diagnostics.debug(format_args!(
            "Route matched method={} path={} pattern={} operation_id={}",
            method,
            path,
            route.pattern(),
            route.operation_id()
        ));

        let view = RequestView::new(request, matched);
        match route.handler().handle(view) {
            Ok(response) => Ok(encode(response)),
            Err(HandlerError::Response(err)) => {
                self.diagnostics.debug(format_args!(
                    "Handler declared error operation_id={} status={} message={}",
                    route.operation_id(),
                    err.status,
                    err.message
                ));
                Ok(TransportResponse::plain_text(err.status, &err.message))
            }
            Err(source) => {
                self.diagnostics.warn(format_args!(
                    "Handler failed operation_id={} method={} path={} error={}",
                    route.operation_id(),
                    method,
                    path,
                    source
                ));
                Err(DispatchError {
                    operation_id: Arc::from(route.operation_id()),
                    source,
                })
            }
        }
    }

    /// The 404 `Not Found.` response.
    #[must_use]
    pub fn not_found(&self) -> TransportResponse {
        TransportResponse::not_found()
    }
}
