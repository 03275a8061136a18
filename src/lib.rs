//! # BRRTCore
//!
//! **BRRTCore** is the request-dispatch core of a generated OpenAPI server: it
//! selects the operation for an incoming request, adapts the request into an
//! operation-agnostic [`RequestView`](request::RequestView), runs the
//! operation's handler and encodes the typed
//! [`OperationResponse`](response::OperationResponse) it returns.
//!
//! ## Architecture
//!
//! - **[`router`]** - `{param}` path templates compiled to anchored regexes
//! - **[`route`]** - HTTP verbs and the immutable, ordered route table
//! - **[`request`]** - the transport request boundary and the handler-facing
//!   [`RequestView`](request::RequestView)
//! - **[`handler`]** - the handler trait and its error model
//! - **[`response`]** - typed responses, media types and the encoder
//! - **[`dispatcher`]** - selection, invocation and error mapping
//! - **[`server`]** - `may_minihttp` adapter and server lifecycle
//! - **[`spec`]** - operation listing from OpenAPI documents
//! - **[`diagnostics`]** / **[`logging`]** - the injected log sink and the
//!   `tracing` subscriber setup
//! - **[`runtime_config`]** / **[`cli`]** - environment configuration and the
//!   `brrtcore` binary
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as DispatchService<br/>(may_minihttp)
//!     participant Dispatcher
//!     participant Table as RouteTable
//!     participant Handler
//!
//!     Client->>Server: GET /widgets/7?x=1
//!     Server->>Dispatcher: TransportRequest
//!     Dispatcher->>Table: first route with method GET<br/>matching all of /widgets/7
//!     alt No route
//!         Dispatcher-->>Client: 404 Not Found.
//!     else Selected
//!         Dispatcher->>Handler: RequestView
//!         alt Ok(OperationResponse)
//!             Handler-->>Dispatcher: encode()
//!             Dispatcher-->>Client: status + headers + body
//!         else Err(ResponseError)
//!             Dispatcher-->>Client: status + message
//!         else Err(other) or panic
//!             Server-->>Client: 500
//!         end
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtcore::dispatcher::Dispatcher;
//! use brrtcore::handler::HandlerResult;
//! use brrtcore::request::{RequestView, TransportRequest};
//! use brrtcore::response::OperationResponse;
//! use brrtcore::route::{OperationMethod, RouteTable};
//! use serde_json::json;
//!
//! fn get_widget(req: RequestView) -> HandlerResult {
//!     let id = req.path_parameter("id").pop().unwrap_or_default();
//!     let verbose = req.query_parameter("verbose");
//!     Ok(OperationResponse::json(200, json!({ "id": id, "verbose": verbose })))
//! }
//!
//! let table = RouteTable::builder()
//!     .route(OperationMethod::Get, "/widgets/{id}", "getWidget", get_widget)
//!     .unwrap()
//!     .build();
//! let dispatcher = Dispatcher::new(table);
//!
//! let res = dispatcher
//!     .dispatch(TransportRequest::new("GET", "/widgets/a%20b?verbose=1"))
//!     .unwrap();
//! assert_eq!(res.status, 200);
//! assert_eq!(res.body_bytes(), br#"{"id":"a b","verbose":["1"]}"#);
//! ```
//!
//! Serving it:
//!
//! ```rust,no_run
//! # use brrtcore::{dispatcher::Dispatcher, route::RouteTable, server::HttpServer};
//! # let dispatcher = Dispatcher::new(RouteTable::builder().build());
//! brrtcore::runtime_config::RuntimeConfig::from_env().apply();
//! let handle = HttpServer::new(dispatcher).start("127.0.0.1:8080").unwrap();
//! handle.wait_ready().unwrap();
//! handle.join().unwrap();
//! ```

pub mod cli;
pub mod diagnostics;
pub mod dispatcher;
pub mod echo;
pub mod handler;
pub mod ids;
pub mod logging;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod spec;

pub use diagnostics::{Diagnostics, Severity, TracingDiagnostics};
pub use dispatcher::{DispatchError, Dispatcher};
pub use handler::{HandlerError, HandlerResult, OperationHandler, ResponseError};
pub use request::{RequestView, TransportRequest};
pub use response::{OperationResponse, TransportResponse};
pub use route::{OperationMethod, RouteTable};
