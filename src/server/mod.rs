//! # Server Module
//!
//! The transport boundary: serves a [`Dispatcher`](crate::dispatcher::Dispatcher)
//! over `may_minihttp`.
//!
//! [`DispatchService`] converts each `may_minihttp` request into a
//! [`TransportRequest`](crate::request::TransportRequest) and writes the
//! resulting [`TransportResponse`](crate::response::TransportResponse) back.
//! [`HttpServer`] starts the listener and returns a [`ServerHandle`] used to
//! wait for readiness, stop or join.

mod http_server;
mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use service::{DispatchService, MAX_INTERNED_HEADER_LINES, MAX_RESPONSE_HEADERS};
