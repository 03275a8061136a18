//! # Request Module
//!
//! Translation from the transport's view of a request into the
//! operation-agnostic [`RequestView`] handlers consume.
//!
//! - [`TransportRequest`] is the inbound boundary: raw method string, request
//!   target, header multimap, body stream and the cookie jar filled in by the
//!   upstream cookie parser.
//! - [`RequestView`] wraps a transport request plus the route's match result
//!   and exposes path/query/header/cookie lookups and the three body readers.

mod cookies;
mod error;
mod transport;
mod view;

pub use cookies::CookieJar;
pub use error::BodyError;
pub use transport::{normalize_path, TransportRequest};
pub use view::RequestView;
