//! # Route Module
//!
//! The route table: an ordered list of [`RouteConfig`] entries, each binding an
//! [`OperationMethod`], a compiled [`UriPattern`](crate::router::UriPattern)
//! and an [`OperationHandler`](crate::handler::OperationHandler).
//!
//! Tables are produced once at server-build time, usually by generated
//! registry code:
//!
//! ```rust
//! use brrtcore::handler::HandlerResult;
//! use brrtcore::request::RequestView;
//! use brrtcore::response::OperationResponse;
//! use brrtcore::route::{OperationMethod, RouteTable};
//! use serde_json::json;
//!
//! fn get_widget(req: RequestView) -> HandlerResult {
//!     let id = req.path_parameter("id").pop().unwrap_or_default();
//!     Ok(OperationResponse::json(200, json!({ "id": id })))
//! }
//!
//! let table = RouteTable::builder()
//!     .route(OperationMethod::Get, "/widgets/{id}", "getWidget", get_widget)
//!     .unwrap()
//!     .build();
//! assert_eq!(table.len(), 1);
//! ```

mod method;
mod table;

pub use method::{OperationMethod, UnknownMethod};
pub use table::{RouteConfig, RouteTable, RouteTableBuilder};
