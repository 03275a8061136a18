//! # Dispatcher Module
//!
//! Turns a [`TransportRequest`](crate::request::TransportRequest) into a
//! [`TransportResponse`](crate::response::TransportResponse).
//!
//! ## Request Flow
//!
//! 1. Parse the method; an unknown verb cannot match any route
//! 2. Split the target at `?` and normalize the path to one leading `/`
//! 3. Walk the route table in registration order and take the first route
//!    whose method matches and whose pattern matches the whole path
//! 4. Wrap the request and the match in a
//!    [`RequestView`](crate::request::RequestView) and run the handler
//! 5. Encode the handler's response
//!
//! ## Error Handling
//!
//! - No selected route: 404 with body `Not Found.`, logged at debug
//! - [`ResponseError`](crate::handler::ResponseError): its status and message,
//!   logged at debug
//! - Anything else: logged at warn and returned as [`DispatchError`]; the
//!   server turns it into a 500
//!
//! ```rust
//! use brrtcore::dispatcher::Dispatcher;
//! use brrtcore::handler::{HandlerResult, ResponseError};
//! use brrtcore::request::{RequestView, TransportRequest};
//! use brrtcore::route::{OperationMethod, RouteTable};
//!
//! fn reject(_: RequestView) -> HandlerResult {
//!     Err(ResponseError::bad_request("bad input").into())
//! }
//!
//! let table = RouteTable::builder()
//!     .route(OperationMethod::Post, "/widgets", "createWidget", reject)
//!     .unwrap()
//!     .build();
//! let dispatcher = Dispatcher::new(table);
//!
//! let res = dispatcher.dispatch(TransportRequest::new("POST", "/widgets")).unwrap();
//! assert_eq!(res.status, 400);
//! assert_eq!(res.body_bytes(), b"bad input");
//!
//! let res = dispatcher.dispatch(TransportRequest::new("DELETE", "/widgets/7")).unwrap();
//! assert_eq!(res.status, 404);
//! ```

mod core;

pub use core::{DispatchError, Dispatcher};
