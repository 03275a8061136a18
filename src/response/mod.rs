//! # Response Module
//!
//! Typed handler responses and the encoder that turns them into transport
//! responses.
//!
//! ## Body kinds
//!
//! | Variant  | Encoding                                   |
//! |----------|--------------------------------------------|
//! | `Json`   | compact JSON                               |
//! | `Text`   | string bytes under the declared charset    |
//! | `Binary` | unchanged                                  |
//! | `Empty`  | no body, no headers                        |
//!
//! ```rust
//! use brrtcore::response::{encode, OperationResponse};
//! use serde_json::json;
//!
//! let res = OperationResponse::json(200, json!({ "a": 1 }))
//!     .header("X-Foo", "1")
//!     .unwrap()
//!     .header("X-Foo", "2")
//!     .unwrap();
//! let out = encode(res);
//! assert_eq!(out.body_bytes(), br#"{"a":1}"#);
//! assert_eq!(out.header("x-foo"), Some("1"));
//! ```

mod core;
mod encode;
mod media;

pub use core::{OperationResponse, ResponseBody};
pub use encode::{encode, TransportResponse};
pub use media::{InvalidMediaType, MediaType};
