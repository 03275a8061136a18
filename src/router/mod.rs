//! # Router Module
//!
//! Path matching for the dispatch core. OpenAPI path templates (e.g.
//! `/pets/{id}`) are compiled once into [`UriPattern`]s when the route table is
//! built and then matched against every incoming request path.
//!
//! ## Matching rules
//!
//! - Literal segments compare exactly (no case folding, no decoding).
//! - Each `{name}` captures one non-empty segment, returned raw.
//! - Anything after the template is the match *remainder*. Only a match with an
//!   empty remainder selects a route, so `/users` never answers for
//!   `/users/7` and a trailing slash is significant.
//!
//! ## Example
//!
//! ```rust
//! use brrtcore::router::UriPattern;
//!
//! let pattern = UriPattern::compile("/users/{id}").unwrap();
//!
//! let full = pattern.match_path("/users/42").unwrap();
//! assert!(full.is_full());
//! assert_eq!(full.get("id"), Some("42"));
//!
//! let partial = pattern.match_path("/users/42/posts").unwrap();
//! assert_eq!(partial.remainder(), "/posts");
//!
//! assert!(pattern.match_path("/users").is_none());
//! ```

mod core;

pub use core::{MatchResult, ParamVec, RouteError, UriPattern, MAX_INLINE_PARAMS};
