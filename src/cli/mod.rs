//! # CLI Module
//!
//! The `brrtcore` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Serve every operation of an OpenAPI document with the echo handler:
//!
//! ```bash
//! brrtcore serve --spec openapi.yaml --addr 127.0.0.1:8080
//! ```
//!
//! `--addr` and `--stack-size` also read `BRRTCORE_ADDR` and
//! `BRRTCORE_STACK_SIZE`. Logging is configured from `BRRTCORE_LOG_*`.
//! SIGINT or SIGTERM stops the server.
//!
//! ### `routes`
//!
//! Print the operations of a document in the order they would be matched:
//!
//! ```bash
//! brrtcore routes --spec openapi.yaml
//! brrtcore routes --spec openapi.yaml --json
//! ```

mod commands;


pub use commands::{echo_table, run, run_cli, Cli, Commands};
