//! # Spec Module
//!
//! Reads the operation list out of an OpenAPI 3 document so route tables can
//! be bound by operation id. Only `paths` and `servers` are consulted;
//! schemas, parameters and security requirements are not interpreted.

mod load;
mod types;

pub use load::{
    bind_operations, load_operations, operation_slug, operations_from_value, parse_json,
    parse_yaml,
};
pub use types::{OperationSpec, SpecError};
