//! Per-type model metadata: declared fields, their kinds and buckets.

pub mod kind;
pub mod schema;
pub mod validate;

pub use kind::JsonKind;
pub use schema::*;
pub use validate::validate_schema;
