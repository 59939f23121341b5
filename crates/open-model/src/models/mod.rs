//! Example generated models.

pub mod address;
pub mod nested_object;

pub use address::Address;
pub use nested_object::NestedObject;
