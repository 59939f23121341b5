//! JSON codec for open schema-generated models.
//!
//! A model combines declared fields, each required or optional, with a
//! catch-all bucket for properties the schema does not declare. The codec
//! keeps four promises:
//!
//! - unset optional fields are absent from output, never `null`;
//! - undeclared input keys survive a decode/encode round-trip;
//! - the bucket is flattened into the object, never emitted as a key;
//! - declared fields are written in schema order, whatever order they were
//!   populated or received in.
//!
//! ```
//! use open_model::models::{Address, NestedObject};
//! use serde_json::json;
//!
//! let address = Address {
//!     marriage: Some(true),
//!     nested_object: Some(Box::new(NestedObject::with_test("test"))),
//!     ..Address::new("test", 1.0, vec![json!(1), json!("test")])
//! };
//! let text = open_model::encode_to_string(&address).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"street_name":"test","house_number":1,"marriage":true,"array_type":[1,"test"],"nestedObject":{"test":"test"}}"#
//! );
//! let decoded: Address = open_model::decode_str(&text).unwrap();
//! assert_eq!(decoded, address);
//! ```

pub mod codec;
pub mod constants;
pub mod error;
pub mod model;
pub mod models;
pub mod schema;
pub mod value;

pub use codec::{
    decode, decode_str, decode_value, decode_with, encode, encode_to_string, DecodeOptions,
    RequiredFields, UnknownFields,
};
pub use error::{CodecError, Result, SchemaError, TypeMismatch};
pub use model::{FieldValue, OpenModel};
pub use schema::{validate_schema, FieldKind, FieldSchema, JsonKind, ModelSchema};
pub use value::{AdditionalProperties, Record};

#[doc(hidden)]
pub use serde;
#[doc(hidden)]
pub use serde_json;
