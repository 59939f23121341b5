//! Encode and decode typed models.
//!
//! `encode(model) -> bytes` writes declared fields in schema order, omits
//! unset optional fields and flattens the catch-all bucket into the object.
//! `decode(bytes) -> model` routes every input key either to its declared
//! field or to a bucket.

pub mod decoder;
pub mod encoder;
pub mod options;
mod path;

use serde_json::Value;

pub use decoder::{decode_record, decode_record_value};
pub use encoder::encode_record;
pub use options::{DecodeOptions, RequiredFields, UnknownFields};

use crate::error::Result;
use crate::model::OpenModel;

pub(crate) use decoder::decode_record_at;

pub fn encode<M: OpenModel>(model: &M) -> Result<Vec<u8>> {
    encode_to_string(model).map(String::into_bytes)
}

pub fn encode_to_string<M: OpenModel>(model: &M) -> Result<String> {
    encode_record(&model.to_record()?)
}

/// Decode with the default options: strict required fields, unknown keys on
/// closed models ignored.
pub fn decode<M: OpenModel>(bytes: &[u8]) -> Result<M> {
    decode_with(bytes, &DecodeOptions::default())
}

pub fn decode_with<M: OpenModel>(bytes: &[u8], options: &DecodeOptions) -> Result<M> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(value, options)
}

pub fn decode_str<M: OpenModel>(text: &str) -> Result<M> {
    decode(text.as_bytes())
}

/// Decode from an already parsed JSON value.
pub fn decode_value<M: OpenModel>(value: Value, options: &DecodeOptions) -> Result<M> {
    let record = decode_record_value(&M::schema(), value, options)?;
    M::from_record(record)
}
