//! Conversions between Rust field types and JSON values.

use serde_json::{Number, Value};

use super::OpenModel;
use crate::codec::{decode_record_at, DecodeOptions};
use crate::constants::MAX_SAFE_INTEGER;
use crate::error::{CodecError, Result};

/// A Rust type usable as a declared field of a generated model.
///
/// `field` is the field path used in errors.
pub trait FieldValue: Sized {
    fn to_json(&self, field: &str) -> Result<Value>;
    fn from_json(value: Value, field: &str) -> Result<Self>;
}

/// JSON number for `n`. Integral values in the safe range are written
/// without a fraction (`1`, not `1.0`).
pub fn number_value(n: f64, field: &str) -> Result<Value> {
    if !n.is_finite() {
        return Err(CodecError::NonFiniteNumber(field.to_string()));
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Ok(Value::from(n as i64));
    }
    Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(|| CodecError::NonFiniteNumber(field.to_string()))
}

impl FieldValue for String {
    fn to_json(&self, _field: &str) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_json(value: Value, field: &str) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(CodecError::mismatch(field, "string", &other)),
        }
    }
}

impl FieldValue for f64 {
    fn to_json(&self, field: &str) -> Result<Value> {
        number_value(*self, field)
    }

    fn from_json(value: Value, field: &str) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| CodecError::mismatch(field, "number", &value))
    }
}

impl FieldValue for bool {
    fn to_json(&self, _field: &str) -> Result<Value> {
        Ok(Value::Bool(*self))
    }

    fn from_json(value: Value, field: &str) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| CodecError::mismatch(field, "boolean", &value))
    }
}

impl FieldValue for Value {
    fn to_json(&self, _field: &str) -> Result<Value> {
        Ok(self.clone())
    }

    fn from_json(value: Value, _field: &str) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_json(&self, field: &str) -> Result<Value> {
        self.iter()
            .enumerate()
            .map(|(i, item)| item.to_json(&format!("{field}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn from_json(value: Value, field: &str) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_json(item, &format!("{field}[{i}]")))
                .collect(),
            other => Err(CodecError::mismatch(field, "array", &other)),
        }
    }
}

/// Reference-typed fields hold the nested model in its canonical JSON form.
impl<M: OpenModel> FieldValue for Box<M> {
    fn to_json(&self, _field: &str) -> Result<Value> {
        Ok(self.to_record()?.into_value())
    }

    fn from_json(value: Value, field: &str) -> Result<Self> {
        let record = decode_record_at(&M::schema(), value, &DecodeOptions::default(), field)?;
        M::from_record(record).map(Box::new)
    }
}
