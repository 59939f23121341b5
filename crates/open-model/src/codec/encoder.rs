//! JSON text encoder.
//!
//! Declared fields are written in schema order, unset optional fields are
//! skipped, and undeclared entries are flattened after them.

use serde_json::{Map, Value};

use super::path::{field_path, index_path};
use crate::error::{CodecError, Result};
use crate::schema::{Bucket, FieldKind, ModelSchema};
use crate::value::Record;

/// Encode a record as a compact JSON object.
pub fn encode_record(record: &Record) -> Result<String> {
    let mut parts: Vec<String> = Vec::new();

    for (field, slot) in record.declared() {
        match slot {
            Some(value) => {
                let encoded = encode_node(&field.kind, value, &field.wire_name)?;
                parts.push(format!(
                    "{}:{}",
                    serde_json::to_string(&field.wire_name)?,
                    encoded
                ));
            }
            None if field.required => {
                return Err(CodecError::MissingRequiredField(field.wire_name.clone()));
            }
            None => {}
        }
    }

    for (key, value) in record.undeclared() {
        parts.push(format!(
            "{}:{}",
            serde_json::to_string(key)?,
            serde_json::to_string(value)?
        ));
    }

    Ok(format!("{{{}}}", parts.join(",")))
}

fn encode_node(kind: &FieldKind, value: &Value, path: &str) -> Result<String> {
    match kind {
        FieldKind::Any => serde_json::to_string(value).map_err(Into::into),
        FieldKind::Bool | FieldKind::Num | FieldKind::Str | FieldKind::Con(_) => {
            if !kind.accepts(value) {
                return Err(CodecError::mismatch(path, kind, value));
            }
            serde_json::to_string(value).map_err(Into::into)
        }
        FieldKind::Arr(item) => {
            let Some(items) = value.as_array() else {
                return Err(CodecError::mismatch(path, kind, value));
            };
            encode_arr(items, path, |_| Some(item.as_ref()))
        }
        FieldKind::Tuple(kinds) => {
            let Some(items) = value.as_array() else {
                return Err(CodecError::mismatch(path, kind, value));
            };
            encode_arr(items, path, |i| kinds.get(i))
        }
        FieldKind::Obj(schema) => {
            let Some(map) = value.as_object() else {
                return Err(CodecError::mismatch(path, kind, value));
            };
            encode_obj(schema, map, path)
        }
        FieldKind::Or(kinds) => {
            let mut first_err = None;
            for member in kinds.iter().filter(|k| k.accepts(value)) {
                match encode_node(member, value, path) {
                    Ok(encoded) => return Ok(encoded),
                    Err(err) => {
                        first_err.get_or_insert(err);
                    }
                }
            }
            Err(first_err.unwrap_or_else(|| CodecError::mismatch(path, kind, value)))
        }
    }
}

fn encode_arr<'k>(
    items: &[Value],
    path: &str,
    kind_at: impl Fn(usize) -> Option<&'k FieldKind>,
) -> Result<String> {
    let mut out = String::from("[");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let encoded = match kind_at(i) {
            Some(kind) => encode_node(kind, item, &index_path(path, i))?,
            None => serde_json::to_string(item)?,
        };
        out.push_str(&encoded);
    }
    out.push(']');
    Ok(out)
}

/// Nested objects are held as plain JSON objects; the nested schema decides
/// key order and which keys may appear.
fn encode_obj(schema: &ModelSchema, map: &Map<String, Value>, path: &str) -> Result<String> {
    let mut parts: Vec<String> = Vec::new();

    for field in schema.fields() {
        let nested_path = field_path(path, &field.wire_name);
        match map.get(&field.wire_name) {
            Some(value) => parts.push(format!(
                "{}:{}",
                serde_json::to_string(&field.wire_name)?,
                encode_node(&field.kind, value, &nested_path)?
            )),
            None if field.required => return Err(CodecError::MissingRequiredField(nested_path)),
            None => {}
        }
    }

    // Pattern buckets in declaration order, catch-all last.
    let catch_all = schema.patterns().len();
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); catch_all + 1];
    for (key, value) in map {
        if schema.is_declared(key) {
            continue;
        }
        let nested_path = field_path(path, key);
        let Some(bucket) = schema.bucket_for(key) else {
            return Err(CodecError::UnknownField(nested_path));
        };
        let kind = schema.bucket_kind(bucket);
        if !kind.accepts(value) {
            return Err(CodecError::mismatch(&nested_path, kind, value));
        }
        let slot = match bucket {
            Bucket::Pattern(i) => i,
            Bucket::Additional => catch_all,
        };
        buckets[slot].push(format!(
            "{}:{}",
            serde_json::to_string(key)?,
            serde_json::to_string(value)?
        ));
    }
    parts.extend(buckets.into_iter().flatten());

    Ok(format!("{{{}}}", parts.join(",")))
}
