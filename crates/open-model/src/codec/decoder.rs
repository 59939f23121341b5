//! JSON decoder.
//!
//! Splits an input object into declared slots and undeclared buckets,
//! converting declared values against their kinds.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::{Map, Value};

use super::options::{DecodeOptions, RequiredFields, UnknownFields};
use super::path::{field_path, index_path};
use crate::error::{CodecError, Result};
use crate::schema::{FieldKind, JsonKind, ModelSchema};
use crate::value::Record;

/// Parse `bytes` and decode the top-level object into a record.
pub fn decode_record(
    schema: &Arc<ModelSchema>,
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<Record> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_record_value(schema, value, options)
}

/// Decode an already parsed value into a record.
pub fn decode_record_value(
    schema: &Arc<ModelSchema>,
    value: Value,
    options: &DecodeOptions,
) -> Result<Record> {
    match value {
        Value::Object(map) => decode_obj(schema, map, options, ""),
        other => Err(CodecError::NotAnObject(JsonKind::of(&other))),
    }
}

/// Same as [`decode_record_value`] for a value found at `path` inside a
/// parent model.
pub(crate) fn decode_record_at(
    schema: &Arc<ModelSchema>,
    value: Value,
    options: &DecodeOptions,
    path: &str,
) -> Result<Record> {
    match value {
        Value::Object(map) => decode_obj(schema, map, options, path),
        other => Err(CodecError::mismatch(path, FieldKind::Obj(Arc::clone(schema)), &other)),
    }
}

fn decode_obj(
    schema: &Arc<ModelSchema>,
    map: Map<String, Value>,
    options: &DecodeOptions,
    path: &str,
) -> Result<Record> {
    let mut record = Record::new(Arc::clone(schema));

    for (key, value) in map {
        let key_path = field_path(path, &key);

        if let Some(index) = schema.index_of(&key) {
            let kind = &schema.fields()[index].kind;
            let value = decode_node(kind, value, &key_path, options)?;
            record.set_slot(index, value);
            continue;
        }

        match schema.bucket_for(&key) {
            Some(bucket) => {
                let kind = schema.bucket_kind(bucket);
                if !kind.accepts(&value) {
                    return Err(CodecError::mismatch(&key_path, kind, &value));
                }
                debug!("{}: keeping undeclared key `{key_path}`", schema.name);
                record.bucket_mut(bucket).insert(key, value);
            }
            None => match options.unknown_fields {
                UnknownFields::Reject => return Err(CodecError::UnknownField(key_path)),
                UnknownFields::Ignore => {
                    debug!("{}: dropping undeclared key `{key_path}`", schema.name);
                }
            },
        }
    }

    for (index, field) in schema.fields().iter().enumerate() {
        if !field.required || record.slot_is_set(index) {
            continue;
        }
        let key_path = field_path(path, &field.wire_name);
        match options.required {
            RequiredFields::Strict => return Err(CodecError::MissingRequiredField(key_path)),
            RequiredFields::Lenient => {
                warn!("{}: required field `{key_path}` missing, using zero value", schema.name);
                record.set_slot(index, field.kind.zero_value());
            }
        }
    }

    Ok(record)
}

fn decode_node(
    kind: &FieldKind,
    value: Value,
    path: &str,
    options: &DecodeOptions,
) -> Result<Value> {
    match kind {
        FieldKind::Any => Ok(value),
        FieldKind::Bool | FieldKind::Num | FieldKind::Str | FieldKind::Con(_) => {
            if kind.accepts(&value) {
                Ok(value)
            } else {
                Err(CodecError::mismatch(path, kind, &value))
            }
        }
        FieldKind::Arr(item) => match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| decode_node(item, v, &index_path(path, i), options))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Err(CodecError::mismatch(path, kind, &other)),
        },
        FieldKind::Tuple(kinds) => match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, v)| match kinds.get(i) {
                    Some(k) => decode_node(k, v, &index_path(path, i), options),
                    None => Ok(v),
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Err(CodecError::mismatch(path, kind, &other)),
        },
        FieldKind::Obj(schema) => match value {
            Value::Object(map) => decode_obj(schema, map, options, path).map(Record::into_value),
            other => Err(CodecError::mismatch(path, kind, &other)),
        },
        FieldKind::Or(kinds) => decode_union(kind, kinds, value, path, options),
    }
}

/// Members are tried in order with required fields enforced; the first one
/// that decodes wins. Lenient filling only applies once no member fits.
fn decode_union(
    kind: &FieldKind,
    kinds: &[FieldKind],
    value: Value,
    path: &str,
    options: &DecodeOptions,
) -> Result<Value> {
    let strict = DecodeOptions {
        required: RequiredFields::Strict,
        unknown_fields: options.unknown_fields,
    };
    let mut first_err = None;
    for member in kinds.iter().filter(|k| k.accepts(&value)) {
        match decode_node(member, value.clone(), path, &strict) {
            Ok(decoded) => return Ok(decoded),
            Err(err) => {
                first_err.get_or_insert(err);
            }
        }
    }
    if options.required == RequiredFields::Lenient {
        if let Some(member) = kinds.iter().find(|k| k.accepts(&value)) {
            return decode_node(member, value, path, options);
        }
    }
    Err(first_err.unwrap_or_else(|| CodecError::mismatch(path, kind, &value)))
}
