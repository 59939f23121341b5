//! Schema-driven model instance.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::additional::AdditionalProperties;
use crate::error::{CodecError, Result};
use crate::model::FieldValue;
use crate::schema::{Bucket, FieldKind, FieldSchema, ModelSchema};

/// Declared field slots plus the undeclared buckets of one model value.
///
/// Slots are aligned with [`ModelSchema::fields`]; `None` means the field was
/// never set, which is distinct from any value, zero values included.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<ModelSchema>,
    declared: Vec<Option<Value>>,
    patterns: Vec<AdditionalProperties>,
    additional: AdditionalProperties,
}

impl Record {
    /// Empty record. Const fields start out set to their constant.
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        let declared = schema
            .fields()
            .iter()
            .map(|field| match &field.kind {
                FieldKind::Con(literal) => Some(literal.clone()),
                _ => None,
            })
            .collect();
        let patterns = vec![AdditionalProperties::new(); schema.patterns().len()];
        Self {
            schema,
            declared,
            patterns,
            additional: AdditionalProperties::new(),
        }
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// Sets a declared field after checking its JSON kind.
    pub fn set(&mut self, wire_name: &str, value: Value) -> Result<()> {
        let index = self
            .schema
            .index_of(wire_name)
            .ok_or_else(|| CodecError::UnknownField(wire_name.to_string()))?;
        let kind = &self.schema.fields()[index].kind;
        if !kind.accepts(&value) {
            return Err(CodecError::mismatch(wire_name, kind, &value));
        }
        self.declared[index] = Some(value);
        Ok(())
    }

    pub fn get(&self, wire_name: &str) -> Option<&Value> {
        self.schema
            .index_of(wire_name)
            .and_then(|i| self.declared[i].as_ref())
    }

    pub fn is_set(&self, wire_name: &str) -> bool {
        self.get(wire_name).is_some()
    }

    /// Clears a declared field so it is omitted on encode.
    pub fn unset(&mut self, wire_name: &str) {
        self.take(wire_name);
    }

    /// Unsets a declared field, returning its previous value.
    pub fn take(&mut self, wire_name: &str) -> Option<Value> {
        let index = self.schema.index_of(wire_name)?;
        self.declared[index].take()
    }

    pub fn put<T: FieldValue>(&mut self, wire_name: &str, value: &T) -> Result<()> {
        let value = value.to_json(wire_name)?;
        self.set(wire_name, value)
    }

    /// Sets the field when `value` is present, unsets it otherwise.
    pub fn put_opt<T: FieldValue>(&mut self, wire_name: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => self.put(wire_name, value),
            None => {
                self.unset(wire_name);
                Ok(())
            }
        }
    }

    pub fn take_required<T: FieldValue>(&mut self, wire_name: &str) -> Result<T> {
        let value = self
            .take(wire_name)
            .ok_or_else(|| CodecError::MissingRequiredField(wire_name.to_string()))?;
        T::from_json(value, wire_name)
    }

    pub fn take_opt<T: FieldValue>(&mut self, wire_name: &str) -> Result<Option<T>> {
        self.take(wire_name)
            .map(|value| T::from_json(value, wire_name))
            .transpose()
    }

    /// Stores an undeclared key in the first matching pattern bucket, else in
    /// the catch-all.
    pub fn insert_additional(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if self.schema.is_declared(&key) {
            return Err(CodecError::CatchAllCollision(key));
        }
        let bucket = self
            .schema
            .bucket_for(&key)
            .ok_or_else(|| CodecError::UnknownField(key.clone()))?;
        let kind = self.schema.bucket_kind(bucket);
        if !kind.accepts(&value) {
            return Err(CodecError::mismatch(&key, kind, &value));
        }
        self.bucket_mut(bucket).insert(key, value);
        Ok(())
    }

    pub fn extend_additional(&mut self, props: AdditionalProperties) -> Result<()> {
        for (key, value) in props {
            self.insert_additional(key, value)?;
        }
        Ok(())
    }

    /// The catch-all bucket.
    pub fn additional(&self) -> &AdditionalProperties {
        &self.additional
    }

    pub fn take_additional(&mut self) -> AdditionalProperties {
        std::mem::take(&mut self.additional)
    }

    /// Bucket of the `index`-th pattern property.
    pub fn pattern_bucket(&self, index: usize) -> Option<&AdditionalProperties> {
        self.patterns.get(index)
    }

    /// Declared fields with their slots, in schema order.
    pub fn declared(&self) -> impl Iterator<Item = (&FieldSchema, Option<&Value>)> {
        self.schema
            .fields()
            .iter()
            .zip(self.declared.iter().map(Option::as_ref))
    }

    /// Undeclared entries: pattern buckets in declaration order, then the
    /// catch-all.
    pub fn undeclared(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.patterns
            .iter()
            .flat_map(|bucket| bucket.iter())
            .chain(self.additional.iter())
    }

    /// Canonical JSON object: declared fields in schema order, then
    /// undeclared entries.
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        for (field, slot) in self.schema.fields().iter().zip(self.declared) {
            if let Some(value) = slot {
                map.insert(field.wire_name.clone(), value);
            }
        }
        for bucket in self.patterns {
            map.extend(bucket);
        }
        map.extend(self.additional);
        Value::Object(map)
    }

    pub(crate) fn set_slot(&mut self, index: usize, value: Value) {
        self.declared[index] = Some(value);
    }

    pub(crate) fn slot_is_set(&self, index: usize) -> bool {
        self.declared[index].is_some()
    }

    pub(crate) fn bucket_mut(&mut self, bucket: Bucket) -> &mut AdditionalProperties {
        match bucket {
            Bucket::Pattern(i) => &mut self.patterns[i],
            Bucket::Additional => &mut self.additional,
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name == other.schema.name
            && self.declared == other.declared
            && self.patterns == other.patterns
            && self.additional == other.additional
    }
}
