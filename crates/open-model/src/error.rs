//! Codec error taxonomy.

use std::fmt;

use thiserror::Error;

use crate::schema::JsonKind;

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

/// A declared field holding a value of the wrong JSON kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}`: expected {expected}, found {actual}")]
pub struct TypeMismatch {
    /// Path of the offending field, e.g. `nestedObject.test` or `array_type[1]`.
    pub field: String,
    pub expected: String,
    pub actual: JsonKind,
}

/// Errors while constructing, encoding or decoding a model.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(JsonKind),
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
    #[error("missing required field `{0}`")]
    MissingRequiredField(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("additional property `{0}` collides with a declared field")]
    CatchAllCollision(String),
    #[error("field `{0}`: number is not finite")]
    NonFiniteNumber(String),
}

impl CodecError {
    pub(crate) fn mismatch(
        field: &str,
        expected: impl fmt::Display,
        actual: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch(TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: JsonKind::of(actual),
        })
    }

    /// Field path the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch(m) => Some(&m.field),
            Self::MissingRequiredField(f)
            | Self::UnknownField(f)
            | Self::CatchAllCollision(f)
            | Self::NonFiniteNumber(f) => Some(f),
            Self::Parse(_) | Self::NotAnObject(_) => None,
        }
    }
}

/// Generation-time configuration errors in a model schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("model `{0}` declares a field with an empty wire name")]
    EmptyWireName(String),
    #[error("model `{model}` declares `{field}` more than once")]
    DuplicateWireName { model: String, field: String },
    #[error("field `{0}` declares an empty union")]
    EmptyUnion(String),
    #[error("const field `{0}` must be required")]
    OptionalConst(String),
}
