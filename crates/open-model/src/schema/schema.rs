use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};

// -------------------------------------------------------------------------
// FieldKind

/// Declared type of a model field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Any JSON value, stored verbatim.
    Any,
    Bool,
    Num,
    Str,
    /// Homogeneous array; `Arr(Box::new(FieldKind::Any))` for heterogeneous ones.
    Arr(Box<FieldKind>),
    /// Positional element kinds. Items past the last position are untyped.
    Tuple(Vec<FieldKind>),
    /// Reference to another model.
    Obj(Arc<ModelSchema>),
    /// `oneOf` union; the first member accepting a value wins.
    Or(Vec<FieldKind>),
    /// Constant value.
    Con(Value),
}

impl FieldKind {
    pub fn arr(item: FieldKind) -> Self {
        Self::Arr(Box::new(item))
    }

    pub fn any_arr() -> Self {
        Self::arr(Self::Any)
    }

    pub fn obj(schema: &Arc<ModelSchema>) -> Self {
        Self::Obj(Arc::clone(schema))
    }

    /// Checks the JSON kind of `value`.
    ///
    /// Arrays, tuples, unions and constants are checked element-wise. Nested
    /// objects are only checked for being objects here; their fields are
    /// checked when the enclosing model is encoded or decoded.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Bool => value.is_boolean(),
            Self::Num => value.is_number(),
            Self::Str => value.is_string(),
            Self::Arr(item) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| item.accepts(v))),
            Self::Tuple(kinds) => value.as_array().is_some_and(|items| {
                kinds
                    .iter()
                    .zip(items)
                    .all(|(kind, item)| kind.accepts(item))
            }),
            Self::Obj(_) => value.is_object(),
            Self::Or(kinds) => kinds.iter().any(|k| k.accepts(value)),
            Self::Con(literal) => literal == value,
        }
    }

    /// The value a lenient decode fills in for a missing required field.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Any => Value::Null,
            Self::Bool => Value::Bool(false),
            Self::Num => Value::from(0),
            Self::Str => Value::String(String::new()),
            Self::Arr(_) => Value::Array(Vec::new()),
            Self::Tuple(kinds) => Value::Array(kinds.iter().map(Self::zero_value).collect()),
            Self::Obj(schema) => Value::Object(schema.zero_object()),
            Self::Or(kinds) => kinds.first().map(Self::zero_value).unwrap_or(Value::Null),
            Self::Con(literal) => literal.clone(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any value"),
            Self::Bool => f.write_str("boolean"),
            Self::Num => f.write_str("number"),
            Self::Str => f.write_str("string"),
            Self::Arr(item) => match item.as_ref() {
                Self::Any => f.write_str("array"),
                item => write!(f, "array of {item}"),
            },
            Self::Tuple(kinds) => {
                f.write_str("tuple [")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{kind}")?;
                }
                f.write_str("]")
            }
            Self::Obj(schema) => write!(f, "object `{}`", schema.name),
            Self::Or(kinds) => {
                f.write_str("one of (")?;
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{kind}")?;
                }
                f.write_str(")")
            }
            Self::Con(literal) => write!(f, "constant {literal}"),
        }
    }
}

static ANY: FieldKind = FieldKind::Any;

// -------------------------------------------------------------------------
// FieldSchema

/// One declared field: wire name, kind and whether it is required.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub wire_name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSchema {
    pub fn new(wire_name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            wire_name: wire_name.into(),
            kind,
            required: true,
        }
    }

    pub fn new_opt(wire_name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            wire_name: wire_name.into(),
            kind,
            required: false,
        }
    }
}

// -------------------------------------------------------------------------
// ModelSchema

/// Undeclared keys matching `pattern` land in their own bucket.
#[derive(Debug, Clone)]
pub struct PatternProperty {
    pub pattern: Regex,
    pub kind: FieldKind,
}

/// Where an undeclared key is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Index into [`ModelSchema::patterns`].
    Pattern(usize),
    Additional,
}

/// Static metadata of one model type.
///
/// Field order is the canonical encode order.
#[derive(Debug, Clone, Default)]
pub struct ModelSchema {
    pub name: String,
    fields: Vec<FieldSchema>,
    index: IndexMap<String, usize>,
    pattern_properties: Vec<PatternProperty>,
    additional_properties: Option<FieldKind>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        let position = self.fields.len();
        self.index.entry(field.wire_name.clone()).or_insert(position);
        self.fields.push(field);
        self
    }

    pub fn prop(self, wire_name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSchema::new(wire_name, kind))
    }

    pub fn opt(self, wire_name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSchema::new_opt(wire_name, kind))
    }

    pub fn additional_properties(mut self, kind: FieldKind) -> Self {
        self.additional_properties = Some(kind);
        self
    }

    pub fn pattern_properties(mut self, pattern: Regex, kind: FieldKind) -> Self {
        self.pattern_properties.push(PatternProperty { pattern, kind });
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn get_field(&self, wire_name: &str) -> Option<&FieldSchema> {
        self.index_of(wire_name).map(|i| &self.fields[i])
    }

    pub fn index_of(&self, wire_name: &str) -> Option<usize> {
        self.index.get(wire_name).copied()
    }

    pub fn is_declared(&self, wire_name: &str) -> bool {
        self.index.contains_key(wire_name)
    }

    pub fn patterns(&self) -> &[PatternProperty] {
        &self.pattern_properties
    }

    pub fn additional_kind(&self) -> Option<&FieldKind> {
        self.additional_properties.as_ref()
    }

    /// Whether undeclared keys can be stored at all.
    pub fn is_open(&self) -> bool {
        self.additional_properties.is_some() || !self.pattern_properties.is_empty()
    }

    /// Routes an undeclared key to its bucket. Pattern buckets are tried in
    /// declaration order before the catch-all.
    pub fn bucket_for(&self, key: &str) -> Option<Bucket> {
        if let Some(i) = self
            .pattern_properties
            .iter()
            .position(|p| p.pattern.is_match(key))
        {
            return Some(Bucket::Pattern(i));
        }
        self.additional_properties.as_ref().map(|_| Bucket::Additional)
    }

    pub fn bucket_kind(&self, bucket: Bucket) -> &FieldKind {
        match bucket {
            Bucket::Pattern(i) => &self.pattern_properties[i].kind,
            Bucket::Additional => self.additional_properties.as_ref().unwrap_or(&ANY),
        }
    }

    pub(crate) fn has_duplicates(&self) -> bool {
        self.index.len() != self.fields.len()
    }

    /// Object holding the zero value of every required field.
    pub fn zero_object(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| (f.wire_name.clone(), f.kind.zero_value()))
            .collect()
    }
}
