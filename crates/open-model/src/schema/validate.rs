//! Schema integrity validator.
//!
//! Runs where schemas are produced; a schema that fails here is a
//! configuration error, never a decode-time condition.

use super::schema::*;
use crate::error::SchemaError;

/// Validate a model schema and every schema nested in it.
pub fn validate_schema(schema: &ModelSchema) -> Result<(), SchemaError> {
    if schema.has_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for field in schema.fields() {
            if !seen.insert(field.wire_name.as_str()) {
                return Err(SchemaError::DuplicateWireName {
                    model: schema.name.clone(),
                    field: field.wire_name.clone(),
                });
            }
        }
    }
    for field in schema.fields() {
        validate_field(schema, field)?;
    }
    for pattern in schema.patterns() {
        validate_kind(pattern.pattern.as_str(), &pattern.kind)?;
    }
    if let Some(kind) = schema.additional_kind() {
        validate_kind("additionalProperties", kind)?;
    }
    Ok(())
}

fn validate_field(schema: &ModelSchema, field: &FieldSchema) -> Result<(), SchemaError> {
    if field.wire_name.is_empty() {
        return Err(SchemaError::EmptyWireName(schema.name.clone()));
    }
    if !field.required && matches!(field.kind, FieldKind::Con(_)) {
        return Err(SchemaError::OptionalConst(field.wire_name.clone()));
    }
    validate_kind(&field.wire_name, &field.kind)
}

fn validate_kind(name: &str, kind: &FieldKind) -> Result<(), SchemaError> {
    match kind {
        FieldKind::Any
        | FieldKind::Bool
        | FieldKind::Num
        | FieldKind::Str
        | FieldKind::Con(_) => Ok(()),
        FieldKind::Arr(item) => validate_kind(name, item),
        FieldKind::Tuple(kinds) => {
            for kind in kinds {
                validate_kind(name, kind)?;
            }
            Ok(())
        }
        FieldKind::Or(kinds) => {
            if kinds.is_empty() {
                return Err(SchemaError::EmptyUnion(name.to_string()));
            }
            for kind in kinds {
                validate_kind(name, kind)?;
            }
            Ok(())
        }
        FieldKind::Obj(nested) => validate_schema(nested),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_schema() {
        let nested = ModelSchema::new("Nested").opt("test", FieldKind::Str).build();
        let schema = ModelSchema::new("Model")
            .prop("a", FieldKind::Str)
            .opt("b", FieldKind::obj(&nested))
            .prop("c", FieldKind::Con(json!(1)))
            .additional_properties(FieldKind::Any);
        assert_eq!(validate_schema(&schema), Ok(()));
    }

    #[test]
    fn rejects_duplicate_wire_name() {
        let schema = ModelSchema::new("Model")
            .prop("a", FieldKind::Str)
            .opt("a", FieldKind::Num);
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::DuplicateWireName {
                model: "Model".into(),
                field: "a".into()
            })
        );
    }

    #[test]
    fn rejects_empty_wire_name() {
        let schema = ModelSchema::new("Model").prop("", FieldKind::Str);
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::EmptyWireName("Model".into()))
        );
    }

    #[test]
    fn rejects_empty_union_in_nested_schema() {
        let nested = ModelSchema::new("Nested")
            .prop("u", FieldKind::Or(vec![]))
            .build();
        let schema = ModelSchema::new("Model").opt("n", FieldKind::obj(&nested));
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::EmptyUnion("u".into()))
        );
    }

    #[test]
    fn rejects_optional_const() {
        let schema = ModelSchema::new("Model").opt("kind", FieldKind::Con(json!("x")));
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::OptionalConst("kind".into()))
        );
    }
}
