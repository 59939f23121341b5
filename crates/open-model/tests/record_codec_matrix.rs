//! Schema-driven records: bucket routing, closed models, const/tuple/union
//! kinds and schema validation, exercised through the public API.

use std::sync::Arc;

use open_model::codec::{decode_record, encode_record};
use open_model::{
    validate_schema, CodecError, DecodeOptions, FieldKind, ModelSchema, Record, SchemaError,
    UnknownFields,
};
use regex::Regex;
use serde_json::json;

fn event_schema() -> Arc<ModelSchema> {
    let payload = ModelSchema::new("Payload")
        .prop("id", FieldKind::Num)
        .opt("tags", FieldKind::arr(FieldKind::Str))
        .additional_properties(FieldKind::Any)
        .build();
    ModelSchema::new("Event")
        .prop("type", FieldKind::Con(json!("event")))
        .prop("name", FieldKind::Str)
        .opt("payload", FieldKind::obj(&payload))
        .opt("point", FieldKind::Tuple(vec![FieldKind::Num, FieldKind::Num]))
        .opt(
            "members",
            FieldKind::Or(vec![FieldKind::Str, FieldKind::Num, FieldKind::Bool]),
        )
        .pattern_properties(Regex::new("^x-").unwrap(), FieldKind::Str)
        .additional_properties(FieldKind::Any)
        .build()
}

fn round_trip(input: &str) -> String {
    let schema = event_schema();
    let record = decode_record(&schema, input.as_bytes(), &DecodeOptions::default()).unwrap();
    encode_record(&record).unwrap()
}

// ---------------------------------------------------------------------------
// Encode order and omission
// ---------------------------------------------------------------------------

#[test]
fn build_order_does_not_affect_output() {
    let mut a = Record::new(event_schema());
    a.set("members", json!(3)).unwrap();
    a.insert_additional("zz", json!(1)).unwrap();
    a.set("name", json!("n")).unwrap();
    a.insert_additional("x-b", json!("b")).unwrap();

    let mut b = Record::new(event_schema());
    b.insert_additional("x-b", json!("b")).unwrap();
    b.set("name", json!("n")).unwrap();
    b.insert_additional("zz", json!(1)).unwrap();
    b.set("members", json!(3)).unwrap();

    let expected = r#"{"type":"event","name":"n","members":3,"x-b":"b","zz":1}"#;
    assert_eq!(encode_record(&a).unwrap(), expected);
    assert_eq!(encode_record(&b).unwrap(), expected);
}

#[test]
fn unset_field_disappears_from_output() {
    let mut record = Record::new(event_schema());
    record.set("name", json!("n")).unwrap();
    record.set("point", json!([1, 2])).unwrap();
    assert_eq!(
        encode_record(&record).unwrap(),
        r#"{"type":"event","name":"n","point":[1,2]}"#
    );
    record.unset("point");
    assert_eq!(encode_record(&record).unwrap(), r#"{"type":"event","name":"n"}"#);
}

// ---------------------------------------------------------------------------
// Decode routing
// ---------------------------------------------------------------------------

#[test]
fn pattern_and_catch_all_round_trip() {
    let input = r#"{"type":"event","name":"n","x-trace":"t","other":[1,{"a":null}],"x-span":"s"}"#;
    assert_eq!(
        round_trip(input),
        r#"{"type":"event","name":"n","x-trace":"t","x-span":"s","other":[1,{"a":null}]}"#
    );
}

#[test]
fn nested_catch_all_round_trips() {
    let input = r#"{"type":"event","name":"n","payload":{"extra":{"deep":[1,2]},"id":5,"tags":["a"]}}"#;
    assert_eq!(
        round_trip(input),
        r#"{"type":"event","name":"n","payload":{"id":5,"tags":["a"],"extra":{"deep":[1,2]}}}"#
    );
}

#[test]
fn nested_buckets_encode_in_decode_order() {
    let inner = ModelSchema::new("Inner")
        .pattern_properties(Regex::new("^x-").unwrap(), FieldKind::Str)
        .additional_properties(FieldKind::Any)
        .build();
    let schema = ModelSchema::new("Outer")
        .opt("inner", FieldKind::obj(&inner))
        .build();
    let mut record = Record::new(Arc::clone(&schema));
    record.set("inner", json!({"other": 1, "x-a": "s"})).unwrap();

    let first = encode_record(&record).unwrap();
    assert_eq!(first, r#"{"inner":{"x-a":"s","other":1}}"#);
    let decoded = decode_record(&schema, first.as_bytes(), &DecodeOptions::default()).unwrap();
    assert_eq!(encode_record(&decoded).unwrap(), first);
}

#[test]
fn round_trip_is_idempotent() {
    let input = r#"{"x-a":"1","members":true,"point":[1.5,-2,"extra"],"name":"n","payload":{"id":1},"k":{}}"#;
    let once = round_trip(input);
    assert_eq!(round_trip(&once), once);
}

#[test]
fn typed_array_element_mismatch() {
    let schema = event_schema();
    let err = decode_record(
        &schema,
        br#"{"name":"n","payload":{"id":1,"tags":["a",2]}}"#,
        &DecodeOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.field(), Some("payload.tags[1]"));
}

#[test]
fn closed_model_policies() {
    let schema = ModelSchema::new("Closed")
        .prop("a", FieldKind::Num)
        .build();

    let record = decode_record(&schema, br#"{"a":1,"b":2}"#, &DecodeOptions::default()).unwrap();
    assert_eq!(encode_record(&record).unwrap(), r#"{"a":1}"#);

    let options = DecodeOptions {
        unknown_fields: UnknownFields::Reject,
        ..Default::default()
    };
    assert!(matches!(
        decode_record(&schema, br#"{"a":1,"b":2}"#, &options),
        Err(CodecError::UnknownField(k)) if k == "b"
    ));
}

#[test]
fn open_model_ignores_reject_policy() {
    let options = DecodeOptions {
        unknown_fields: UnknownFields::Reject,
        ..Default::default()
    };
    let record = decode_record(&event_schema(), br#"{"name":"n","free":1}"#, &options).unwrap();
    assert_eq!(record.additional().get("free"), Some(&json!(1)));
}

#[test]
fn lenient_decode_fills_every_required_kind() {
    let inner = ModelSchema::new("Inner").prop("flag", FieldKind::Bool).build();
    let schema = ModelSchema::new("AllKinds")
        .prop("s", FieldKind::Str)
        .prop("n", FieldKind::Num)
        .prop("b", FieldKind::Bool)
        .prop("a", FieldKind::any_arr())
        .prop("t", FieldKind::Tuple(vec![FieldKind::Str, FieldKind::Num]))
        .prop("o", FieldKind::obj(&inner))
        .prop("u", FieldKind::Or(vec![FieldKind::Num, FieldKind::Str]))
        .prop("c", FieldKind::Con(json!("fixed")))
        .prop("any", FieldKind::Any)
        .build();
    let record = decode_record(&schema, b"{}", &DecodeOptions::lenient()).unwrap();
    assert_eq!(
        encode_record(&record).unwrap(),
        r#"{"s":"","n":0,"b":false,"a":[],"t":["",0],"o":{"flag":false},"u":0,"c":"fixed","any":null}"#
    );
}

// ---------------------------------------------------------------------------
// Construction-time checks
// ---------------------------------------------------------------------------

#[test]
fn set_checks_kind_and_name() {
    let mut record = Record::new(event_schema());
    assert!(matches!(
        record.set("name", json!(1)),
        Err(CodecError::TypeMismatch(m)) if m.field == "name"
    ));
    assert!(matches!(
        record.set("type", json!("other")),
        Err(CodecError::TypeMismatch(m)) if m.field == "type"
    ));
    assert!(matches!(
        record.set("nope", json!(1)),
        Err(CodecError::UnknownField(k)) if k == "nope"
    ));
}

#[test]
fn insert_additional_rejects_declared_names() {
    let mut record = Record::new(event_schema());
    assert!(matches!(
        record.insert_additional("payload", json!({})),
        Err(CodecError::CatchAllCollision(k)) if k == "payload"
    ));
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

#[test]
fn event_schema_is_valid() {
    assert_eq!(validate_schema(&event_schema()), Ok(()));
}

#[test]
fn duplicate_in_nested_schema_is_reported() {
    let nested = ModelSchema::new("Nested")
        .prop("id", FieldKind::Num)
        .prop("id", FieldKind::Str)
        .build();
    let schema = ModelSchema::new("Outer").opt("nested", FieldKind::obj(&nested));
    assert_eq!(
        validate_schema(&schema),
        Err(SchemaError::DuplicateWireName {
            model: "Nested".into(),
            field: "id".into()
        })
    );
}
