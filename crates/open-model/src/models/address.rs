use std::sync::{Arc, LazyLock};

use serde_json::Value;

use super::NestedObject;
use crate::error::Result;
use crate::model::OpenModel;
use crate::schema::{FieldKind, ModelSchema};
use crate::value::{AdditionalProperties, Record};

static SCHEMA: LazyLock<Arc<ModelSchema>> = LazyLock::new(|| {
    ModelSchema::new("Address")
        .prop("street_name", FieldKind::Str)
        .prop("house_number", FieldKind::Num)
        .opt("marriage", FieldKind::Bool)
        .opt("members", FieldKind::Num)
        .prop("array_type", FieldKind::any_arr())
        .opt("nestedObject", FieldKind::Obj(NestedObject::schema()))
        .additional_properties(FieldKind::Any)
        .build()
});

/// Address represents an Address model.
///
/// Field declaration order here is irrelevant to the wire format; the schema
/// fixes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub street_name: String,
    pub house_number: f64,
    pub array_type: Vec<Value>,
    pub marriage: Option<bool>,
    pub members: Option<f64>,
    pub nested_object: Option<Box<NestedObject>>,
    pub additional_properties: AdditionalProperties,
}

impl Address {
    /// An address with only the required fields set.
    pub fn new(
        street_name: impl Into<String>,
        house_number: f64,
        array_type: Vec<Value>,
    ) -> Self {
        Self {
            street_name: street_name.into(),
            house_number,
            array_type,
            ..Self::default()
        }
    }
}

impl OpenModel for Address {
    fn schema() -> Arc<ModelSchema> {
        Arc::clone(&SCHEMA)
    }

    fn to_record(&self) -> Result<Record> {
        let mut record = Record::new(Self::schema());
        record.put("street_name", &self.street_name)?;
        record.put("house_number", &self.house_number)?;
        record.put_opt("marriage", self.marriage.as_ref())?;
        record.put_opt("members", self.members.as_ref())?;
        record.put("array_type", &self.array_type)?;
        record.put_opt("nestedObject", self.nested_object.as_ref())?;
        record.extend_additional(self.additional_properties.clone())?;
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            street_name: record.take_required("street_name")?,
            house_number: record.take_required("house_number")?,
            array_type: record.take_required("array_type")?,
            marriage: record.take_opt("marriage")?,
            members: record.take_opt("members")?,
            nested_object: record.take_opt("nestedObject")?,
            additional_properties: record.take_additional(),
        })
    }
}

crate::impl_serde_for_model!(Address);
