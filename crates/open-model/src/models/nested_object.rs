use std::sync::{Arc, LazyLock};

use crate::error::Result;
use crate::model::OpenModel;
use crate::schema::{FieldKind, ModelSchema};
use crate::value::Record;

static SCHEMA: LazyLock<Arc<ModelSchema>> =
    LazyLock::new(|| ModelSchema::new("NestedObject").opt("test", FieldKind::Str).build());

/// NestedObject represents a NestedObject model. It has no catch-all bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedObject {
    pub test: Option<String>,
}

impl NestedObject {
    pub fn with_test(test: impl Into<String>) -> Self {
        Self {
            test: Some(test.into()),
        }
    }
}

impl OpenModel for NestedObject {
    fn schema() -> Arc<ModelSchema> {
        Arc::clone(&SCHEMA)
    }

    fn to_record(&self) -> Result<Record> {
        let mut record = Record::new(Self::schema());
        record.put_opt("test", self.test.as_ref())?;
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            test: record.take_opt("test")?,
        })
    }
}

crate::impl_serde_for_model!(NestedObject);
