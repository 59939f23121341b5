//! Typed model contract.

pub mod field_value;

use std::sync::Arc;

pub use field_value::{number_value, FieldValue};

use crate::error::Result;
use crate::schema::ModelSchema;
use crate::value::Record;

/// A generated model type backed by static schema metadata.
pub trait OpenModel: Sized {
    /// The schema shared by every instance of the type.
    fn schema() -> Arc<ModelSchema>;

    fn to_record(&self) -> Result<Record>;

    fn from_record(record: Record) -> Result<Self>;
}

/// Implements `serde::Serialize` and `serde::Deserialize` for models by
/// delegating to the codec, so models embedded in other serde types keep the
/// same wire format.
#[macro_export]
macro_rules! impl_serde_for_model {
    ($($model:ty),+ $(,)?) => {$(
        impl $crate::serde::Serialize for $model {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                let record = $crate::OpenModel::to_record(self)
                    .map_err(<S::Error as $crate::serde::ser::Error>::custom)?;
                $crate::serde::Serialize::serialize(&record.into_value(), serializer)
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $model {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                let value = <$crate::serde_json::Value as $crate::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                $crate::codec::decode_value(value, &$crate::codec::DecodeOptions::default())
                    .map_err(<D::Error as $crate::serde::de::Error>::custom)
            }
        }
    )+};
}
