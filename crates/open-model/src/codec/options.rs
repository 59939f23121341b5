//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Policy for required fields missing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredFields {
    /// Fail with `MissingRequiredField`.
    #[default]
    Strict,
    /// Fill in the zero value of the declared kind.
    Lenient,
}

/// Policy for undeclared keys on models without a catch-all bucket.
///
/// Models with a bucket always capture undeclared keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    #[default]
    Ignore,
    Reject,
}

/// Options for the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub required: RequiredFields,
    pub unknown_fields: UnknownFields,
}

impl DecodeOptions {
    pub fn lenient() -> Self {
        Self {
            required: RequiredFields::Lenient,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_strict_and_ignore() {
        let opts = DecodeOptions::default();
        assert_eq!(opts.required, RequiredFields::Strict);
        assert_eq!(opts.unknown_fields, UnknownFields::Ignore);
    }

    #[test]
    fn loads_from_partial_config() {
        let opts: DecodeOptions = serde_json::from_str(r#"{"required":"lenient"}"#).unwrap();
        assert_eq!(opts, DecodeOptions::lenient());

        let opts: DecodeOptions = serde_json::from_str(r#"{"unknown_fields":"reject"}"#).unwrap();
        assert_eq!(opts.required, RequiredFields::Strict);
        assert_eq!(opts.unknown_fields, UnknownFields::Reject);
    }
}
