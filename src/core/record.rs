//! Raw, normalized and rendered block records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

use super::value::FieldValue;
use crate::runtime::config::EngineConfig;

/// An untrusted block record as delivered by the content store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    /// Type discriminator selecting the schema and renderer
    pub type_tag: String,
    /// Stable per-block identifier used for list reconciliation
    pub identity_key: String,
    /// Type-specific fields, unvalidated
    pub payload: Map<String, JsonValue>,
}

impl BlockRecord {
    /// Create a new record
    pub fn new(type_tag: impl Into<String>, identity_key: impl Into<String>, payload: Map<String, JsonValue>) -> Self {
        Self {
            type_tag: type_tag.into(),
            identity_key: identity_key.into(),
            payload,
        }
    }

    /// Build a record from a store document
    ///
    /// The type tag and identity key are read from the fields named in
    /// `config` and removed from the payload. Missing or non-string tags and
    /// keys become empty strings so the guard can reject them; entries that
    /// are not objects at all produce an empty record.
    pub fn from_json(value: &JsonValue, config: &EngineConfig) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let mut payload = object.clone();
        let mut take_string = |field: &str| match payload.remove(field) {
            Some(JsonValue::String(s)) => s,
            _ => String::new(),
        };
        let type_tag = take_string(&config.type_field);
        let identity_key = take_string(&config.key_field);

        Self {
            type_tag,
            identity_key,
            payload,
        }
    }
}

/// A block whose payload satisfies its schema
///
/// Every required field is present, every optional field is present or
/// defaulted, enums are members of their allowed sets and strings respect
/// their length bounds. Renderers only ever see this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBlock {
    pub type_tag: String,
    pub identity_key: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl NormalizedBlock {
    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// String field, or `""` when absent
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_str).unwrap_or("")
    }

    /// Array field, or an empty slice when absent
    pub fn items(&self, name: &str) -> &[FieldValue] {
        self.get(name).and_then(FieldValue::as_array).unwrap_or(&[])
    }

    /// Integer field, or `default` when absent
    pub fn integer_or(&self, name: &str, default: i64) -> i64 {
        self.get(name).and_then(FieldValue::as_integer).unwrap_or(default)
    }

    /// Boolean field, or `false` when absent
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(FieldValue::as_bool).unwrap_or(false)
    }
}

/// Presentation output for one block, keyed by its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub identity_key: String,
    pub type_tag: String,
    pub markup: String,
}
