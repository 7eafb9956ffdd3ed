//! Block schemas and field contracts
//!
//! A [`BlockSchema`] describes the payload one block type accepts: which
//! fields are required, the contract each field must satisfy, and the
//! default used when an optional field is missing or unusable. Nested
//! objects carry an [`ObjectContract`] of their own, so the same rules apply
//! at every depth.
//!
//! Schemas are plain data. They can be built in code with the builder
//! methods below or deserialized from a JSON catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::value::FieldValue;
use crate::runtime::normalizer;

/// Field kinds, used in diagnostics and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    String,
    Enum,
    Number,
    Bool,
    Array,
    Object,
    Reference,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Enum => "enum",
            FieldKind::Number => "number",
            FieldKind::Bool => "bool",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Reference => "reference",
        };
        f.write_str(name)
    }
}

/// Contract a single field must satisfy after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldContract {
    /// Free text, truncated to `max_length` characters
    String {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// One of a fixed set of strings; anything else becomes `fallback`
    Enum {
        allowed: Vec<String>,
        fallback: String,
    },
    /// Numeric value, clamped into `[min, max]`
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Boolean flag
    Bool,
    /// Homogeneous list; invalid elements are dropped
    Array {
        items: Box<FieldContract>,
        #[serde(rename = "maxItems", default, skip_serializing_if = "Option::is_none")]
        max_items: Option<usize>,
    },
    /// Nested object with its own required fields and defaults
    Object(ObjectContract),
    /// Reference to an asset or document in the content store
    Reference,
}

impl FieldContract {
    /// String contract with a maximum length
    pub fn string(max_length: usize) -> Self {
        FieldContract::String {
            max_length: Some(max_length),
        }
    }

    /// String contract without a length bound
    pub fn unbounded_string() -> Self {
        FieldContract::String { max_length: None }
    }

    /// Enum contract over `allowed`, coercing unknown values to `fallback`
    pub fn enumeration(allowed: &[&str], fallback: &str) -> Self {
        FieldContract::Enum {
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
            fallback: fallback.to_string(),
        }
    }

    /// Number contract clamped into `[min, max]`
    pub fn number_in(min: f64, max: f64) -> Self {
        FieldContract::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Unbounded number contract
    pub fn number() -> Self {
        FieldContract::Number {
            min: None,
            max: None,
        }
    }

    /// Boolean contract
    pub fn boolean() -> Self {
        FieldContract::Bool
    }

    /// Array contract whose elements follow `items`
    pub fn array_of(items: FieldContract) -> Self {
        FieldContract::Array {
            items: Box::new(items),
            max_items: None,
        }
    }

    /// Array contract truncated to at most `max_items` elements
    pub fn bounded_array_of(items: FieldContract, max_items: usize) -> Self {
        FieldContract::Array {
            items: Box::new(items),
            max_items: Some(max_items),
        }
    }

    /// Nested object contract
    pub fn object(contract: ObjectContract) -> Self {
        FieldContract::Object(contract)
    }

    /// Reference contract
    pub fn reference() -> Self {
        FieldContract::Reference
    }

    /// Get the field kind
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldContract::String { .. } => FieldKind::String,
            FieldContract::Enum { .. } => FieldKind::Enum,
            FieldContract::Number { .. } => FieldKind::Number,
            FieldContract::Bool => FieldKind::Bool,
            FieldContract::Array { .. } => FieldKind::Array,
            FieldContract::Object(_) => FieldKind::Object,
            FieldContract::Reference => FieldKind::Reference,
        }
    }

    /// Value used for an optional field that has no explicit default
    pub fn implicit_default(&self) -> FieldValue {
        match self {
            FieldContract::String { .. } => FieldValue::String(String::new()),
            FieldContract::Enum { fallback, .. } => FieldValue::String(fallback.clone()),
            FieldContract::Number { min, max } => {
                let zero = 0.0_f64;
                let clamped = zero.max(min.unwrap_or(zero)).min(max.unwrap_or(f64::MAX));
                if clamped.fract() == 0.0 {
                    FieldValue::Integer(clamped as i64)
                } else {
                    FieldValue::Number(clamped)
                }
            }
            FieldContract::Bool => FieldValue::Boolean(false),
            FieldContract::Array { .. } => FieldValue::Array(Vec::new()),
            FieldContract::Object(nested) => normalizer::normalize_fields(&serde_json::Map::new(), nested)
                .map(FieldValue::Object)
                .unwrap_or(FieldValue::Null),
            FieldContract::Reference => FieldValue::Null,
        }
    }

    /// Check that the contract itself is well formed
    fn validate(&self, path: &str) -> Result<(), String> {
        match self {
            FieldContract::Enum { allowed, fallback } => {
                if allowed.is_empty() {
                    return Err(format!("enum field '{}' has no allowed values", path));
                }
                if !allowed.contains(fallback) {
                    return Err(format!(
                        "enum field '{}' falls back to '{}', which is not an allowed value",
                        path, fallback
                    ));
                }
                Ok(())
            }
            FieldContract::Number {
                min: Some(min),
                max: Some(max),
            } if min > max => Err(format!("number field '{}' has min {} > max {}", path, min, max)),
            FieldContract::Array { items, .. } => items.validate(&format!("{}[]", path)),
            FieldContract::Object(nested) => nested.validate_at(path),
            _ => Ok(()),
        }
    }
}

/// Required fields, contracts and defaults for an object-shaped payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectContract {
    /// Fields that must be present for the object to be usable
    pub required_fields: BTreeSet<String>,
    /// Contract per known field
    pub field_contracts: BTreeMap<String, FieldContract>,
    /// Explicit defaults for optional fields
    pub defaults: BTreeMap<String, FieldValue>,
}

impl ObjectContract {
    /// Create a new empty contract
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field
    pub fn required(mut self, name: &str, contract: FieldContract) -> Self {
        self.required_fields.insert(name.to_string());
        self.field_contracts.insert(name.to_string(), contract);
        self
    }

    /// Add an optional field that falls back to its kind's neutral value
    pub fn optional(mut self, name: &str, contract: FieldContract) -> Self {
        self.field_contracts.insert(name.to_string(), contract);
        self
    }

    /// Add an optional field with an explicit default
    pub fn optional_or(mut self, name: &str, contract: FieldContract, default: impl Into<FieldValue>) -> Self {
        self.field_contracts.insert(name.to_string(), contract);
        self.defaults.insert(name.to_string(), default.into());
        self
    }

    /// Check if a field is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required_fields.contains(name)
    }

    /// Default for an optional field: the explicit default if one was
    /// declared, otherwise the contract's neutral value
    pub fn default_for(&self, name: &str, contract: &FieldContract) -> FieldValue {
        self.defaults
            .get(name)
            .cloned()
            .unwrap_or_else(|| contract.implicit_default())
    }

    /// Validate the contract
    ///
    /// # Returns
    /// * `Ok(())` if the contract is usable
    /// * `Err(String)` describing the first problem found
    pub fn validate(&self) -> Result<(), String> {
        self.validate_at("")
    }

    fn validate_at(&self, prefix: &str) -> Result<(), String> {
        let path = |name: &str| {
            if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", prefix, name)
            }
        };

        for name in &self.required_fields {
            if !self.field_contracts.contains_key(name) {
                return Err(format!("required field '{}' has no contract", path(name)));
            }
        }

        for (name, contract) in &self.field_contracts {
            contract.validate(&path(name))?;
        }

        for (name, default) in &self.defaults {
            let contract = self
                .field_contracts
                .get(name)
                .ok_or_else(|| format!("default given for unknown field '{}'", path(name)))?;
            if self.is_required(name) {
                return Err(format!("required field '{}' cannot have a default", path(name)));
            }
            // Defaults are inserted as-is, so they must already be in normal form.
            let satisfied = if default.is_null() {
                matches!(contract, FieldContract::Reference | FieldContract::Object(_))
            } else {
                normalizer::coerce(contract, &default.to_json()).as_ref() == Ok(default)
            };
            if !satisfied {
                return Err(format!(
                    "default for '{}' does not satisfy its {} contract",
                    path(name),
                    contract.kind()
                ));
            }
        }

        Ok(())
    }
}

/// Schema for one block type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSchema {
    /// Human-readable description of the block type
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Payload contract
    #[serde(flatten)]
    pub contract: ObjectContract,
}

impl BlockSchema {
    /// Create a new empty schema
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            contract: ObjectContract::new(),
        }
    }

    /// Add a required field
    pub fn required(mut self, name: &str, contract: FieldContract) -> Self {
        self.contract = self.contract.required(name, contract);
        self
    }

    /// Add an optional field that falls back to its kind's neutral value
    pub fn optional(mut self, name: &str, contract: FieldContract) -> Self {
        self.contract = self.contract.optional(name, contract);
        self
    }

    /// Add an optional field with an explicit default
    pub fn optional_or(mut self, name: &str, contract: FieldContract, default: impl Into<FieldValue>) -> Self {
        self.contract = self.contract.optional_or(name, contract, default);
        self
    }

    pub fn required_fields(&self) -> &BTreeSet<String> {
        &self.contract.required_fields
    }

    pub fn field_contracts(&self) -> &BTreeMap<String, FieldContract> {
        &self.contract.field_contracts
    }

    pub fn defaults(&self) -> &BTreeMap<String, FieldValue> {
        &self.contract.defaults
    }

    /// Validate the schema before registration
    pub fn validate(&self) -> Result<(), String> {
        self.contract.validate()
    }
}
