//! Payload normalizer
//!
//! Turns an untrusted payload into a [`NormalizedBlock`] by walking the
//! schema's field contracts:
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | required field absent (or `null`) | block rejected, `MissingRequiredField` |
//! | required field of the wrong kind | block rejected, `TypeMismatch` |
//! | optional field absent or of the wrong kind | schema default |
//! | string longer than its bound | truncated |
//! | enum value outside its set | contract fallback |
//! | number outside its range | clamped |
//! | invalid array element | element dropped |
//! | field without a contract | ignored |
//!
//! Nested objects follow the same table recursively. The output is a
//! `BTreeMap`, so normalizing the same input always produces the same value
//! and the same serialized bytes.

use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

use crate::core::{
    BlockRecord, BlockSchema, Diagnostic, DiagnosticReason, FieldContract, FieldValue, NormalizedBlock,
    ObjectContract,
};

/// A contract violation, located by a dotted path relative to the object
/// being normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFault {
    pub reason: DiagnosticReason,
    pub path: String,
}

impl FieldFault {
    fn missing(name: &str) -> Self {
        Self {
            reason: DiagnosticReason::MissingRequiredField,
            path: name.to_string(),
        }
    }

    fn mismatch() -> Self {
        Self {
            reason: DiagnosticReason::TypeMismatch,
            path: String::new(),
        }
    }

    fn within(mut self, name: &str) -> Self {
        self.path = if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", name, self.path)
        };
        self
    }
}

/// Normalize a record against its schema
///
/// # Returns
/// * `Ok(NormalizedBlock)` with every contracted field populated
/// * `Err(Diagnostic)` when a required field is missing or unusable
pub fn normalize(record: &BlockRecord, schema: &BlockSchema) -> Result<NormalizedBlock, Diagnostic> {
    let fields = normalize_fields(&record.payload, &schema.contract)
        .map_err(|fault| Diagnostic::field(&record.identity_key, &record.type_tag, fault.reason, fault.path))?;

    Ok(NormalizedBlock {
        type_tag: record.type_tag.clone(),
        identity_key: record.identity_key.clone(),
        fields,
    })
}

/// Normalize an object payload against an object contract
pub fn normalize_fields(
    payload: &Map<String, JsonValue>,
    contract: &ObjectContract,
) -> Result<BTreeMap<String, FieldValue>, FieldFault> {
    let mut fields = BTreeMap::new();

    for (name, field_contract) in &contract.field_contracts {
        let required = contract.is_required(name);
        let raw = payload.get(name).filter(|value| !value.is_null());

        let value = match raw {
            None if required => return Err(FieldFault::missing(name)),
            None => contract.default_for(name, field_contract),
            Some(raw) => match coerce(field_contract, raw) {
                Ok(value) => value,
                Err(fault) if required => return Err(fault.within(name)),
                Err(fault) => {
                    tracing::trace!(
                        field = %name,
                        kind = %field_contract.kind(),
                        reason = %fault.reason,
                        "optional field replaced by default"
                    );
                    contract.default_for(name, field_contract)
                }
            },
        };

        fields.insert(name.clone(), value);
    }

    Ok(fields)
}

/// Apply a single field contract to a raw value
pub fn coerce(contract: &FieldContract, raw: &JsonValue) -> Result<FieldValue, FieldFault> {
    match contract {
        FieldContract::String { max_length } => {
            let s = raw.as_str().ok_or_else(FieldFault::mismatch)?;
            Ok(FieldValue::String(truncate(s, *max_length)))
        }

        FieldContract::Enum { allowed, fallback } => match raw.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => Ok(FieldValue::String(s.to_string())),
            _ => {
                tracing::trace!(value = %raw, fallback = %fallback, "enum value replaced by fallback");
                Ok(FieldValue::String(fallback.clone()))
            }
        },

        FieldContract::Number { min, max } => {
            let n = raw.as_f64().ok_or_else(FieldFault::mismatch)?;
            let clamped = clamp(n, *min, *max);
            Ok(match raw.as_i64() {
                Some(i) if clamped == n => FieldValue::Integer(i),
                Some(_) if clamped.fract() == 0.0 => FieldValue::Integer(clamped as i64),
                _ => FieldValue::Number(clamped),
            })
        }

        FieldContract::Bool => raw.as_bool().map(FieldValue::Boolean).ok_or_else(FieldFault::mismatch),

        FieldContract::Array { items, max_items } => {
            let elements = raw.as_array().ok_or_else(FieldFault::mismatch)?;
            let mut out = Vec::with_capacity(elements.len());

            for (index, element) in elements.iter().enumerate() {
                match coerce(items, element) {
                    Ok(value) => out.push(value),
                    Err(fault) => {
                        tracing::trace!(index, reason = %fault.reason, "invalid array element dropped");
                    }
                }
            }

            if let Some(max_items) = max_items {
                out.truncate(*max_items);
            }
            Ok(FieldValue::Array(out))
        }

        FieldContract::Object(nested) => {
            let object = raw.as_object().ok_or_else(FieldFault::mismatch)?;
            normalize_fields(object, nested).map(FieldValue::Object)
        }

        FieldContract::Reference => {
            let id = match raw {
                JsonValue::String(s) => Some(s.as_str()),
                JsonValue::Object(object) => object.get("_ref").and_then(JsonValue::as_str),
                _ => None,
            };
            id.filter(|id| !id.trim().is_empty())
                .map(|id| FieldValue::String(id.to_string()))
                .ok_or_else(FieldFault::mismatch)
        }
    }
}

/// Truncate to at most `max_length` characters, never splitting a character
fn truncate(s: &str, max_length: Option<usize>) -> String {
    match max_length.and_then(|max| s.char_indices().nth(max)) {
        Some((byte_index, _)) => {
            tracing::trace!(max_length, "string truncated");
            s[..byte_index].to_string()
        }
        None => s.to_string(),
    }
}

fn clamp(n: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let n = min.map_or(n, |min| n.max(min));
    max.map_or(n, |max| n.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(type_tag: &str, key: &str, payload: JsonValue) -> BlockRecord {
        let payload = payload.as_object().cloned().unwrap_or_default();
        BlockRecord::new(type_tag, key, payload)
    }

    fn hero() -> BlockSchema {
        BlockSchema::new("Hero")
            .required("title", FieldContract::string(100))
            .optional_or("subtitle", FieldContract::string(300), "")
            .optional("alignment", FieldContract::enumeration(&["left", "center", "right"], "center"))
            .optional_or("columns", FieldContract::number_in(1.0, 4.0), 3i64)
            .optional("showArrow", FieldContract::boolean())
            .optional("background", FieldContract::reference())
    }

    #[test]
    fn test_truncates_and_fills_defaults() {
        let block = normalize(&record("hero", "h1", json!({"title": "X".repeat(150)})), &hero()).unwrap();

        assert_eq!(block.type_tag, "hero");
        assert_eq!(block.identity_key, "h1");
        assert_eq!(block.text("title"), "X".repeat(100));
        assert_eq!(block.text("subtitle"), "");
        assert_eq!(block.text("alignment"), "center");
        assert_eq!(block.get("columns"), Some(&FieldValue::Integer(3)));
        assert_eq!(block.get("showArrow"), Some(&FieldValue::Boolean(false)));
        assert_eq!(block.get("background"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_missing_required_field_rejects_block() {
        let diag = normalize(&record("hero", "h2", json!({"subtitle": "only subtitle"})), &hero()).unwrap_err();
        assert_eq!(diag, Diagnostic::field("h2", "hero", DiagnosticReason::MissingRequiredField, "title"));
    }

    #[test]
    fn test_null_required_field_counts_as_missing() {
        let diag = normalize(&record("hero", "h3", json!({"title": null})), &hero()).unwrap_err();
        assert_eq!(diag.reason, DiagnosticReason::MissingRequiredField);
    }

    #[test]
    fn test_required_type_mismatch_rejects_block() {
        let diag = normalize(&record("hero", "h4", json!({"title": 42})), &hero()).unwrap_err();
        assert_eq!(diag, Diagnostic::field("h4", "hero", DiagnosticReason::TypeMismatch, "title"));
    }

    #[test]
    fn test_optional_type_mismatch_falls_back_silently() {
        let block = normalize(
            &record("hero", "h5", json!({"title": "T", "subtitle": ["not", "text"], "columns": "wide", "showArrow": "yes"})),
            &hero(),
        )
        .unwrap();
        assert_eq!(block.text("subtitle"), "");
        assert_eq!(block.get("columns"), Some(&FieldValue::Integer(3)));
        assert!(!block.flag("showArrow"));
    }

    #[test]
    fn test_enum_outside_set_uses_fallback() {
        for bad in [json!("diagonal"), json!(7), json!({"x": 1})] {
            let block = normalize(&record("hero", "h6", json!({"title": "T", "alignment": bad})), &hero()).unwrap();
            assert_eq!(block.text("alignment"), "center");
        }
        let block = normalize(&record("hero", "h6", json!({"title": "T", "alignment": "left"})), &hero()).unwrap();
        assert_eq!(block.text("alignment"), "left");
    }

    #[test]
    fn test_numbers_are_clamped() {
        let schema = hero();
        let cases = [
            (json!(9), FieldValue::Integer(4)),
            (json!(-2), FieldValue::Integer(1)),
            (json!(2), FieldValue::Integer(2)),
            (json!(2.5), FieldValue::Number(2.5)),
            (json!(10.5), FieldValue::Number(4.0)),
        ];
        for (raw, expected) in cases {
            let block = normalize(&record("hero", "n", json!({"title": "T", "columns": raw})), &schema).unwrap();
            assert_eq!(block.get("columns"), Some(&expected));
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let block = normalize(
            &record("hero", "h7", json!({"title": "T", "sparkles": true, "_createdAt": "2024"})),
            &hero(),
        )
        .unwrap();
        assert!(block.get("sparkles").is_none());
        assert_eq!(block.fields.len(), hero().field_contracts().len());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let schema = BlockSchema::new("t").required("title", FieldContract::string(3));
        let block = normalize(&record("t", "k", json!({"title": "héllo wörld"})), &schema).unwrap();
        assert_eq!(block.text("title"), "hél");

        let block = normalize(&record("t", "k", json!({"title": "日本語テキスト"})), &schema).unwrap();
        assert_eq!(block.text("title"), "日本語");
    }

    #[test]
    fn test_references_accept_ids_and_ref_objects() {
        let schema = hero();
        let by_id = normalize(&record("hero", "r", json!({"title": "T", "background": "image-abc"})), &schema).unwrap();
        assert_eq!(by_id.text("background"), "image-abc");

        let by_ref = normalize(
            &record("hero", "r", json!({"title": "T", "background": {"_type": "reference", "_ref": "image-def"}})),
            &schema,
        )
        .unwrap();
        assert_eq!(by_ref.text("background"), "image-def");

        let empty = normalize(&record("hero", "r", json!({"title": "T", "background": ""})), &schema).unwrap();
        assert_eq!(empty.get("background"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_invalid_array_elements_are_dropped() {
        let item = ObjectContract::new()
            .required("title", FieldContract::string(10))
            .optional_or("icon", FieldContract::string(20), "star");
        let schema = BlockSchema::new("features")
            .required("items", FieldContract::bounded_array_of(FieldContract::object(item), 2));

        let block = normalize(
            &record(
                "features",
                "f1",
                json!({"items": [
                    {"title": "Fast"},
                    {"icon": "broken"},
                    "not an object",
                    null,
                    {"title": "Safe", "icon": "shield"},
                    {"title": "Overflow"}
                ]}),
            ),
            &schema,
        )
        .unwrap();

        let items = block.items("items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].str_at("title"), "Fast");
        assert_eq!(items[0].str_at("icon"), "star");
        assert_eq!(items[1].str_at("icon"), "shield");
    }

    #[test]
    fn test_required_array_of_wrong_kind_rejects() {
        let schema = BlockSchema::new("g").required("images", FieldContract::array_of(FieldContract::reference()));
        let diag = normalize(&record("g", "g1", json!({"images": "img-1"})), &schema).unwrap_err();
        assert_eq!(diag.reason, DiagnosticReason::TypeMismatch);
        assert_eq!(diag.field.as_deref(), Some("images"));

        let block = normalize(&record("g", "g1", json!({"images": []})), &schema).unwrap();
        assert!(block.items("images").is_empty());
    }

    #[test]
    fn test_nested_required_field_reports_path() {
        let cta = ObjectContract::new()
            .required("label", FieldContract::string(40))
            .optional_or("href", FieldContract::string(2048), "#");
        let schema = BlockSchema::new("banner")
            .required("cta", FieldContract::object(cta.clone()))
            .optional("secondary", FieldContract::object(cta));

        let diag = normalize(&record("banner", "b1", json!({"cta": {"href": "/x"}})), &schema).unwrap_err();
        assert_eq!(diag.reason, DiagnosticReason::MissingRequiredField);
        assert_eq!(diag.field.as_deref(), Some("cta.label"));

        let block = normalize(
            &record("banner", "b1", json!({"cta": {"label": "Go"}, "secondary": {"href": "/y"}})),
            &schema,
        )
        .unwrap();
        assert_eq!(block.get("cta").unwrap().str_at("href"), "#");
        assert_eq!(block.get("secondary"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let input = record(
            "hero",
            "h8",
            json!({"title": "Same", "alignment": "bogus", "columns": 7, "extra": {"z": 1, "a": 2}}),
        );
        let first = normalize(&input, &hero()).unwrap();
        let second = normalize(&input, &hero()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
