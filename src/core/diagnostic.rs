//! Diagnostics emitted for skipped blocks
//!
//! Diagnostics are values, never errors: the block they describe is left out
//! of the page and the rest of the render pass carries on. They are meant for
//! logs and telemetry, not for end users.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a block was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticReason {
    /// The type tag does not resolve to a registered schema
    UnknownType,
    /// The identity key is missing, empty or too long
    MissingIdentity,
    /// A required field is absent from the payload
    MissingRequiredField,
    /// A required field is present but has the wrong kind
    TypeMismatch,
}

impl fmt::Display for DiagnosticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticReason::UnknownType => "unknown type",
            DiagnosticReason::MissingIdentity => "missing identity",
            DiagnosticReason::MissingRequiredField => "missing required field",
            DiagnosticReason::TypeMismatch => "type mismatch",
        };
        f.write_str(name)
    }
}

/// A non-fatal record describing why a block was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub identity_key: Option<String>,
    /// `None` when the type tag was never resolved to a schema
    pub type_tag: Option<String>,
    pub reason: DiagnosticReason,
    /// Offending field, as a dotted path for nested fields
    pub field: Option<String>,
}

impl Diagnostic {
    /// The record's identity key could not be used
    pub fn missing_identity() -> Self {
        Self {
            identity_key: None,
            type_tag: None,
            reason: DiagnosticReason::MissingIdentity,
            field: None,
        }
    }

    /// The record's identity key is too long; `key_prefix` keeps the head of
    /// it for telemetry
    pub fn oversized_identity(key_prefix: impl Into<String>) -> Self {
        Self {
            identity_key: Some(key_prefix.into()),
            ..Self::missing_identity()
        }
    }

    /// The record's type tag is not registered
    pub fn unknown_type(identity_key: &str) -> Self {
        Self {
            identity_key: Some(identity_key.to_string()),
            type_tag: None,
            reason: DiagnosticReason::UnknownType,
            field: None,
        }
    }

    /// A field of a resolved block failed its contract
    pub fn field(identity_key: &str, type_tag: &str, reason: DiagnosticReason, field: impl Into<String>) -> Self {
        Self {
            identity_key: Some(identity_key.to_string()),
            type_tag: Some(type_tag.to_string()),
            reason,
            field: Some(field.into()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block skipped ({})", self.reason)?;
        if let Some(key) = &self.identity_key {
            write!(f, " key={}", key)?;
        }
        if let Some(tag) = &self.type_tag {
            write!(f, " type={}", tag)?;
        }
        if let Some(field) = &self.field {
            write!(f, " field={}", field)?;
        }
        Ok(())
    }
}
