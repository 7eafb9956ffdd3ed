//! Engine configuration

use serde::{Deserialize, Serialize};

/// Maximum identity key length, in characters, accepted by default
pub const DEFAULT_MAX_IDENTITY_LEN: usize = 128;

/// Settings for a [`CompositionEngine`](super::engine::CompositionEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Longest identity key the guard accepts
    pub max_identity_len: usize,
    /// Store document field holding the type tag
    pub type_field: String,
    /// Store document field holding the identity key
    pub key_field: String,
}

impl EngineConfig {
    /// Create a configuration with the default settings
    pub fn new() -> Self {
        Self {
            max_identity_len: DEFAULT_MAX_IDENTITY_LEN,
            type_field: "_type".into(),
            key_field: "_key".into(),
        }
    }

    /// Parse a configuration from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the maximum identity key length
    pub fn with_max_identity_len(mut self, max_identity_len: usize) -> Self {
        self.max_identity_len = max_identity_len;
        self
    }

    /// Set the document field holding the type tag
    pub fn with_type_field(mut self, field: impl Into<String>) -> Self {
        self.type_field = field.into();
        self
    }

    /// Set the document field holding the identity key
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
