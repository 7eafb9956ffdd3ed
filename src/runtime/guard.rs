//! Dispatch guard
//!
//! Decides whether a raw record can be dispatched at all: it needs a usable
//! identity key and a type tag that resolves in the registry. The guard never
//! fails loudly; a rejected record comes back as a [`Diagnostic`].

use crate::core::{BlockRecord, BlockVariant, Diagnostic, SchemaRegistry};

use super::config::EngineConfig;

/// Pre-normalization check over (record, registry)
#[derive(Debug, Clone, Copy)]
pub struct Guard {
    max_identity_len: usize,
}

impl Guard {
    /// Create a guard using the identity bound from `config`
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_identity_len: config.max_identity_len,
        }
    }

    /// Check a record
    ///
    /// Checks run in order:
    /// 1. the identity key is non-blank and at most `max_identity_len`
    ///    characters (`MissingIdentity` otherwise; an over-long key is
    ///    reported by its first `max_identity_len` characters)
    /// 2. the type tag resolves in the registry (`UnknownType` otherwise)
    pub fn check<'r>(&self, record: &BlockRecord, registry: &'r SchemaRegistry) -> Result<&'r BlockVariant, Diagnostic> {
        let key = &record.identity_key;
        if key.trim().is_empty() {
            return Err(Diagnostic::missing_identity());
        }
        if let Some((cut, _)) = key.char_indices().nth(self.max_identity_len) {
            return Err(Diagnostic::oversized_identity(&key[..cut]));
        }

        registry
            .lookup(&record.type_tag)
            .map_err(|_| Diagnostic::unknown_type(&record.identity_key))
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
