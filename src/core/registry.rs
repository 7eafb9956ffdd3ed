//! Schema Registry - Central registry of block variants
//!
//! The registry maps type tags to a [`BlockVariant`]: the schema a payload
//! must satisfy and the renderer that turns the normalized block into markup.
//! It has a two-phase lifecycle:
//! - Registration: schemas and renderers are added during startup
//! - Frozen: the first lookup (or an explicit [`SchemaRegistry::freeze`])
//!   seals the table; later registrations fail with
//!   [`RegistryError::RegistryFrozen`]
//!
//! Once frozen, lookups read an immutable snapshot and take no locks, so a
//! registry can be shared by any number of concurrent render passes.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::schema::BlockSchema;
use super::VariantRenderer;

/// A registered block type: its schema and, optionally, its renderer
#[derive(Clone)]
pub struct BlockVariant {
    schema: BlockSchema,
    renderer: Option<Arc<dyn VariantRenderer>>,
}

impl BlockVariant {
    /// Get the variant's schema
    pub fn schema(&self) -> &BlockSchema {
        &self.schema
    }

    /// Get the variant's renderer, if one was registered
    pub fn renderer(&self) -> Option<&dyn VariantRenderer> {
        self.renderer.as_deref()
    }
}

impl fmt::Debug for BlockVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockVariant")
            .field("schema", &self.schema)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Pending {
    variants: HashMap<String, BlockVariant>,
    frozen: bool,
}

/// Registry of block variants keyed by type tag
#[derive(Default)]
pub struct SchemaRegistry {
    pending: Mutex<Pending>,
    snapshot: OnceLock<HashMap<String, BlockVariant>>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    ///
    /// # Example
    /// ```
    /// use page_blocks::core::registry::SchemaRegistry;
    ///
    /// let registry = SchemaRegistry::new();
    /// assert!(!registry.is_frozen());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema for a type tag
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the registry is frozen, the tag is already
    ///   registered, or the schema is malformed
    pub fn register(&self, type_tag: &str, schema: BlockSchema) -> Result<(), RegistryError> {
        let mut pending = self.pending.lock();

        if pending.frozen {
            return Err(RegistryError::RegistryFrozen(type_tag.to_string()));
        }
        if type_tag.is_empty() {
            return Err(RegistryError::InvalidSchema {
                type_tag: String::new(),
                reason: "type tag cannot be empty".into(),
            });
        }
        if pending.variants.contains_key(type_tag) {
            return Err(RegistryError::DuplicateTypeTag(type_tag.to_string()));
        }
        schema.validate().map_err(|reason| RegistryError::InvalidSchema {
            type_tag: type_tag.to_string(),
            reason,
        })?;

        tracing::debug!(type_tag, fields = schema.field_contracts().len(), "registered block schema");
        pending.variants.insert(
            type_tag.to_string(),
            BlockVariant {
                schema,
                renderer: None,
            },
        );
        Ok(())
    }

    /// Attach a renderer to an already registered type tag
    pub fn register_renderer(&self, type_tag: &str, renderer: Arc<dyn VariantRenderer>) -> Result<(), RegistryError> {
        let mut pending = self.pending.lock();

        if pending.frozen {
            return Err(RegistryError::RegistryFrozen(type_tag.to_string()));
        }
        let variant = pending
            .variants
            .get_mut(type_tag)
            .ok_or_else(|| RegistryError::NotFound(type_tag.to_string()))?;
        if variant.renderer.is_some() {
            return Err(RegistryError::DuplicateRenderer(type_tag.to_string()));
        }

        variant.renderer = Some(renderer);
        tracing::debug!(type_tag, "registered block renderer");
        Ok(())
    }

    /// Register a schema and its renderer in one step
    pub fn register_variant(
        &self,
        type_tag: &str,
        schema: BlockSchema,
        renderer: Arc<dyn VariantRenderer>,
    ) -> Result<(), RegistryError> {
        self.register(type_tag, schema)?;
        self.register_renderer(type_tag, renderer)
    }

    /// Register every schema in a JSON catalog of the form
    /// `{ "typeTag": { ...schema... }, ... }`
    ///
    /// # Returns
    /// The number of schemas registered
    pub fn register_catalog_json(&self, json: &str) -> Result<usize, RegistryError> {
        let catalog: std::collections::BTreeMap<String, BlockSchema> =
            serde_json::from_str(json).map_err(|e| RegistryError::Catalog(e.to_string()))?;

        let count = catalog.len();
        for (type_tag, schema) in catalog {
            self.register(&type_tag, schema)?;
        }
        Ok(count)
    }

    /// Register every schema in a JSON catalog file
    pub fn register_catalog_file(&self, path: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Catalog(format!("{}: {}", path.display(), e)))?;
        self.register_catalog_json(&json)
    }

    /// Look up the variant registered for a type tag
    ///
    /// The first lookup freezes the registry.
    pub fn lookup(&self, type_tag: &str) -> Result<&BlockVariant, RegistryError> {
        self.snapshot()
            .get(type_tag)
            .ok_or_else(|| RegistryError::NotFound(type_tag.to_string()))
    }

    /// Freeze the registry without looking anything up
    pub fn freeze(&self) {
        self.snapshot();
    }

    /// Check if the registry has been frozen
    pub fn is_frozen(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Registered type tags, sorted
    pub fn type_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = match self.snapshot.get() {
            Some(snapshot) => snapshot.keys().cloned().collect(),
            None => self.pending.lock().variants.keys().cloned().collect(),
        };
        tags.sort();
        tags
    }

    /// Get the number of registered block types
    pub fn count(&self) -> usize {
        match self.snapshot.get() {
            Some(snapshot) => snapshot.len(),
            None => self.pending.lock().variants.len(),
        }
    }

    fn snapshot(&self) -> &HashMap<String, BlockVariant> {
        self.snapshot.get_or_init(|| {
            let mut pending = self.pending.lock();
            pending.frozen = true;
            let variants = std::mem::take(&mut pending.variants);
            tracing::info!(block_types = variants.len(), "schema registry frozen");
            variants
        })
    }
}

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

/// Install the process-wide registry
///
/// The registry is frozen before it is installed. Call this once during
/// startup, before serving any render pass.
pub fn install_global(registry: SchemaRegistry) -> Result<&'static SchemaRegistry, RegistryError> {
    registry.freeze();
    let mut slot = Some(registry);
    let installed = GLOBAL.get_or_init(|| slot.take().unwrap_or_default());
    if slot.is_some() {
        return Err(RegistryError::AlreadyInstalled);
    }
    Ok(installed)
}

/// Get the process-wide registry, installing the standard catalog if nothing
/// was installed first
///
/// # Returns
/// * `Ok(&SchemaRegistry)` once a registry is installed
/// * `Err(RegistryError)` if the standard catalog fails to register; nothing
///   is installed in that case
pub fn global() -> Result<&'static SchemaRegistry, RegistryError> {
    if let Some(installed) = GLOBAL.get() {
        return Ok(installed);
    }

    let registry = crate::catalog::standard_registry()?;
    registry.freeze();
    Ok(GLOBAL.get_or_init(|| registry))
}

/// Registry error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No variant registered for the type tag
    #[error("Block type not found: {0}")]
    NotFound(String),

    /// Attempted to register a type tag twice
    #[error("Duplicate type tag: {0}")]
    DuplicateTypeTag(String),

    /// Attempted to attach a second renderer to a type tag
    #[error("Duplicate renderer for type tag: {0}")]
    DuplicateRenderer(String),

    /// Attempted to mutate the registry after it was frozen
    #[error("Registry is frozen; cannot register '{0}'")]
    RegistryFrozen(String),

    /// Schema failed validation
    #[error("Invalid schema for '{type_tag}': {reason}")]
    InvalidSchema { type_tag: String, reason: String },

    /// A process-wide registry is already installed
    #[error("A global registry is already installed")]
    AlreadyInstalled,

    /// Catalog could not be read or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),
}
