//! Composition engine
//!
//! Runs one forward pass over a page's block list: guard, normalize, render.
//! Blocks that fail a step are left out of the output and described by a
//! diagnostic; the pass itself never fails. The engine only consults the
//! registry, so supporting a new block type never touches this module.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::catalog::GenericRenderer;
use crate::core::registry::{self, RegistryError, SchemaRegistry};
use crate::core::{BlockRecord, Diagnostic, DiagnosticReason, RenderedBlock, VariantRenderer};

use super::config::EngineConfig;
use super::guard::Guard;
use super::normalizer;

/// Result of one render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOutcome {
    /// Rendered blocks in input order
    pub output: Vec<RenderedBlock>,
    /// One entry per skipped block
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderOutcome {
    /// Concatenate the rendered markup in order
    pub fn markup(&self) -> String {
        self.output
            .iter()
            .map(|block| block.markup.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Identity keys of the rendered blocks, in order
    pub fn identity_keys(&self) -> Vec<&str> {
        self.output.iter().map(|block| block.identity_key.as_str()).collect()
    }

    /// Count skipped blocks per reason
    pub fn skipped_by_reason(&self) -> BTreeMap<DiagnosticReason, usize> {
        let mut counts = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.reason).or_insert(0) += 1;
        }
        counts
    }

    /// True when no block was skipped
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// The composition engine dispatches records to their variant renderers.
pub struct CompositionEngine<'r> {
    registry: &'r SchemaRegistry,
    guard: Guard,
    config: EngineConfig,
}

impl<'r> CompositionEngine<'r> {
    /// Create an engine over `registry` with the default configuration
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    /// Create an engine over `registry` with an explicit configuration
    pub fn with_config(registry: &'r SchemaRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            guard: Guard::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Render a page's block list.
    ///
    /// 1. Guard the record (identity, known type).
    /// 2. Normalize its payload against the schema.
    /// 3. Render it with the variant's renderer, or the generic renderer
    ///    when the type was registered without one.
    ///
    /// Output order follows input order; skipped records leave no
    /// placeholder.
    pub fn render(&self, records: &[BlockRecord]) -> RenderOutcome {
        let span = tracing::debug_span!("render_pass", blocks = records.len());
        let _enter = span.enter();

        let mut outcome = RenderOutcome {
            output: Vec::with_capacity(records.len()),
            diagnostics: Vec::new(),
        };

        for record in records {
            match self.render_one(record) {
                Ok(rendered) => outcome.output.push(rendered),
                Err(diagnostic) => {
                    tracing::debug!(
                        identity_key = diagnostic.identity_key.as_deref().unwrap_or(""),
                        type_tag = %record.type_tag,
                        reason = %diagnostic.reason,
                        field = diagnostic.field.as_deref().unwrap_or(""),
                        "block skipped"
                    );
                    outcome.diagnostics.push(diagnostic);
                }
            }
        }

        tracing::debug!(
            rendered = outcome.output.len(),
            skipped = outcome.diagnostics.len(),
            "render pass complete"
        );
        outcome
    }

    /// Render the raw block array of a store document
    ///
    /// A value that is not an array is treated as an empty page.
    pub fn render_json(&self, blocks: &JsonValue) -> RenderOutcome {
        let Some(entries) = blocks.as_array() else {
            tracing::warn!("block list is not an array; rendering an empty page");
            return RenderOutcome::default();
        };

        let records: Vec<BlockRecord> = entries
            .iter()
            .map(|entry| BlockRecord::from_json(entry, &self.config))
            .collect();
        self.render(&records)
    }

    /// Guard, normalize and render a single record
    pub fn render_one(&self, record: &BlockRecord) -> Result<RenderedBlock, Diagnostic> {
        let variant = self.guard.check(record, self.registry)?;
        let block = normalizer::normalize(record, variant.schema())?;

        let renderer: &dyn VariantRenderer = variant.renderer().unwrap_or(&GenericRenderer);
        let markup = renderer.render(&block);

        Ok(RenderedBlock {
            identity_key: block.identity_key,
            type_tag: block.type_tag,
            markup,
        })
    }
}

impl CompositionEngine<'static> {
    /// Create an engine over the process-wide registry
    pub fn global() -> Result<Self, RegistryError> {
        registry::global().map(Self::new)
    }
}
