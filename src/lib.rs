//! Page Blocks - Block composition and rendering engine
//!
//! This crate turns the ordered, loosely typed block list of a CMS page into
//! rendered markup. Each record is guarded, normalized against its block
//! type's schema and dispatched to that type's renderer; malformed blocks are
//! skipped and reported as diagnostics instead of failing the page.

pub mod catalog;
pub mod core;
pub mod runtime;
mod tests;

// Re-export commonly used types
pub use crate::core::registry::{global, install_global};
pub use crate::core::{
    BlockRecord, BlockSchema, Diagnostic, DiagnosticReason, FieldContract, FieldValue, NormalizedBlock,
    ObjectContract, RegistryError, RenderedBlock, SchemaRegistry, VariantRenderer,
};
pub use crate::runtime::{CompositionEngine, EngineConfig, RenderOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
