//! Core block abstractions and types
//!
//! This module defines the data model of the engine: field values, schemas
//! and contracts, raw and normalized records, diagnostics, the schema
//! registry, and the renderer trait every block variant implements.

pub mod diagnostic;
pub mod record;
pub mod registry;
pub mod schema;
pub mod value;

pub use diagnostic::{Diagnostic, DiagnosticReason};
pub use record::{BlockRecord, NormalizedBlock, RenderedBlock};
pub use registry::{BlockVariant, RegistryError, SchemaRegistry};
pub use schema::{BlockSchema, FieldContract, FieldKind, ObjectContract};
pub use value::FieldValue;

/// Rendering logic for one block type
///
/// Implementations must be total and pure: any [`NormalizedBlock`] of the
/// registered type renders without panicking, and rendering the same block
/// twice yields the same markup.
pub trait VariantRenderer: Send + Sync {
    /// Render a normalized block into presentation markup
    fn render(&self, block: &NormalizedBlock) -> String;
}

impl<F> VariantRenderer for F
where
    F: Fn(&NormalizedBlock) -> String + Send + Sync,
{
    fn render(&self, block: &NormalizedBlock) -> String {
        self(block)
    }
}
