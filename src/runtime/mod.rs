//! Block runtime
//!
//! This module provides the render pipeline: the guard that decides whether a
//! record is dispatchable, the normalizer that applies schema contracts, and
//! the composition engine that drives both and invokes the variant renderers.

pub mod config;
pub mod engine;
pub mod guard;
pub mod normalizer;

pub use config::EngineConfig;
pub use engine::{CompositionEngine, RenderOutcome};
pub use guard::Guard;
pub use normalizer::normalize;

use crate::core::{BlockRecord, RegistryError};

/// Render a block list against the process-wide registry
///
/// Fails only when the process-wide registry cannot be installed; content
/// problems are reported through the outcome's diagnostics.
pub fn render_page(records: &[BlockRecord]) -> Result<RenderOutcome, RegistryError> {
    Ok(CompositionEngine::global()?.render(records))
}
