//! Standard block catalog
//!
//! Each module defines one block type: its type tag, its schema, and the
//! renderer that turns a normalized block into HTML. Adding a block type
//! means adding a module here and one line to [`register_standard`].

pub mod contact_form;
pub mod cta;
pub mod faq;
pub mod features;
pub mod gallery;
pub mod hero;
pub mod markup;
pub mod stats;
pub mod team;
pub mod testimonials;
pub mod text;

use std::sync::Arc;

use crate::core::{FieldValue, NormalizedBlock, RegistryError, SchemaRegistry, VariantRenderer};

/// Register every standard block type
pub fn register_standard(registry: &SchemaRegistry) -> Result<(), RegistryError> {
    registry.register_variant(hero::TYPE_TAG, hero::schema(), Arc::new(hero::HeroRenderer))?;
    registry.register_variant(text::TYPE_TAG, text::schema(), Arc::new(text::TextRenderer))?;
    registry.register_variant(features::TYPE_TAG, features::schema(), Arc::new(features::FeaturesRenderer))?;
    registry.register_variant(gallery::TYPE_TAG, gallery::schema(), Arc::new(gallery::GalleryRenderer))?;
    registry.register_variant(stats::TYPE_TAG, stats::schema(), Arc::new(stats::StatsRenderer))?;
    registry.register_variant(team::TYPE_TAG, team::schema(), Arc::new(team::TeamRenderer))?;
    registry.register_variant(
        contact_form::TYPE_TAG,
        contact_form::schema(),
        Arc::new(contact_form::ContactFormRenderer),
    )?;
    registry.register_variant(cta::TYPE_TAG, cta::schema(), Arc::new(cta::CtaRenderer))?;
    registry.register_variant(
        testimonials::TYPE_TAG,
        testimonials::schema(),
        Arc::new(testimonials::TestimonialsRenderer),
    )?;
    registry.register_variant(faq::TYPE_TAG, faq::schema(), Arc::new(faq::FaqRenderer))?;
    Ok(())
}

/// Build an unfrozen registry holding the standard catalog
///
/// Callers may register their own block types before the first lookup.
pub fn standard_registry() -> Result<SchemaRegistry, RegistryError> {
    let registry = SchemaRegistry::new();
    if let Err(e) = register_standard(&registry) {
        tracing::error!(error = %e, "standard catalog failed to register");
        return Err(e);
    }
    Ok(registry)
}

/// Renderer used for types registered without one: lists the scalar fields
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericRenderer;

impl VariantRenderer for GenericRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let rows: String = block
            .fields
            .iter()
            .filter_map(|(name, value)| {
                let text = match value {
                    FieldValue::String(s) if !s.is_empty() => s.clone(),
                    FieldValue::Integer(i) => i.to_string(),
                    FieldValue::Number(n) => n.to_string(),
                    FieldValue::Boolean(b) => b.to_string(),
                    _ => return None,
                };
                Some(format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    markup::escape_html(name),
                    markup::escape_html(&text)
                ))
            })
            .collect();

        markup::section(block, "block-generic", &format!("<dl>{}</dl>", rows))
    }
}
