//! Call-to-Action Block

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "cta";

pub fn schema() -> BlockSchema {
    BlockSchema::new("Call to action banner")
        .required("heading", FieldContract::string(120))
        .optional_or("body", FieldContract::string(300), "")
        .optional_or("buttonLabel", FieldContract::string(40), "Get started")
        .optional_or("buttonHref", FieldContract::string(2048), "#")
        .optional(
            "style",
            FieldContract::enumeration(&["primary", "secondary", "outline"], "primary"),
        )
}

pub struct CtaRenderer;

impl VariantRenderer for CtaRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let inner = format!(
            "{}{}{}",
            markup::heading(2, block.text("heading")),
            markup::paragraph("cta-body", block.text("body")),
            markup::link(
                &format!("button button-{}", block.text("style")),
                block.text("buttonHref"),
                block.text("buttonLabel")
            )
        );
        markup::section(block, "", &inner)
    }
}
