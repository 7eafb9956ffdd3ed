//! Text Block
//!
//! Free-form copy with an optional heading. Blank lines in the body start a
//! new paragraph.

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "text";

pub fn schema() -> BlockSchema {
    BlockSchema::new("Heading and body copy")
        .optional_or("heading", FieldContract::string(120), "")
        .required("body", FieldContract::string(10_000))
        .optional(
            "alignment",
            FieldContract::enumeration(&["left", "center", "right"], "left"),
        )
}

pub struct TextRenderer;

impl VariantRenderer for TextRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let inner = format!(
            "{}<div class=\"text-body\">{}</div>",
            markup::heading(2, block.text("heading")),
            markup::paragraphs(block.text("body"))
        );
        markup::section(block, &format!("align-{}", block.text("alignment")), &inner)
    }
}
