//! Hero Block
//!
//! Full-width banner at the top of a page: a title, an optional subtitle,
//! one call-to-action link and an optional background image.
//!
//! ## Fields
//!
//! | Field | Kind | Bound | Default |
//! |-------|------|-------|---------|
//! | `title` | string, required | 100 | |
//! | `subtitle` | string | 300 | `""` |
//! | `ctaLabel` | string | 40 | `""` |
//! | `ctaHref` | string | 2048 | `"#"` |
//! | `backgroundImage` | reference | | `null` |
//! | `alignment` | enum `left`/`center`/`right` | | `center` |

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "hero";

pub fn schema() -> BlockSchema {
    BlockSchema::new("Full-width banner with title, subtitle and call to action")
        .required("title", FieldContract::string(100))
        .optional_or("subtitle", FieldContract::string(300), "")
        .optional_or("ctaLabel", FieldContract::string(40), "")
        .optional_or("ctaHref", FieldContract::string(2048), "#")
        .optional("backgroundImage", FieldContract::reference())
        .optional(
            "alignment",
            FieldContract::enumeration(&["left", "center", "right"], "center"),
        )
}

pub struct HeroRenderer;

impl VariantRenderer for HeroRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let mut inner = String::new();
        inner.push_str(&markup::image("hero-background", block.text("backgroundImage"), ""));
        inner.push_str(&markup::heading(1, block.text("title")));
        inner.push_str(&markup::paragraph("hero-subtitle", block.text("subtitle")));
        inner.push_str(&markup::link("hero-cta", block.text("ctaHref"), block.text("ctaLabel")));

        markup::section(block, &format!("align-{}", block.text("alignment")), &inner)
    }
}
