//! Feature Grid Block
//!
//! A grid of short feature cards, each with a title, an optional icon name
//! and a description. `columns` is clamped into 1..=4.

use crate::core::{BlockSchema, FieldContract, FieldValue, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "features";

pub const MAX_ITEMS: usize = 12;

fn item() -> ObjectContract {
    ObjectContract::new()
        .required("title", FieldContract::string(80))
        .optional_or("description", FieldContract::string(300), "")
        .optional_or("icon", FieldContract::string(40), "")
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Grid of feature cards")
        .optional_or("heading", FieldContract::string(120), "")
        .optional_or("columns", FieldContract::number_in(1.0, 4.0), 3i64)
        .required(
            "items",
            FieldContract::bounded_array_of(FieldContract::object(item()), MAX_ITEMS),
        )
}

pub struct FeaturesRenderer;

impl VariantRenderer for FeaturesRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let cards: String = block
            .items("items")
            .iter()
            .map(|item| {
                let icon = item.str_at("icon");
                let icon = if icon.is_empty() {
                    String::new()
                } else {
                    format!("<span class=\"feature-icon\" data-icon=\"{}\"></span>", markup::escape_html(icon))
                };
                format!(
                    "<li class=\"feature\">{}{}{}</li>",
                    icon,
                    markup::heading(3, item.str_at("title")),
                    markup::paragraph("feature-description", item.str_at("description"))
                )
            })
            .collect();

        let inner = format!(
            "{}<ul class=\"feature-grid\">{}</ul>",
            markup::heading(2, block.text("heading")),
            cards
        );
        // The contract clamps into 1..=4 but admits fractions.
        let columns = block
            .get("columns")
            .and_then(FieldValue::as_number)
            .map_or(3, |n| n.round() as i64);
        markup::section(block, &format!("columns-{}", columns), &inner)
    }
}
