//! Stats Block
//!
//! Headline numbers such as "120+ clients". Values are free text so owners
//! can write units and suffixes; they are kept short.

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "stats";

fn stat() -> ObjectContract {
    ObjectContract::new()
        .required("value", FieldContract::string(20))
        .required("label", FieldContract::string(60))
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Row of headline numbers")
        .optional_or("heading", FieldContract::string(120), "")
        .required("items", FieldContract::bounded_array_of(FieldContract::object(stat()), 8))
}

pub struct StatsRenderer;

impl VariantRenderer for StatsRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let stats: String = block
            .items("items")
            .iter()
            .map(|stat| {
                format!(
                    "<div class=\"stat\"><dt>{}</dt><dd>{}</dd></div>",
                    markup::escape_html(stat.str_at("label")),
                    markup::escape_html(stat.str_at("value"))
                )
            })
            .collect();

        let inner = format!("{}<dl class=\"stats\">{}</dl>", markup::heading(2, block.text("heading")), stats);
        markup::section(block, "", &inner)
    }
}
