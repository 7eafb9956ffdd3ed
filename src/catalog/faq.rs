//! FAQ Block

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "faq";

fn entry() -> ObjectContract {
    ObjectContract::new()
        .required("question", FieldContract::string(200))
        .required("answer", FieldContract::string(2000))
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Frequently asked questions")
        .optional_or("heading", FieldContract::string(120), "")
        .required("items", FieldContract::bounded_array_of(FieldContract::object(entry()), 30))
}

pub struct FaqRenderer;

impl VariantRenderer for FaqRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let entries: String = block
            .items("items")
            .iter()
            .map(|entry| {
                format!(
                    "<details><summary>{}</summary>{}</details>",
                    markup::escape_html(entry.str_at("question")),
                    markup::paragraphs(entry.str_at("answer"))
                )
            })
            .collect();

        let inner = format!("{}{}", markup::heading(2, block.text("heading")), entries);
        markup::section(block, "", &inner)
    }
}
