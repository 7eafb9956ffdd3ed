//! Testimonials Block

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "testimonials";

fn testimonial() -> ObjectContract {
    ObjectContract::new()
        .required("quote", FieldContract::string(500))
        .required("author", FieldContract::string(80))
        .optional_or("role", FieldContract::string(80), "")
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Customer quotes")
        .optional_or("heading", FieldContract::string(120), "")
        .required(
            "items",
            FieldContract::bounded_array_of(FieldContract::object(testimonial()), 12),
        )
}

pub struct TestimonialsRenderer;

impl VariantRenderer for TestimonialsRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let quotes: String = block
            .items("items")
            .iter()
            .map(|item| {
                let role = item.str_at("role");
                let cite = if role.is_empty() {
                    markup::escape_html(item.str_at("author"))
                } else {
                    format!(
                        "{}, {}",
                        markup::escape_html(item.str_at("author")),
                        markup::escape_html(role)
                    )
                };
                format!(
                    "<blockquote><p>{}</p><cite>{}</cite></blockquote>",
                    markup::escape_html(item.str_at("quote")),
                    cite
                )
            })
            .collect();

        let inner = format!("{}{}", markup::heading(2, block.text("heading")), quotes);
        markup::section(block, "", &inner)
    }
}
