//! Contact Form Block
//!
//! Renders a form whose submission is handled outside this crate. The
//! `recipient` address is required so the submission handler can route the
//! message, but it is never written into the markup.

use serde_json::json;

use crate::core::{BlockSchema, FieldContract, FieldValue, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "contactForm";

pub const MAX_FIELDS: usize = 10;

fn form_field() -> ObjectContract {
    ObjectContract::new()
        .required("name", FieldContract::string(40))
        .required("label", FieldContract::string(80))
        .optional(
            "inputType",
            FieldContract::enumeration(&["text", "email", "tel", "textarea"], "text"),
        )
        .optional("required", FieldContract::boolean())
}

fn default_fields() -> FieldValue {
    FieldValue::from_json(&json!([
        {"name": "name", "label": "Name", "inputType": "text", "required": true},
        {"name": "email", "label": "Email", "inputType": "email", "required": true},
        {"name": "message", "label": "Message", "inputType": "textarea", "required": false}
    ]))
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Contact form")
        .optional_or("heading", FieldContract::string(120), "Contact us")
        .optional_or("description", FieldContract::string(500), "")
        .optional_or("submitLabel", FieldContract::string(40), "Send")
        .required("recipient", FieldContract::string(254))
        .optional_or(
            "fields",
            FieldContract::bounded_array_of(FieldContract::object(form_field()), MAX_FIELDS),
            default_fields(),
        )
}

pub struct ContactFormRenderer;

impl ContactFormRenderer {
    fn render_field(field: &FieldValue) -> String {
        let name = markup::escape_html(field.str_at("name"));
        let label = markup::escape_html(field.str_at("label"));
        let required = if field.get("required").and_then(FieldValue::as_bool).unwrap_or(false) {
            " required"
        } else {
            ""
        };

        let control = match field.str_at("inputType") {
            "textarea" => format!("<textarea name=\"{}\"{}></textarea>", name, required),
            input_type => format!(
                "<input type=\"{}\" name=\"{}\"{}>",
                markup::escape_html(input_type),
                name,
                required
            ),
        };
        format!("<label>{}{}</label>", label, control)
    }
}

impl VariantRenderer for ContactFormRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let fields: String = block.items("fields").iter().map(Self::render_field).collect();

        let inner = format!(
            "{}{}<form class=\"contact-form\" method=\"post\" data-form-key=\"{}\">{}<button type=\"submit\">{}</button></form>",
            markup::heading(2, block.text("heading")),
            markup::paragraph("form-description", block.text("description")),
            markup::escape_html(&block.identity_key),
            fields,
            markup::escape_html(block.text("submitLabel"))
        );
        markup::section(block, "", &inner)
    }
}
