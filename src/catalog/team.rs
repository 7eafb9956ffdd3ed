//! Team Block

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "team";

fn member() -> ObjectContract {
    ObjectContract::new()
        .required("name", FieldContract::string(80))
        .optional_or("role", FieldContract::string(80), "")
        .optional("photo", FieldContract::reference())
        .optional_or("bio", FieldContract::string(500), "")
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Team member cards")
        .optional_or("heading", FieldContract::string(120), "")
        .required("members", FieldContract::bounded_array_of(FieldContract::object(member()), 24))
}

pub struct TeamRenderer;

impl VariantRenderer for TeamRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let members: String = block
            .items("members")
            .iter()
            .map(|member| {
                let name = member.str_at("name");
                format!(
                    "<li class=\"member\">{}{}{}{}</li>",
                    markup::image("member-photo", member.str_at("photo"), name),
                    markup::heading(3, name),
                    markup::paragraph("member-role", member.str_at("role")),
                    markup::paragraph("member-bio", member.str_at("bio"))
                )
            })
            .collect();

        let inner = format!("{}<ul class=\"team\">{}</ul>", markup::heading(2, block.text("heading")), members);
        markup::section(block, "", &inner)
    }
}
