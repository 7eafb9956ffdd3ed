//! Gallery Block

use crate::core::{BlockSchema, FieldContract, NormalizedBlock, ObjectContract, VariantRenderer};

use super::markup;

pub const TYPE_TAG: &str = "gallery";

pub const MAX_IMAGES: usize = 24;

fn image() -> ObjectContract {
    ObjectContract::new()
        .required("image", FieldContract::reference())
        .optional_or("alt", FieldContract::string(160), "")
        .optional_or("caption", FieldContract::string(200), "")
}

pub fn schema() -> BlockSchema {
    BlockSchema::new("Image gallery")
        .optional_or("heading", FieldContract::string(120), "")
        .optional(
            "layout",
            FieldContract::enumeration(&["grid", "carousel", "masonry"], "grid"),
        )
        .required(
            "images",
            FieldContract::bounded_array_of(FieldContract::object(image()), MAX_IMAGES),
        )
}

pub struct GalleryRenderer;

impl VariantRenderer for GalleryRenderer {
    fn render(&self, block: &NormalizedBlock) -> String {
        let figures: String = block
            .items("images")
            .iter()
            .map(|entry| {
                let caption = entry.str_at("caption");
                let caption = if caption.is_empty() {
                    String::new()
                } else {
                    format!("<figcaption>{}</figcaption>", markup::escape_html(caption))
                };
                format!(
                    "<figure>{}{}</figure>",
                    markup::image("gallery-image", entry.str_at("image"), entry.str_at("alt")),
                    caption
                )
            })
            .collect();

        let inner = format!(
            "{}<div class=\"gallery-items\">{}</div>",
            markup::heading(2, block.text("heading")),
            figures
        );
        markup::section(block, &format!("layout-{}", block.text("layout")), &inner)
    }
}
