//! HTML helpers shared by the catalog renderers
//!
//! Every piece of owner-edited text goes through [`escape_html`]. Helpers
//! that wrap optional content return an empty string when the content is
//! empty, so renderers can concatenate them unconditionally.

use crate::core::NormalizedBlock;

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Outer wrapper carrying the block type and identity key
pub fn section(block: &NormalizedBlock, modifier: &str, inner: &str) -> String {
    let mut class = format!("block block-{}", escape_html(&block.type_tag));
    if !modifier.is_empty() {
        class.push(' ');
        class.push_str(&escape_html(modifier));
    }
    format!(
        "<section class=\"{}\" data-block-key=\"{}\">{}</section>",
        class,
        escape_html(&block.identity_key),
        inner
    )
}

pub fn heading(level: u8, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let level = level.clamp(1, 6);
    format!("<h{level}>{}</h{level}>", escape_html(text))
}

pub fn paragraph(class: &str, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("<p class=\"{}\">{}</p>", class, escape_html(text))
}

/// Split free text on blank lines into `<p>` elements
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| format!("<p>{}</p>", escape_html(chunk).replace('\n', "<br>")))
        .collect()
}

pub fn link(class: &str, href: &str, label: &str) -> String {
    if label.is_empty() {
        return String::new();
    }
    format!(
        "<a class=\"{}\" href=\"{}\">{}</a>",
        class,
        escape_html(safe_href(href)),
        escape_html(label)
    )
}

/// Image placeholder resolved by the asset pipeline from its reference id
pub fn image(class: &str, asset_ref: &str, alt: &str) -> String {
    if asset_ref.is_empty() {
        return String::new();
    }
    format!(
        "<img class=\"{}\" data-asset-ref=\"{}\" alt=\"{}\">",
        class,
        escape_html(asset_ref),
        escape_html(alt)
    )
}

/// Keep relative, http(s), mailto and tel links; anything else becomes `#`
pub fn safe_href(href: &str) -> &str {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();
    let allowed = href.starts_with('/')
        || href.starts_with('#')
        || href.starts_with('?')
        || lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:");
    if allowed && !href.starts_with("//") {
        href
    } else {
        "#"
    }
}
