//! HTML projection of the grid.

use crate::grid_model::GridModel;
use crate::model::{EditorialModule, Element, ElementContent};
use std::fmt::Write;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escaped text with line breaks turned into `<br>`.
fn text_html(text: &str) -> String {
    escape_html(text).replace("\r\n", "\n").replace('\n', "<br>")
}

/// Generate the markup: one container, one child per element in insertion
/// order, each tagged `item-<id>`.
///
/// With `physical_page` off every child carries an `Element <id>` label;
/// otherwise the element's content is emitted.
pub fn generate_html(model: &GridModel, physical_page: bool) -> String {
    let mut html = String::from("<div class=\"grid-container\">\n");
    for element in model.elements() {
        let id = element.id();
        if physical_page {
            write_element(&mut html, element);
        } else {
            let _ = writeln!(html, "  <div class=\"grid-item item-{id}\">Element {id}</div>");
        }
    }
    html.push_str("</div>");
    html
}

fn write_element(html: &mut String, element: &Element) {
    let id = element.id();
    let open = format!("<div class=\"grid-item item-{id}\">");
    let _ = match element.content() {
        ElementContent::PlainText { text, .. } if !text.is_empty() => {
            writeln!(html, "  {open}{}</div>", text_html(text))
        }
        ElementContent::Image { text, .. } if !text.is_empty() => {
            writeln!(
                html,
                "  {open}\n    <span class=\"item-text\">{}</span>\n  </div>",
                text_html(text)
            )
        }
        ElementContent::PlainText { .. } | ElementContent::Image { .. } => {
            writeln!(html, "  {open}</div>")
        }
        ElementContent::Module(module) => {
            let inner = module_html(module);
            if inner.is_empty() {
                writeln!(html, "  {open}</div>")
            } else {
                writeln!(html, "  {open}\n    {inner}\n  </div>")
            }
        }
    };
}

fn module_html(module: &EditorialModule) -> String {
    match module {
        EditorialModule::Headline { text } => format!("<h1>{}</h1>", text_html(text)),
        EditorialModule::Subheadline { text } => format!("<h2>{}</h2>", text_html(text)),
        EditorialModule::Body { text } => format!("<p>{}</p>", text_html(text)),
        EditorialModule::Caption { text } => {
            format!("<figcaption>{}</figcaption>", text_html(text))
        }
        EditorialModule::Image {
            image: Some(image),
            alt,
        } => format!(
            "<img class=\"module-image\" src=\"{}\" alt=\"{}\">",
            image.to_data_url(),
            escape_html(alt)
        ),
        EditorialModule::Image { image: None, .. } => String::new(),
    }
}
