//! CSS projection of the grid.

use crate::grid_model::GridModel;
use crate::model::{EditorialModule, ElementContent};
use gridkit_core::constants::{BORDER_COLOR, TEXT_COLOR};
use gridkit_core::{GapUnit, Rgb};
use std::fmt::Write;

/// Shortest decimal form with at most three fractional digits.
///
/// `4.0` becomes `4`, `0.1 + 0.2` becomes `0.3`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Generate the stylesheet for `model`.
///
/// The gap is written in `mm` in physical-page mode and in `px` otherwise,
/// and omitted entirely when it is zero.
pub fn generate_css(model: &GridModel, physical_page: bool) -> String {
    let config = model.config();
    let unit = GapUnit::for_mode(physical_page);
    let mut css = String::new();

    css.push_str(".grid-container {\n");
    css.push_str("  display: grid;\n");
    let _ = writeln!(css, "  grid-template-columns: repeat({}, 1fr);", config.columns);
    let _ = writeln!(css, "  grid-template-rows: repeat({}, 1fr);", config.rows);
    if config.gap > 0.0 {
        let _ = writeln!(
            css,
            "  gap: {}{};",
            format_number(config.gap),
            unit.css_suffix()
        );
    }
    css.push_str("}\n\n");

    css.push_str(".grid-item {\n");
    css.push_str("  background: #ffffff;\n");
    css.push_str("  padding: 10px;\n");
    let _ = writeln!(css, "  border: 2px solid {};", BORDER_COLOR);
    let _ = writeln!(css, "  color: {};", TEXT_COLOR);
    css.push_str("}\n");

    if model.is_empty() {
        return css;
    }
    css.push('\n');

    let mut overlay_text = false;
    let mut module_image = false;
    for element in model.elements() {
        let rect = element.rect();
        let _ = writeln!(css, ".item-{} {{", element.id());
        let _ = writeln!(
            css,
            "  grid-column: {} / span {};",
            rect.column, rect.column_span
        );
        let _ = writeln!(css, "  grid-row: {} / span {};", rect.row, rect.row_span);
        match element.content() {
            ElementContent::PlainText { color, .. } => write_background_color(&mut css, *color),
            ElementContent::Image { image, text, color } => {
                write_background_color(&mut css, *color);
                let _ = writeln!(css, "  background-image: url('{}');", image.to_data_url());
                css.push_str("  background-size: cover;\n");
                css.push_str("  background-position: center;\n");
                overlay_text |= !text.is_empty();
            }
            ElementContent::Module(EditorialModule::Image { image, .. }) => {
                module_image |= image.is_some();
            }
            ElementContent::Module(_) => {}
        }
        css.push_str("}\n\n");
    }

    if overlay_text {
        css.push_str(".item-text {\n");
        css.push_str("  background: rgba(255, 255, 255, 0.85);\n");
        css.push_str("  padding: 8px 12px;\n");
        css.push_str("  border-radius: 4px;\n");
        css.push_str("  display: inline-block;\n");
        css.push_str("}\n\n");
    }
    if module_image {
        css.push_str(".module-image {\n");
        css.push_str("  display: block;\n");
        css.push_str("  width: 100%;\n");
        css.push_str("  height: 100%;\n");
        css.push_str("  object-fit: cover;\n");
        css.push_str("}\n\n");
    }
    css
}

fn write_background_color(css: &mut String, color: Rgb) {
    if color != Rgb::WHITE {
        let _ = writeln!(css, "  background-color: {};", color.to_hex());
    }
}
