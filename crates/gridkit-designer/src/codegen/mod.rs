//! Output generation: HTML, CSS and paginated documents.
//!
//! Every generator is a pure function of the model and the page mode, so the
//! same layout always produces the same output.

pub mod document;
pub mod markup;
pub mod pdf;
pub mod stylesheet;

pub use document::{
    export_filename, layout_document, DocumentLayout, DrawRect, MmRect, PageSetup, TextBlock,
    TextStyle,
};
pub use markup::{escape_html, generate_html};
pub use pdf::{render_pdf, render_pdf_async};
pub use stylesheet::{format_number, generate_css};
