//! # GridKit Core
//!
//! Core types, units and the error taxonomy shared by the GridKit crates.

pub mod color;
pub mod constants;
pub mod error;
pub mod page;
pub mod units;

pub use color::Rgb;
pub use error::{AssetError, Error, ExportError, LayoutError, Result, TemplateError};
pub use page::PageSize;
pub use units::GapUnit;
