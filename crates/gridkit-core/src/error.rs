//! Error handling for GridKit
//!
//! Provides the error types for every layer of the editor:
//! - Layout errors (a mutation would break occupancy or bounds)
//! - Asset errors (image uploads)
//! - Export errors (document generation)
//! - Template errors (persistence)
//!
//! None of these are fatal. Each one is scoped to the single operation that
//! produced it, and the model is left exactly as it was before the call.

use thiserror::Error;

/// Layout error type
///
/// The validation-rejection family: a placement, move, resize or grid change
/// that would leave overlapping or out-of-bounds geometry. These are ordinary
/// gesture misses and are not shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Target cells are already taken by another element
    #[error("Cells {column},{row} ({column_span}x{row_span}) are occupied")]
    Occupied {
        /// First column of the rejected rectangle.
        column: u32,
        /// First row of the rejected rectangle.
        row: u32,
        /// Column span of the rejected rectangle.
        column_span: u32,
        /// Row span of the rejected rectangle.
        row_span: u32,
    },

    /// Rectangle does not fit the grid
    #[error("Cells {column},{row} ({column_span}x{row_span}) fall outside a {columns}x{rows} grid")]
    OutOfBounds {
        /// First column of the rejected rectangle.
        column: u32,
        /// First row of the rejected rectangle.
        row: u32,
        /// Column span of the rejected rectangle.
        column_span: u32,
        /// Row span of the rejected rectangle.
        row_span: u32,
        /// Grid column count.
        columns: u32,
        /// Grid row count.
        rows: u32,
    },

    /// No element with this id exists
    #[error("Element {id} not found")]
    UnknownElement {
        /// The id that was looked up.
        id: u64,
    },

    /// Grid dimensions are not usable
    #[error("Invalid grid: {reason}")]
    InvalidGrid {
        /// Why the dimensions were refused.
        reason: String,
    },

    /// A resize could not be clamped to a non-overlapping span
    #[error("Element {id} cannot be resized without overlapping")]
    Unresolvable {
        /// The element being resized.
        id: u64,
    },
}

/// Asset error type
///
/// Raised when an uploaded image is refused. Carries a message meant for the
/// user; the element's existing content is never touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Image exceeds the configured byte limit
    #[error("Image is {size} bytes, limit is {max} bytes")]
    TooLarge {
        /// Size of the rejected file.
        size: u64,
        /// Configured maximum.
        max: u64,
    },

    /// MIME type is not in the allowed set
    #[error("Unsupported image type: {mime}")]
    UnsupportedType {
        /// The detected or declared MIME type.
        mime: String,
    },

    /// Image data could not be read
    #[error("Image data is invalid: {reason}")]
    Decode {
        /// Decoder or parser message.
        reason: String,
    },

    /// File could not be read
    #[error("I/O error: {reason}")]
    Io {
        /// The underlying I/O message.
        reason: String,
    },
}

impl AssetError {
    /// Message suitable for showing in the editor.
    pub fn user_message(&self) -> String {
        match self {
            AssetError::TooLarge { max, .. } => format!(
                "The image is too large. The limit is {}.",
                human_bytes(*max)
            ),
            AssetError::UnsupportedType { .. } => {
                "Unsupported format. Use JPG, PNG, GIF or WebP.".to_string()
            }
            AssetError::Decode { .. } => "The image file appears to be damaged.".to_string(),
            AssetError::Io { .. } => "The image could not be read.".to_string(),
        }
    }
}

/// Export error type
///
/// Raised while producing a paginated document. A failed export produces no
/// output at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The grid has no elements
    #[error("Nothing to export: the grid has no elements")]
    NothingToExport,

    /// Page dimensions leave no usable area
    #[error("Invalid page: {reason}")]
    InvalidPage {
        /// Why the page was refused.
        reason: String,
    },

    /// An element's image could not be embedded
    #[error("Image of element {element_id} could not be embedded: {reason}")]
    ImageData {
        /// The element whose image failed.
        element_id: u64,
        /// Decoder message.
        reason: String,
    },

    /// The document backend failed
    #[error("Render error: {reason}")]
    Render {
        /// Backend message.
        reason: String,
    },

    /// Background export task did not complete
    #[error("Export task failed: {reason}")]
    TaskFailed {
        /// Join error message.
        reason: String,
    },

    /// Writing the document failed
    #[error("I/O error: {reason}")]
    Io {
        /// The underlying I/O message.
        reason: String,
    },
}

impl ExportError {
    /// Message suitable for showing in the editor.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::NothingToExport => {
                "There are no elements to export. Add elements to the grid first.".to_string()
            }
            _ => "The PDF could not be generated. Please try again.".to_string(),
        }
    }
}

/// Template error type
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template JSON is malformed
    #[error("Failed to parse template: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two elements share an id
    #[error("Duplicate element id {id}")]
    DuplicateId {
        /// The repeated id.
        id: u64,
    },

    /// Template geometry is unusable
    #[error("Invalid template layout: {reason}")]
    InvalidLayout {
        /// What was wrong with it.
        reason: String,
    },

    /// No built-in template has this id
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Template file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for GridKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a silent validation rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this error should be surfaced to the user
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Error::Asset(_) | Error::Export(_) | Error::Template(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

fn human_bytes(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const KIB: u64 = 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
