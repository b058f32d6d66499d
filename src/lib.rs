//! # GridKit
//!
//! An editorial grid-layout editor. Blocks are placed, moved and resized on a
//! column/row grid and the finished layout is exported as HTML, CSS or PDF.
//!
//! ## Architecture
//!
//! GridKit is organized as a workspace with multiple crates:
//!
//! 1. **gridkit-core** - Units, page sizes, colours and error types
//! 2. **gridkit-settings** - Editor configuration loaded from TOML or JSON
//! 3. **gridkit-designer** - Grid model, gestures, templates and code generation
//! 4. **gridkit** - Command-line front end that ties the crates together

pub mod cli;

pub use gridkit_designer as designer;
pub use gridkit_settings as settings;

pub use gridkit_core::{AssetError, Error, ExportError, LayoutError, PageSize, Rgb, TemplateError};
pub use gridkit_designer::{EditorMode, EditorState, GridConfig, GridModel, GridRect};
pub use gridkit_settings::EditorConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Honours `RUST_LOG` and defaults to `info`. Logs go to stderr so command
/// output on stdout stays clean; `json` switches to one JSON object per line.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
