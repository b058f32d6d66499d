//! GridKit Settings Crate
//!
//! Editor configuration: grid defaults, stepper limits, image upload policy,
//! export defaults and pointer tuning, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    AssetSettings, EditorConfig, ExportSettings, GridSettings, InteractionSettings,
    LimitSettings,
};
pub use error::{SettingsError, SettingsResult};
