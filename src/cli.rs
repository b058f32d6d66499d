//! Command-line front end: renders saved templates to HTML, CSS or PDF.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use gridkit_core::PageSize;
use gridkit_designer::{build_preset, presets, save_template, EditorState, TemplateData};
use gridkit_settings::EditorConfig;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "gridkit",
    about = "Render editorial grid templates to HTML, CSS and PDF",
    version
)]
pub struct Cli {
    /// Editor configuration file (TOML or JSON). Defaults to the platform
    /// config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the template's markup.
    Html(TemplateArgs),

    /// Print the template's stylesheet.
    Css(TemplateArgs),

    /// Export the template as a PDF named grid-<page>-<date>.pdf.
    Pdf(PdfArgs),

    /// List the built-in layout presets.
    Presets,

    /// Write a built-in preset as a new template file.
    New(NewArgs),
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template JSON file.
    pub template: PathBuf,
}

#[derive(Debug, Args)]
pub struct PdfArgs {
    /// Template JSON file.
    pub template: PathBuf,

    /// Page size: tabloid, a4, letter or custom:<width>x<height> in mm.
    #[arg(long)]
    pub page: Option<PageSize>,

    /// Output directory. Defaults to the configured export directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Date used in the file name (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Preset id, see `gridkit presets`.
    pub preset: String,

    /// Where to write the template.
    pub output: PathBuf,
}

/// Loads the editor configuration.
///
/// An explicit path must exist; the default location falls back to built-in
/// defaults when there is no file.
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match EditorConfig::default_path() {
        Ok(path) => EditorConfig::load_or_default(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        Err(e) => {
            tracing::debug!("No config directory ({}), using defaults", e);
            Ok(EditorConfig::default())
        }
    }
}

fn open_template(config: &EditorConfig, path: &Path) -> Result<EditorState> {
    let mut state = EditorState::from_config(config);
    let report = state.load_from_file(path)?;
    if !report.is_noop() {
        tracing::warn!(
            "{}: {} element(s) dropped and {} adjusted to fit the grid",
            path.display(),
            report.dropped.len(),
            report.adjusted.len()
        );
    }
    Ok(state)
}

/// Runs one command, writing its output to `out`.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Html(args) => {
            let state = open_template(&config, &args.template)?;
            writeln!(out, "{}", state.html())?;
        }
        Commands::Css(args) => {
            let state = open_template(&config, &args.template)?;
            write!(out, "{}", state.css())?;
        }
        Commands::Pdf(args) => {
            let state = open_template(&config, &args.template)?;
            let date = args.date.unwrap_or_else(|| Local::now().date_naive());
            let path = state
                .export_pdf_to_dir(args.out_dir.as_deref(), args.page, date)
                .await
                .with_context(|| format!("Failed to export {}", args.template.display()))?;
            writeln!(out, "{}", path.display())?;
        }
        Commands::Presets => {
            for info in presets() {
                writeln!(out, "{:<14} {}", info.id, info.description)?;
            }
        }
        Commands::New(args) => {
            let model = build_preset(&args.preset)?;
            save_template(&TemplateData::from_model(&model, true), &args.output)?;
            writeln!(out, "{}", args.output.display())?;
        }
    }
    Ok(())
}
