//! Markup, stylesheet and document export for editor state.

use super::EditorState;
use crate::codegen::{
    export_filename, generate_css, generate_html, layout_document, render_pdf_async,
    DocumentLayout, PageSetup,
};
use chrono::NaiveDate;
use gridkit_core::{ExportError, PageSize};
use std::future::Future;
use std::path::{Path, PathBuf};

impl EditorState {
    pub fn html(&self) -> String {
        generate_html(&self.model, self.physical_page)
    }

    pub fn css(&self) -> String {
        generate_css(&self.model, self.physical_page)
    }

    /// Page setup from the export settings, optionally overriding the size.
    pub fn page_setup(&self, page: Option<PageSize>) -> PageSetup {
        let setup = PageSetup::from_settings(&self.export_settings);
        match page {
            Some(size) => setup.with_size(size),
            None => setup,
        }
    }

    pub fn document(&self, page: Option<PageSize>) -> Result<DocumentLayout, ExportError> {
        layout_document(&self.model, self.physical_page, &self.page_setup(page))
    }

    /// Renders the current layout to PDF bytes on the blocking pool.
    ///
    /// The layout is captured before the returned future is polled, so the
    /// editor can keep handling gestures while the export runs.
    pub fn export_pdf(
        &self,
        page: Option<PageSize>,
    ) -> impl Future<Output = Result<Vec<u8>, ExportError>> + Send + 'static {
        let layout = self.document(page);
        let title = self.design_name.clone();
        async move { render_pdf_async(layout?, title).await }
    }

    /// Exports to `grid-<page>-<date>.pdf` inside `dir`, the configured
    /// output directory, or the working directory.
    pub fn export_pdf_to_dir(
        &self,
        dir: Option<&Path>,
        page: Option<PageSize>,
        date: NaiveDate,
    ) -> impl Future<Output = Result<PathBuf, ExportError>> + Send + 'static {
        let size = page.unwrap_or(self.export_settings.page_size);
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| self.export_settings.output_directory.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let path = dir.join(export_filename(&size, date));
        let render = self.export_pdf(Some(size));
        async move {
            let bytes = render.await?;
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|e| ExportError::Io {
                    reason: format!("{}: {}", path.display(), e),
                })?;
            tracing::info!("Exported {} ({} bytes)", path.display(), bytes.len());
            Ok(path)
        }
    }
}
