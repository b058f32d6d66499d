//! Template persistence.
//!
//! Templates are JSON documents holding the grid dimensions, the
//! physical-page flag and every element. Field names are camelCase; images are
//! embedded as base64 data URLs. Loading is all-or-nothing: a template that
//! fails validation produces an error and no model.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::geometry::{GridConfig, GridRect};
use crate::grid_model::{GridModel, RepairReport};
use crate::model::{EditorialModule, Element, ElementContent, ImageAsset, ModuleKind};
use gridkit_core::{Rgb, TemplateError};

/// Complete template structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateData {
    pub columns: u32,
    pub rows: u32,
    pub gap: f64,
    #[serde(default = "default_physical_page")]
    pub is_newspaper_mode: bool,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
}

/// Serialized element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: u64,
    pub column: u32,
    pub row: u32,
    pub column_span: u32,
    pub row_span: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<ModuleKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_content: Option<ModuleContentRecord>,
}

/// Module payload, tagged by module type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ModuleContentRecord {
    Headline(TextData),
    Subheadline(TextData),
    Body(TextData),
    Caption(TextData),
    Image(ImageData),
    Generic(GenericData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericData {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn default_physical_page() -> bool {
    true
}

fn default_color() -> String {
    Rgb::WHITE.to_hex()
}

/// A validated model built from a template.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub model: GridModel,
    pub physical_page: bool,
    /// Elements moved or dropped to fit the grid while loading.
    pub repair: RepairReport,
}

impl TemplateData {
    /// Snapshot of a model.
    pub fn from_model(model: &GridModel, physical_page: bool) -> Self {
        let config = model.config();
        Self {
            columns: config.columns,
            rows: config.rows,
            gap: config.gap,
            is_newspaper_mode: physical_page,
            elements: model.elements().iter().map(ElementRecord::from_element).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the template and builds a model from it.
    ///
    /// The id counter continues at `max(id) + 1`, or 1 for an empty template.
    pub fn to_model(&self) -> Result<LoadedTemplate, TemplateError> {
        let config = GridConfig::new(self.columns, self.rows, self.gap).map_err(|e| {
            TemplateError::InvalidLayout {
                reason: e.to_string(),
            }
        })?;

        let mut seen = HashSet::new();
        let mut elements = Vec::with_capacity(self.elements.len());
        for record in &self.elements {
            if !seen.insert(record.id) {
                return Err(TemplateError::DuplicateId { id: record.id });
            }
            elements.push(record.to_element()?);
        }

        let next_id = elements.iter().map(Element::id).max().map_or(1, |max| max + 1);
        let mut model = GridModel::new(config);
        model.replace(config, elements, next_id);
        let repair = model.repair();
        if !repair.is_noop() {
            tracing::warn!(
                "Template did not fit its grid: {} element(s) dropped, {} adjusted",
                repair.dropped.len(),
                repair.adjusted.len()
            );
        }
        if !model.occupancy().is_disjoint() {
            return Err(TemplateError::InvalidLayout {
                reason: "elements overlap".to_string(),
            });
        }

        Ok(LoadedTemplate {
            model,
            physical_page: self.is_newspaper_mode,
            repair,
        })
    }
}

impl ElementRecord {
    pub fn from_element(element: &Element) -> Self {
        let rect = element.rect();
        let mut record = Self {
            id: element.id(),
            column: rect.column,
            row: rect.row,
            column_span: rect.column_span,
            row_span: rect.row_span,
            text: element.content().text().to_string(),
            color: element.content().color().to_hex(),
            image: element.content().image().map(ImageAsset::to_data_url),
            module_type: None,
            module_content: None,
        };
        if let ElementContent::Module(module) = element.content() {
            record.module_type = Some(module.kind());
            record.module_content = Some(match module {
                EditorialModule::Headline { text } => {
                    ModuleContentRecord::Headline(TextData { text: text.clone() })
                }
                EditorialModule::Subheadline { text } => {
                    ModuleContentRecord::Subheadline(TextData { text: text.clone() })
                }
                EditorialModule::Body { text } => {
                    ModuleContentRecord::Body(TextData { text: text.clone() })
                }
                EditorialModule::Caption { text } => {
                    ModuleContentRecord::Caption(TextData { text: text.clone() })
                }
                EditorialModule::Image { image, alt } => ModuleContentRecord::Image(ImageData {
                    src: image.as_ref().map(ImageAsset::to_data_url).unwrap_or_default(),
                    alt: (!alt.is_empty()).then(|| alt.clone()),
                }),
            });
        }
        record
    }

    /// Builds the element. Geometry is checked for positive values only;
    /// bounds and overlap are checked against the whole layout.
    pub fn to_element(&self) -> Result<Element, TemplateError> {
        if self.column == 0 || self.row == 0 || self.column_span == 0 || self.row_span == 0 {
            return Err(TemplateError::InvalidLayout {
                reason: format!(
                    "element {} has a zero position or span ({},{} {}x{})",
                    self.id, self.column, self.row, self.column_span, self.row_span
                ),
            });
        }
        let rect = GridRect::new(self.column, self.row, self.column_span, self.row_span);
        if rect.last_column() > u64::from(u32::MAX) || rect.last_row() > u64::from(u32::MAX) {
            return Err(TemplateError::InvalidLayout {
                reason: format!(
                    "element {} extends past the largest grid position ({},{} {}x{})",
                    self.id, self.column, self.row, self.column_span, self.row_span
                ),
            });
        }
        Ok(Element::new(self.id, rect, self.content()?))
    }

    fn content(&self) -> Result<ElementContent, TemplateError> {
        let kind = self
            .module_type
            .or_else(|| self.module_content.as_ref().map(ModuleContentRecord::kind))
            .unwrap_or_default();

        let module_text = match &self.module_content {
            Some(
                ModuleContentRecord::Headline(data)
                | ModuleContentRecord::Subheadline(data)
                | ModuleContentRecord::Body(data)
                | ModuleContentRecord::Caption(data),
            ) => Some(data.text.clone()),
            _ => None,
        };
        let text = module_text.unwrap_or_else(|| self.text.clone());

        let content = match kind {
            ModuleKind::Generic => {
                let color = Rgb::from_hex_or_white(&self.color);
                match self.decode_image(self.image.as_deref())? {
                    Some(image) => ElementContent::Image { image, text, color },
                    None => ElementContent::PlainText { text, color },
                }
            }
            ModuleKind::Headline => ElementContent::Module(EditorialModule::Headline { text }),
            ModuleKind::Subheadline => {
                ElementContent::Module(EditorialModule::Subheadline { text })
            }
            ModuleKind::Body => ElementContent::Module(EditorialModule::Body { text }),
            ModuleKind::Caption => ElementContent::Module(EditorialModule::Caption { text }),
            ModuleKind::Image => {
                let (src, alt) = match &self.module_content {
                    Some(ModuleContentRecord::Image(data)) => {
                        (Some(data.src.as_str()), data.alt.clone().unwrap_or_default())
                    }
                    _ => (self.image.as_deref(), String::new()),
                };
                ElementContent::Module(EditorialModule::Image {
                    image: self.decode_image(src)?,
                    alt,
                })
            }
        };
        Ok(content)
    }

    fn decode_image(&self, src: Option<&str>) -> Result<Option<ImageAsset>, TemplateError> {
        match src.map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => ImageAsset::from_data_url(url).map(Some).map_err(|reason| {
                TemplateError::InvalidLayout {
                    reason: format!("element {} image: {}", self.id, reason),
                }
            }),
        }
    }
}

impl ModuleContentRecord {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleContentRecord::Headline(_) => ModuleKind::Headline,
            ModuleContentRecord::Subheadline(_) => ModuleKind::Subheadline,
            ModuleContentRecord::Body(_) => ModuleKind::Body,
            ModuleContentRecord::Caption(_) => ModuleKind::Caption,
            ModuleContentRecord::Image(_) => ModuleKind::Image,
            ModuleContentRecord::Generic(_) => ModuleKind::Generic,
        }
    }
}

/// Save a template to disk as pretty JSON.
pub fn save_template(data: &TemplateData, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = data.to_json().context("Failed to serialize template")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write template {}", path.display()))?;
    tracing::info!(
        "Saved template with {} element(s) to {}",
        data.elements.len(),
        path.display()
    );
    Ok(())
}

/// Load and validate a template from disk.
pub fn load_template(path: impl AsRef<Path>) -> Result<LoadedTemplate> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))?;
    let data = TemplateData::from_json(&json)
        .with_context(|| format!("Failed to parse template {}", path.display()))?;
    let loaded = data
        .to_model()
        .with_context(|| format!("Invalid template {}", path.display()))?;
    tracing::info!(
        "Loaded template {} ({}x{}, {} element(s))",
        path.display(),
        loaded.model.config().columns,
        loaded.model.config().rows,
        loaded.model.len()
    );
    Ok(loaded)
}
