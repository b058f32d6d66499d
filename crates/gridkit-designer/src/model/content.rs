use super::image::ImageAsset;
use gridkit_core::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editorial module kinds, plus the plain `Generic` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    #[default]
    Generic,
    Headline,
    Subheadline,
    Body,
    Image,
    Caption,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::Generic,
        ModuleKind::Headline,
        ModuleKind::Subheadline,
        ModuleKind::Body,
        ModuleKind::Image,
        ModuleKind::Caption,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ModuleKind::Generic => "generic",
            ModuleKind::Headline => "headline",
            ModuleKind::Subheadline => "subheadline",
            ModuleKind::Body => "body",
            ModuleKind::Image => "image",
            ModuleKind::Caption => "caption",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleKind::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown module type: {}", s))
    }
}

/// Typed editorial payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorialModule {
    Headline { text: String },
    Subheadline { text: String },
    Body { text: String },
    Caption { text: String },
    Image { image: Option<ImageAsset>, alt: String },
}

impl EditorialModule {
    pub fn kind(&self) -> ModuleKind {
        match self {
            EditorialModule::Headline { .. } => ModuleKind::Headline,
            EditorialModule::Subheadline { .. } => ModuleKind::Subheadline,
            EditorialModule::Body { .. } => ModuleKind::Body,
            EditorialModule::Caption { .. } => ModuleKind::Caption,
            EditorialModule::Image { .. } => ModuleKind::Image,
        }
    }

    /// Text of a text module, or the alt text of an image module.
    pub fn text(&self) -> &str {
        match self {
            EditorialModule::Headline { text }
            | EditorialModule::Subheadline { text }
            | EditorialModule::Body { text }
            | EditorialModule::Caption { text } => text,
            EditorialModule::Image { alt, .. } => alt,
        }
    }
}

/// What an element holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementContent {
    /// Plain text on a coloured background.
    PlainText { text: String, color: Rgb },
    /// Background image with optional overlay text.
    Image {
        image: ImageAsset,
        text: String,
        color: Rgb,
    },
    Module(EditorialModule),
}

impl Default for ElementContent {
    fn default() -> Self {
        ElementContent::PlainText {
            text: String::new(),
            color: Rgb::WHITE,
        }
    }
}

impl ElementContent {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ElementContent::PlainText { .. } | ElementContent::Image { .. } => ModuleKind::Generic,
            ElementContent::Module(module) => module.kind(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ElementContent::PlainText { text, .. } | ElementContent::Image { text, .. } => text,
            ElementContent::Module(module) => module.text(),
        }
    }

    /// Background colour. Editorial modules always render on white.
    pub fn color(&self) -> Rgb {
        match self {
            ElementContent::PlainText { color, .. } | ElementContent::Image { color, .. } => {
                *color
            }
            ElementContent::Module(_) => Rgb::WHITE,
        }
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        match self {
            ElementContent::Image { image, .. } => Some(image),
            ElementContent::Module(EditorialModule::Image { image, .. }) => image.as_ref(),
            _ => None,
        }
    }

    /// Returns a copy with `update` merged in.
    ///
    /// Text is carried across kinds. The image survives a switch between the
    /// generic block and the image module; text modules have no image slot.
    /// Colour only exists on the generic block and resets to white when a
    /// module kind is chosen.
    pub fn merged(&self, update: &ContentUpdate) -> ElementContent {
        let mut facets = Facets::from_content(self);
        if let Some(text) = &update.text {
            facets.text = text.clone();
        }
        if let Some(color) = update.color {
            facets.color = color;
        }
        if let Some(image) = &update.image {
            facets.image = image.clone();
        }
        if let Some(kind) = update.module {
            if kind != facets.kind {
                if kind != ModuleKind::Generic {
                    facets.color = Rgb::WHITE;
                }
                facets.kind = kind;
            }
        }
        facets.into_content()
    }
}

/// Partial content update. `None` fields are left alone.
///
/// `image: Some(None)` removes the image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentUpdate {
    pub text: Option<String>,
    pub color: Option<Rgb>,
    pub image: Option<Option<ImageAsset>>,
    pub module: Option<ModuleKind>,
}

impl ContentUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn color(color: Rgb) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn image(image: ImageAsset) -> Self {
        Self {
            image: Some(Some(image)),
            ..Default::default()
        }
    }

    pub fn remove_image() -> Self {
        Self {
            image: Some(None),
            ..Default::default()
        }
    }

    pub fn module(kind: ModuleKind) -> Self {
        Self {
            module: Some(kind),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.color.is_none() && self.image.is_none() && self.module.is_none()
    }
}

// Flat view used for merging; recomposed into the tagged form afterwards.
struct Facets {
    kind: ModuleKind,
    text: String,
    color: Rgb,
    image: Option<ImageAsset>,
}

impl Facets {
    fn from_content(content: &ElementContent) -> Self {
        Self {
            kind: content.kind(),
            text: content.text().to_string(),
            color: content.color(),
            image: content.image().cloned(),
        }
    }

    fn into_content(self) -> ElementContent {
        let Facets {
            kind,
            text,
            color,
            image,
        } = self;
        match kind {
            ModuleKind::Generic => match image {
                Some(image) => ElementContent::Image { image, text, color },
                None => ElementContent::PlainText { text, color },
            },
            ModuleKind::Headline => ElementContent::Module(EditorialModule::Headline { text }),
            ModuleKind::Subheadline => {
                ElementContent::Module(EditorialModule::Subheadline { text })
            }
            ModuleKind::Body => ElementContent::Module(EditorialModule::Body { text }),
            ModuleKind::Caption => ElementContent::Module(EditorialModule::Caption { text }),
            ModuleKind::Image => ElementContent::Module(EditorialModule::Image { image, alt: text }),
        }
    }
}
