//! PDF rendering of a [`DocumentLayout`].
//!
//! Single page, Helvetica family fonts, images embedded as RGB after a
//! centre crop to the element's aspect ratio.

use super::document::{DocumentLayout, DrawRect, MmRect, TextStyle, BORDER_WIDTH_MM};
use crate::model::ImageAsset;
use gridkit_core::units::mm_to_pt;
use gridkit_core::{ExportError, Rgb};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Px, Rect,
};

/// Resolution images are embedded at.
const IMAGE_DPI: f64 = 200.0;
/// Longest edge of an embedded image, in pixels.
const MAX_IMAGE_EDGE: u32 = 2400;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn for_style(&self, style: TextStyle) -> &IndirectFontRef {
        match style {
            TextStyle::Regular => &self.regular,
            TextStyle::Bold => &self.bold,
            TextStyle::Italic => &self.italic,
        }
    }
}

fn render_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Render {
        reason: err.to_string(),
    }
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Renders the layout to PDF bytes.
///
/// Any image that cannot be decoded fails the whole export; no partial
/// document is produced.
pub fn render_pdf(layout: &DocumentLayout, title: &str) -> Result<Vec<u8>, ExportError> {
    // Decode first so a bad image fails before any drawing happens.
    let images = layout
        .rects
        .iter()
        .map(|draw| match &draw.image {
            Some(asset) => prepare_image(asset, &draw.rect)
                .map(Some)
                .map_err(|reason| ExportError::ImageData {
                    element_id: draw.element_id,
                    reason,
                }),
            None => Ok(None),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(layout.width_mm as f32),
        Mm(layout.height_mm as f32),
        "Grid",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(render_error)?,
    };
    let layer = doc.get_page(page).get_layer(layer);
    layer.set_outline_thickness(mm_to_pt(BORDER_WIDTH_MM) as f32);

    for (draw, image) in layout.rects.iter().zip(images) {
        draw_element(&layer, layout.height_mm, draw, image, &fonts);
    }

    let bytes = doc.save_to_bytes().map_err(render_error)?;
    tracing::debug!(
        "Rendered {} element(s) to a {} byte PDF",
        layout.rects.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Renders on the blocking pool so the caller's executor stays responsive.
pub async fn render_pdf_async(layout: DocumentLayout, title: String) -> Result<Vec<u8>, ExportError> {
    tokio::task::spawn_blocking(move || render_pdf(&layout, &title))
        .await
        .map_err(|e| ExportError::TaskFailed {
            reason: e.to_string(),
        })?
}

fn pdf_rect(page_height: f64, rect: &MmRect, mode: PaintMode) -> Rect {
    let lower = page_height - rect.y - rect.height;
    Rect::new(
        Mm(rect.x as f32),
        Mm(lower as f32),
        Mm((rect.x + rect.width) as f32),
        Mm((lower + rect.height) as f32),
    )
    .with_mode(mode)
}

fn draw_element(
    layer: &PdfLayerReference,
    page_height: f64,
    draw: &DrawRect,
    image: Option<PreparedImage>,
    fonts: &Fonts,
) {
    layer.set_fill_color(pdf_color(draw.fill));
    layer.add_rect(pdf_rect(page_height, &draw.rect, PaintMode::Fill));

    if let Some(image) = image {
        image.place(layer, page_height, &draw.rect);
    }

    layer.set_outline_color(pdf_color(draw.border));
    layer.add_rect(pdf_rect(page_height, &draw.rect, PaintMode::Stroke));

    let Some(text) = &draw.text else {
        return;
    };
    if let Some(backdrop) = &text.backdrop {
        layer.set_fill_color(pdf_color(Rgb::WHITE));
        layer.add_rect(pdf_rect(page_height, backdrop, PaintMode::Fill));
    }
    layer.set_fill_color(pdf_color(text.color));
    let font = fonts.for_style(text.style);
    for (i, line) in text.lines.iter().enumerate() {
        let baseline = text.baseline_y + i as f64 * text.line_height_mm;
        layer.use_text(
            line.as_str(),
            text.font_size_pt as f32,
            Mm(text.x as f32),
            Mm((page_height - baseline) as f32),
            font,
        );
    }
}

/// Decoded RGB pixels ready for embedding.
struct PreparedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl PreparedImage {
    fn place(self, layer: &PdfLayerReference, page_height: f64, rect: &MmRect) {
        let native_width_mm = f64::from(self.width) * 25.4 / IMAGE_DPI;
        let native_height_mm = f64::from(self.height) * 25.4 / IMAGE_DPI;
        let xobject = ImageXObject {
            width: Px(self.width as usize),
            height: Px(self.height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: self.rgb,
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };
        Image::from(xobject).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(rect.x as f32)),
                translate_y: Some(Mm((page_height - rect.y - rect.height) as f32)),
                scale_x: Some((rect.width / native_width_mm) as f32),
                scale_y: Some((rect.height / native_height_mm) as f32),
                dpi: Some(IMAGE_DPI as f32),
                ..Default::default()
            },
        );
    }
}

/// Decodes, crops to cover `rect` and flattens transparency onto white.
fn prepare_image(asset: &ImageAsset, rect: &MmRect) -> Result<PreparedImage, String> {
    let decoded = image::load_from_memory(asset.bytes()).map_err(|e| e.to_string())?;
    let cropped = crop_to_cover(&decoded, rect.width / rect.height);
    let (w, h) = cropped.dimensions();
    let scaled = if w.max(h) > MAX_IMAGE_EDGE {
        cropped.resize(MAX_IMAGE_EDGE, MAX_IMAGE_EDGE, FilterType::Triangle)
    } else {
        cropped
    };

    let rgba = scaled.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        for channel in [r, g, b] {
            let blended = (u16::from(channel) * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }
    Ok(PreparedImage { width, height, rgb })
}

/// Centre crop to `aspect` (width / height).
fn crop_to_cover(image: &DynamicImage, aspect: f64) -> DynamicImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 || !aspect.is_finite() || aspect <= 0.0 {
        return image.clone();
    }
    let current = f64::from(w) / f64::from(h);
    if current > aspect {
        let new_w = ((f64::from(h) * aspect).round() as u32).clamp(1, w);
        image.crop_imm((w - new_w) / 2, 0, new_w, h)
    } else {
        let new_h = ((f64::from(w) / aspect).round() as u32).clamp(1, h);
        image.crop_imm(0, (h - new_h) / 2, w, new_h)
    }
}
