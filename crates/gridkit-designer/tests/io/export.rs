use chrono::NaiveDate;
use gridkit_core::{ExportError, PageSize};
use gridkit_designer::{
    build_preset, layout_document, render_pdf, ContentUpdate, EditorState, GridRect,
    ImageAsset, ImageFormat, PageSetup,
};
use image::{DynamicImage, ImageBuffer, Rgb};
use std::io::Cursor;

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| Rgb([(x * 7) as u8, (y * 5) as u8, 90]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    bytes
}

#[test]
fn test_every_page_size_renders() {
    let model = build_preset("three-column").unwrap();
    let mut sizes = PageSize::PRESETS.to_vec();
    sizes.push(PageSize::Custom {
        width_mm: 300.0,
        height_mm: 200.0,
    });
    for size in sizes {
        let layout = layout_document(&model, true, &PageSetup::default().with_size(size)).unwrap();
        assert_eq!(layout.rects.len(), model.len());
        for draw in &layout.rects {
            assert!(draw.rect.x >= 15.0 - 1e-9);
            assert!(draw.rect.x + draw.rect.width <= layout.width_mm - 15.0 + 1e-9);
            assert!(draw.rect.y + draw.rect.height <= layout.height_mm - 15.0 + 1e-9);
        }
        let bytes = render_pdf(&layout, "Three columns").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

#[tokio::test]
async fn test_session_exports_photo_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = EditorState::new();
    let id = state
        .model
        .add_element_spanning(GridRect::new(1, 1, 5, 6))
        .unwrap()
        .id();
    assert!(state.attach_image_bytes(id, jpeg(120, 40), None).unwrap());
    state.update_content(id, &ContentUpdate::text("Skyline at dusk"));

    let date = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
    let path = state
        .export_pdf_to_dir(Some(dir.path()), None, date)
        .await
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "grid-tabloid-2024-11-05.pdf"
    );
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[tokio::test]
async fn test_failed_export_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = EditorState::new();
    let id = state.model.add_element_at(1, 1).unwrap().id();
    state.update_content(
        id,
        &ContentUpdate::image(ImageAsset::new(ImageFormat::Jpeg, vec![0xFF, 0xD8, 0xFF, 0x00])),
    );
    let date = NaiveDate::from_ymd_opt(2024, 11, 5).unwrap();
    let err = state
        .export_pdf_to_dir(Some(dir.path()), None, date)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::ImageData { element_id, .. } if element_id == id));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
