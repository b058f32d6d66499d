use gridkit_core::AssetError;
use gridkit_designer::{
    ContentUpdate, EditorMode, EditorState, GestureOutcome, GridRect, ImageAsset, ImageFormat,
    PixelPoint, PointerEvent, PressTarget,
};

fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len, 0);
    bytes
}

#[test]
fn test_oversized_upload_keeps_existing_image() {
    let mut state = EditorState::new();
    let id = state.model.add_element_at(1, 1).unwrap().id();
    let original = ImageAsset::new(ImageFormat::Png, png_bytes(64));
    state.update_content(id, &ContentUpdate::image(original.clone()));

    let err = state
        .attach_image_bytes(id, png_bytes(3 * 1024 * 1024), Some("png"))
        .unwrap_err();
    assert!(matches!(err, AssetError::TooLarge { .. }));
    assert!(err.user_message().contains("2MB"));
    assert_eq!(
        state.model.element(id).unwrap().content().image(),
        Some(&original)
    );
}

#[test]
fn test_session_gesture_flow() {
    let mut state = EditorState::new();
    state.set_surface_size(500.0, 1200.0);
    state.set_gap(0.0).unwrap();

    let press = |x, y| PointerEvent::Down {
        position: PixelPoint::new(x, y),
        target: PressTarget::Surface,
    };
    let release = |x, y| PointerEvent::Up {
        position: PixelPoint::new(x, y),
    };

    state.handle_pointer(press(50.0, 50.0));
    state.handle_pointer(release(250.0, 150.0));
    let id = state.model.elements()[0].id();
    assert_eq!(state.model.elements()[0].rect(), GridRect::new(1, 1, 3, 2));

    assert_eq!(
        state.handle_pointer(press(150.0, 150.0)),
        GestureOutcome::Selected { id }
    );
    assert!(state.preview().is_some());
    state.handle_pointer(release(150.0, 550.0));
    assert_eq!(state.model.element(id).unwrap().rect(), GridRect::new(1, 5, 3, 2));
    assert_eq!(state.selection.selected_id(), Some(id));

    state.delete_selected().unwrap();
    assert!(state.model.is_empty());
    assert_eq!(state.selection.selected_id(), None);
}

#[test]
fn test_preview_mode_blocks_editing() {
    let mut state = EditorState::new();
    state.toggle_mode();
    assert_eq!(state.mode, EditorMode::Preview);
    let outcome = state.handle_pointer(PointerEvent::Down {
        position: PixelPoint::new(10.0, 10.0),
        target: PressTarget::Surface,
    });
    assert_eq!(outcome, GestureOutcome::None);
    state.handle_pointer(PointerEvent::Up {
        position: PixelPoint::new(10.0, 10.0),
    });
    assert!(state.model.is_empty());

    state.toggle_mode();
    assert_eq!(state.mode, EditorMode::Edit);
}

#[test]
fn test_stepping_columns_down_repairs_layout() {
    let mut state = EditorState::new();
    state
        .model
        .add_element_spanning(GridRect::new(3, 3, 2, 2))
        .unwrap();
    state.decrement_columns().unwrap();
    state.decrement_columns().unwrap();
    assert_eq!(state.model.config().columns, 3);
    assert_eq!(state.model.elements()[0].rect(), GridRect::new(2, 3, 2, 2));
}
