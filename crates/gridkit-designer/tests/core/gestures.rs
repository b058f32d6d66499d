use gridkit_core::LayoutError;
use gridkit_designer::{
    GeometryMapper, Gesture, GestureOutcome, GridConfig, GridModel, GridRect,
    InteractionController, PixelPoint, PointerEvent, PressTarget, PreviewKind,
};

// 5x12 grid on a 500x1200 surface: every cell is 100px square.
fn setup() -> (GridModel, GeometryMapper, InteractionController) {
    let config = GridConfig::new(5, 12, 0.0).unwrap();
    let mapper = GeometryMapper::new(&config, 500.0, 1200.0, 0.0);
    (GridModel::new(config), mapper, InteractionController::default())
}

fn down(target: PressTarget, x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        position: PixelPoint::new(x, y),
        target,
    }
}

fn mv(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Move {
        position: PixelPoint::new(x, y),
    }
}

fn up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        position: PixelPoint::new(x, y),
    }
}

#[test]
fn test_click_within_tolerance_places_one_cell() {
    let (mut model, mapper, mut ctl) = setup();
    ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 250.0, 350.0));
    ctl.handle(&mut model, &mapper, mv(252.0, 351.0));
    let outcome = ctl.handle(&mut model, &mapper, up(252.0, 351.0));
    assert_eq!(outcome, GestureOutcome::Placed { id: 1 });
    assert_eq!(model.element(1).unwrap().rect(), GridRect::new(3, 4, 1, 1));
    assert!(ctl.gesture().is_idle());
}

#[test]
fn test_range_selection_is_normalised() {
    let (mut model, mapper, mut ctl) = setup();
    ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 450.0, 550.0));
    ctl.handle(&mut model, &mapper, mv(150.0, 250.0));

    let preview = ctl.preview(&model, &mapper).unwrap();
    assert_eq!(preview.kind, PreviewKind::Place);
    assert_eq!(preview.rect, GridRect::new(2, 3, 4, 4));
    assert!(!preview.occupied);

    let outcome = ctl.handle(&mut model, &mapper, up(150.0, 250.0));
    assert!(matches!(outcome, GestureOutcome::Placed { .. }));
    assert_eq!(model.elements()[0].rect(), GridRect::new(2, 3, 4, 4));
}

#[test]
fn test_range_selection_over_element_is_discarded() {
    let (mut model, mapper, mut ctl) = setup();
    model.add_element_at(2, 2).unwrap();
    ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 50.0, 50.0));
    ctl.handle(&mut model, &mapper, mv(250.0, 250.0));
    assert!(ctl.preview(&model, &mapper).unwrap().occupied);

    let outcome = ctl.handle(&mut model, &mapper, up(250.0, 250.0));
    assert!(matches!(
        outcome,
        GestureOutcome::Rejected(LayoutError::Occupied { .. })
    ));
    assert_eq!(model.len(), 1);
}

#[test]
fn test_drag_follows_pointer_and_commits_on_release() {
    let (mut model, mapper, mut ctl) = setup();
    let id = model
        .add_element_spanning(GridRect::new(1, 1, 2, 2))
        .unwrap()
        .id();

    // Grab the element by its lower-right cell.
    let outcome = ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 150.0, 150.0));
    assert_eq!(outcome, GestureOutcome::Selected { id });
    ctl.handle(&mut model, &mapper, mv(250.0, 450.0));
    ctl.handle(&mut model, &mapper, mv(350.0, 650.0));
    assert!(matches!(
        ctl.gesture(),
        Gesture::Dragging { candidate, .. } if *candidate == GridRect::new(3, 6, 2, 2)
    ));
    // Uncommitted until release.
    assert_eq!(model.element(id).unwrap().rect(), GridRect::new(1, 1, 2, 2));

    let outcome = ctl.handle(&mut model, &mapper, up(350.0, 650.0));
    assert_eq!(
        outcome,
        GestureOutcome::Moved {
            id,
            rect: GridRect::new(3, 6, 2, 2)
        }
    );
}

#[test]
fn test_drag_release_outside_grid_is_clamped() {
    let (mut model, mapper, mut ctl) = setup();
    let id = model.add_element_at(1, 1).unwrap().id();
    ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 50.0, 50.0));
    let outcome = ctl.handle(&mut model, &mapper, up(5000.0, -300.0));
    assert_eq!(
        outcome,
        GestureOutcome::Moved {
            id,
            rect: GridRect::new(5, 1, 1, 1)
        }
    );
}

#[test]
fn test_drag_onto_element_leaves_it_in_place() {
    let (mut model, mapper, mut ctl) = setup();
    let id = model.add_element_at(1, 1).unwrap().id();
    model.add_element_at(3, 1).unwrap();
    ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 50.0, 50.0));
    ctl.handle(&mut model, &mapper, mv(250.0, 50.0));
    assert!(ctl.preview(&model, &mapper).unwrap().occupied);
    let outcome = ctl.handle(&mut model, &mapper, up(250.0, 50.0));
    assert!(matches!(outcome, GestureOutcome::Rejected(_)));
    assert_eq!(model.element(id).unwrap().rect(), GridRect::new(1, 1, 1, 1));
}

#[test]
fn test_resize_uses_total_travel() {
    let (mut model, mapper, mut ctl) = setup();
    let id = model.add_element_at(1, 1).unwrap().id();
    ctl.handle(&mut model, &mapper, down(PressTarget::ResizeHandle(id), 100.0, 100.0));
    // Jitter back and forth; only the final offset matters.
    for x in [140.0, 260.0, 180.0, 310.0] {
        ctl.handle(&mut model, &mapper, mv(x, 160.0));
    }
    let preview = ctl.preview(&model, &mapper).unwrap();
    assert_eq!(preview.kind, PreviewKind::Resize);
    assert_eq!(preview.rect, GridRect::new(1, 1, 3, 2));

    let outcome = ctl.handle(&mut model, &mapper, up(310.0, 160.0));
    assert_eq!(
        outcome,
        GestureOutcome::Resized {
            id,
            rect: GridRect::new(1, 1, 3, 2)
        }
    );
}

#[test]
fn test_resize_into_neighbour_clamps() {
    let (mut model, mapper, mut ctl) = setup();
    let id = model.add_element_at(1, 1).unwrap().id();
    model.add_element_at(3, 1).unwrap();
    ctl.handle(&mut model, &mapper, down(PressTarget::ResizeHandle(id), 100.0, 100.0));
    let outcome = ctl.handle(&mut model, &mapper, up(500.0, 100.0));
    assert_eq!(
        outcome,
        GestureOutcome::Resized {
            id,
            rect: GridRect::new(1, 1, 2, 1)
        }
    );
}

#[test]
fn test_cancel_discards_gesture() {
    let (mut model, mapper, mut ctl) = setup();
    model.add_element_at(1, 1).unwrap();
    ctl.handle(&mut model, &mapper, down(PressTarget::Surface, 50.0, 50.0));
    ctl.handle(&mut model, &mapper, mv(450.0, 50.0));
    ctl.cancel();
    assert_eq!(ctl.handle(&mut model, &mapper, up(450.0, 50.0)), GestureOutcome::None);
    assert_eq!(model.elements()[0].rect(), GridRect::new(1, 1, 1, 1));
}
