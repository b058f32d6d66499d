use gridkit_core::LayoutError;
use gridkit_designer::{ContentUpdate, GridConfig, GridModel, GridRect};

fn grid(columns: u32, rows: u32, gap: f64) -> GridModel {
    GridModel::new(GridConfig::new(columns, rows, gap).unwrap())
}

#[test]
fn test_place_then_place_again_is_rejected() {
    let mut model = grid(5, 12, 8.0);
    let element = model.add_element_at(1, 1).unwrap();
    assert_eq!(element.id(), 1);
    assert_eq!(element.rect(), GridRect::new(1, 1, 1, 1));

    let err = model.add_element_at(1, 1).unwrap_err();
    assert!(matches!(err, LayoutError::Occupied { .. }));
    assert_eq!(model.len(), 1);
    assert_eq!(model.next_id(), 2);
}

#[test]
fn test_shrinking_columns_shifts_then_clamps() {
    let mut model = grid(5, 12, 4.0);
    let id = model
        .add_element_spanning(GridRect::new(3, 3, 2, 2))
        .unwrap()
        .id();

    let report = model.set_grid_config(4, 12, 4.0).unwrap();
    assert!(report.is_noop());
    assert_eq!(model.element(id).unwrap().rect(), GridRect::new(3, 3, 2, 2));

    let report = model.set_grid_config(3, 12, 4.0).unwrap();
    assert_eq!(report.adjusted, vec![id]);
    assert_eq!(model.element(id).unwrap().rect(), GridRect::new(2, 3, 2, 2));
}

#[test]
fn test_shift_blocked_by_neighbour_falls_back_to_clamp() {
    let mut model = grid(5, 12, 4.0);
    let wide = model
        .add_element_spanning(GridRect::new(4, 1, 2, 1))
        .unwrap()
        .id();
    model.add_element_at(3, 1).unwrap();

    model.set_grid_config(4, 12, 4.0).unwrap();
    assert_eq!(model.element(wide).unwrap().rect(), GridRect::new(4, 1, 1, 1));
    assert!(model.is_consistent());
}

#[test]
fn test_move_onto_other_element_is_rejected() {
    let mut model = grid(5, 12, 4.0);
    model.add_element_at(1, 1).unwrap();
    let two = model.add_element_at(1, 5).unwrap().id();
    model
        .add_element_spanning(GridRect::new(3, 5, 2, 2))
        .unwrap();

    let err = model.move_element(two, 4, 6).unwrap_err();
    assert!(matches!(err, LayoutError::Occupied { .. }));
    assert_eq!(model.element(two).unwrap().rect(), GridRect::new(1, 5, 1, 1));
}

#[test]
fn test_move_is_clamped_into_grid() {
    let mut model = grid(5, 12, 4.0);
    let id = model
        .add_element_spanning(GridRect::new(1, 1, 2, 3))
        .unwrap()
        .id();
    let rect = model.move_element(id, 5, 12).unwrap();
    assert_eq!(rect, GridRect::new(4, 10, 2, 3));
}

#[test]
fn test_resize_clamps_before_neighbour() {
    let mut model = grid(5, 12, 4.0);
    let id = model.add_element_at(1, 1).unwrap().id();
    model.add_element_at(4, 1).unwrap();

    let rect = model.resize_element(id, 5, 1).unwrap();
    assert_eq!(rect, GridRect::new(1, 1, 3, 1));
}

#[test]
fn test_resize_prefers_largest_free_area() {
    let mut model = grid(5, 12, 4.0);
    let id = model.add_element_at(1, 1).unwrap().id();
    // Blocks the 3x3 request at its bottom-right corner only.
    model.add_element_at(3, 3).unwrap();

    let rect = model.resize_element(id, 3, 3).unwrap();
    assert_eq!(rect.area(), 6);
    assert!(model.is_consistent());
}

#[test]
fn test_delete_keeps_counter() {
    let mut model = grid(5, 12, 4.0);
    let id = model.add_element_at(1, 1).unwrap().id();
    model.delete_element(id).unwrap();
    assert!(matches!(
        model.delete_element(id),
        Err(LayoutError::UnknownElement { .. })
    ));
    assert_eq!(model.add_element_at(1, 1).unwrap().id(), 2);
}

#[test]
fn test_content_update_never_moves_element() {
    let mut model = grid(5, 12, 4.0);
    let id = model
        .add_element_spanning(GridRect::new(2, 2, 2, 2))
        .unwrap()
        .id();
    assert!(model.update_content(id, &ContentUpdate::text("Hello")));
    let element = model.element(id).unwrap();
    assert_eq!(element.rect(), GridRect::new(2, 2, 2, 2));
    assert_eq!(element.content().text(), "Hello");
    assert!(!model.update_content(42, &ContentUpdate::text("nobody")));
}

#[test]
fn test_invalid_grid_is_rejected_without_change() {
    let mut model = grid(5, 12, 4.0);
    model.add_element_at(5, 12).unwrap();
    assert!(model.set_grid_config(0, 12, 4.0).is_err());
    assert!(model.set_grid_config(5, 12, -1.0).is_err());
    assert_eq!(model.config().columns, 5);
    assert_eq!(model.len(), 1);
}
