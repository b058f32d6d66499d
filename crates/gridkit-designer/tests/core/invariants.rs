use gridkit_designer::{
    ContentUpdate, GeometryMapper, GridConfig, GridModel, GridRect, InteractionController,
    PixelPoint, PointerEvent, PressTarget, TemplateData,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u32, u32),
    AddSpanning(u32, u32, u32, u32),
    Move(usize, u32, u32),
    Resize(usize, u32, u32),
    Delete(usize),
    SetGrid(u32, u32),
    Text(usize, String),
    Gesture(bool, f64, f64, f64, f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1..10u32, 1..14u32).prop_map(|(c, r)| Op::Add(c, r)),
        (1..10u32, 1..14u32, 1..5u32, 1..5u32).prop_map(|(c, r, w, h)| Op::AddSpanning(c, r, w, h)),
        (0..8usize, 0..12u32, 0..15u32).prop_map(|(i, c, r)| Op::Move(i, c, r)),
        (0..8usize, 0..8u32, 0..8u32).prop_map(|(i, w, h)| Op::Resize(i, w, h)),
        (0..8usize).prop_map(Op::Delete),
        (1..9u32, 1..14u32).prop_map(|(c, r)| Op::SetGrid(c, r)),
        (0..8usize, "[a-z ]{0,12}").prop_map(|(i, t)| Op::Text(i, t)),
        (
            any::<bool>(),
            -50.0..650.0f64,
            -50.0..650.0f64,
            -50.0..650.0f64,
            -50.0..650.0f64
        )
            .prop_map(|(h, x0, y0, x1, y1)| Op::Gesture(h, x0, y0, x1, y1)),
    ]
}

fn pick(model: &GridModel, index: usize) -> Option<u64> {
    let elements = model.elements();
    if elements.is_empty() {
        None
    } else {
        Some(elements[index % elements.len()].id())
    }
}

fn apply(model: &mut GridModel, ctl: &mut InteractionController, op: Op) {
    match op {
        Op::Add(c, r) => {
            let _ = model.add_element_at(c, r);
        }
        Op::AddSpanning(c, r, w, h) => {
            let _ = model.add_element_spanning(GridRect::new(c, r, w, h));
        }
        Op::Move(i, c, r) => {
            if let Some(id) = pick(model, i) {
                let _ = model.move_element(id, c, r);
            }
        }
        Op::Resize(i, w, h) => {
            if let Some(id) = pick(model, i) {
                let _ = model.resize_element(id, w, h);
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(model, i) {
                let _ = model.delete_element(id);
            }
        }
        Op::SetGrid(c, r) => {
            let gap = model.config().gap;
            let _ = model.set_grid_config(c, r, gap);
        }
        Op::Text(i, text) => {
            if let Some(id) = pick(model, i) {
                model.update_content(id, &ContentUpdate::text(text));
            }
        }
        Op::Gesture(handle, x0, y0, x1, y1) => {
            let mapper = GeometryMapper::new(model.config(), 600.0, 600.0, 0.0);
            let target = match (handle, pick(model, 0)) {
                (true, Some(id)) => PressTarget::ResizeHandle(id),
                _ => PressTarget::Surface,
            };
            ctl.handle(
                model,
                &mapper,
                PointerEvent::Down {
                    position: PixelPoint::new(x0, y0),
                    target,
                },
            );
            ctl.handle(
                model,
                &mapper,
                PointerEvent::Move {
                    position: PixelPoint::new((x0 + x1) / 2.0, (y0 + y1) / 2.0),
                },
            );
            ctl.handle(
                model,
                &mapper,
                PointerEvent::Up {
                    position: PixelPoint::new(x1, y1),
                },
            );
        }
    }
}

fn assert_legal(model: &GridModel) -> Result<(), TestCaseError> {
    let config = model.config();
    for element in model.elements() {
        let rect = element.rect();
        prop_assert!(config.contains(&rect), "{:?} outside {:?}", rect, config);
    }
    let elements = model.elements();
    for (i, a) in elements.iter().enumerate() {
        for b in &elements[i + 1..] {
            prop_assert!(
                !a.rect().intersects(&b.rect()),
                "{} {:?} overlaps {} {:?}",
                a.id(),
                a.rect(),
                b.id(),
                b.rect()
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_reachable_states_are_legal(ops in prop::collection::vec(op(), 0..60)) {
        let mut model = GridModel::new(GridConfig::new(5, 12, 4.0).unwrap());
        let mut ctl = InteractionController::default();
        for op in ops {
            apply(&mut model, &mut ctl, op);
            assert_legal(&model)?;
        }
    }

    #[test]
    fn prop_ids_are_never_reused(ops in prop::collection::vec(op(), 0..60)) {
        let mut model = GridModel::new(GridConfig::new(5, 12, 4.0).unwrap());
        let mut ctl = InteractionController::default();
        let mut last_next = model.next_id();
        for op in ops {
            apply(&mut model, &mut ctl, op);
            prop_assert!(model.next_id() >= last_next);
            last_next = model.next_id();
            for element in model.elements() {
                prop_assert!(element.id() < model.next_id());
            }
        }
    }

    #[test]
    fn prop_repair_is_idempotent(
        ops in prop::collection::vec(op(), 0..40),
        columns in 1..9u32,
        rows in 1..14u32,
    ) {
        let mut model = GridModel::new(GridConfig::new(5, 12, 4.0).unwrap());
        let mut ctl = InteractionController::default();
        for op in ops {
            apply(&mut model, &mut ctl, op);
        }
        model.set_grid_config(columns, rows, 4.0).unwrap();
        let once = model.clone();
        let report = model.repair();
        prop_assert!(report.is_noop());
        prop_assert_eq!(model, once);
    }

    #[test]
    fn prop_template_round_trip(ops in prop::collection::vec(op(), 0..40), physical in any::<bool>()) {
        let mut model = GridModel::new(GridConfig::new(5, 12, 4.0).unwrap());
        let mut ctl = InteractionController::default();
        for op in ops {
            apply(&mut model, &mut ctl, op);
        }
        let json = TemplateData::from_model(&model, physical).to_json().unwrap();
        let loaded = TemplateData::from_json(&json).unwrap().to_model().unwrap();
        prop_assert!(loaded.repair.is_noop());
        prop_assert_eq!(loaded.physical_page, physical);
        prop_assert_eq!(loaded.model.config(), model.config());
        prop_assert_eq!(loaded.model.elements(), model.elements());
        prop_assert!(loaded.model.next_id() <= model.next_id());
    }
}
