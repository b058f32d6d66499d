use gridkit_core::TemplateError;
use gridkit_designer::{
    build_preset, load_template, presets, save_template, ContentUpdate, EditorialModule,
    ElementContent, GridConfig, GridModel, GridRect, ImageAsset, ImageFormat, ModuleKind,
    TemplateData,
};
use tempfile::tempdir;

#[test]
fn test_save_and_load_preserves_content() {
    let mut model = GridModel::new(GridConfig::new(6, 10, 2.5).unwrap());
    let headline = model
        .add_element_spanning(GridRect::new(1, 1, 6, 2))
        .unwrap()
        .id();
    model.update_content(
        headline,
        &ContentUpdate {
            text: Some("City wins & celebrates".into()),
            module: Some(ModuleKind::Headline),
            ..Default::default()
        },
    );
    let photo = model
        .add_element_spanning(GridRect::new(1, 3, 3, 3))
        .unwrap()
        .id();
    model.update_content(
        photo,
        &ContentUpdate::image(ImageAsset::new(ImageFormat::Gif, b"GIF89a....".to_vec())),
    );
    model.update_content(photo, &ContentUpdate::text("Crowd"));

    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.json");
    save_template(&TemplateData::from_model(&model, true), &path).unwrap();

    let loaded = load_template(&path).unwrap();
    assert!(loaded.physical_page);
    assert_eq!(loaded.model.config(), model.config());
    assert_eq!(loaded.model.elements(), model.elements());
    assert_eq!(loaded.model.next_id(), 3);

    match loaded.model.element(photo).unwrap().content() {
        ElementContent::Image { image, text, .. } => {
            assert_eq!(image.format(), ImageFormat::Gif);
            assert_eq!(text, "Crowd");
        }
        other => panic!("unexpected content {:?}", other),
    }
}

#[test]
fn test_legacy_template_defaults() {
    let json = r#"{
        "columns": 4,
        "rows": 6,
        "gap": 3,
        "elements": [
            { "id": 7, "column": 1, "row": 1, "columnSpan": 2, "rowSpan": 1, "text": "Old" },
            { "id": 3, "column": 3, "row": 1, "columnSpan": 1, "rowSpan": 1,
              "moduleType": "caption", "moduleContent": { "type": "caption", "data": { "text": "Cap" } } }
        ]
    }"#;
    let loaded = TemplateData::from_json(json).unwrap().to_model().unwrap();
    assert!(loaded.physical_page);
    assert_eq!(loaded.model.next_id(), 8);
    let old = loaded.model.element(7).unwrap();
    assert_eq!(old.content().text(), "Old");
    assert_eq!(old.content().color().to_hex(), "#ffffff");
    assert_eq!(
        loaded.model.element(3).unwrap().content(),
        &ElementContent::Module(EditorialModule::Caption { text: "Cap".into() })
    );
}

#[test]
fn test_invalid_templates_are_rejected() {
    let overlapping = r#"{ "columns": 4, "rows": 4, "gap": 0, "elements": [
        { "id": 1, "column": 1, "row": 1, "columnSpan": 2, "rowSpan": 2 },
        { "id": 2, "column": 2, "row": 2, "columnSpan": 1, "rowSpan": 1 } ] }"#;
    assert!(TemplateData::from_json(overlapping)
        .unwrap()
        .to_model()
        .is_err());

    let duplicate = r#"{ "columns": 4, "rows": 4, "gap": 0, "elements": [
        { "id": 1, "column": 1, "row": 1, "columnSpan": 1, "rowSpan": 1 },
        { "id": 1, "column": 3, "row": 3, "columnSpan": 1, "rowSpan": 1 } ] }"#;
    assert!(TemplateData::from_json(duplicate).unwrap().to_model().is_err());

    assert!(TemplateData::from_json("{ not json").is_err());
}

#[test]
fn test_out_of_range_templates_fail_cleanly() {
    let huge_grid = r#"{ "columns": 4294967295, "rows": 5, "gap": 4, "elements": [
        { "id": 1, "column": 4294967295, "row": 1, "columnSpan": 2, "rowSpan": 1 } ] }"#;
    assert!(matches!(
        TemplateData::from_json(huge_grid).unwrap().to_model(),
        Err(TemplateError::InvalidLayout { .. })
    ));

    let huge_span = r#"{ "columns": 5, "rows": 5, "gap": 4, "elements": [
        { "id": 1, "column": 3, "row": 1, "columnSpan": 4294967295, "rowSpan": 1 } ] }"#;
    assert!(matches!(
        TemplateData::from_json(huge_span).unwrap().to_model(),
        Err(TemplateError::InvalidLayout { .. })
    ));

    let far_origin = r#"{ "columns": 5, "rows": 5, "gap": 4, "elements": [
        { "id": 1, "column": 4294967295, "row": 1, "columnSpan": 1, "rowSpan": 1 },
        { "id": 2, "column": 1, "row": 1, "columnSpan": 1, "rowSpan": 1 } ] }"#;
    let loaded = TemplateData::from_json(far_origin).unwrap().to_model().unwrap();
    assert_eq!(loaded.repair.dropped, vec![1]);
    assert_eq!(loaded.model.len(), 1);
    assert!(loaded.model.is_consistent());
}

#[test]
fn test_missing_file_has_context() {
    let dir = tempdir().unwrap();
    let err = load_template(dir.path().join("missing.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json"));
}

#[test]
fn test_presets_survive_a_file_round_trip() {
    let dir = tempdir().unwrap();
    for info in presets() {
        let model = build_preset(info.id).unwrap();
        let path = dir.path().join(format!("{}.json", info.id));
        save_template(&TemplateData::from_model(&model, true), &path).unwrap();
        let loaded = load_template(&path).unwrap();
        assert_eq!(loaded.model.elements(), model.elements(), "{}", info.id);
    }
}
