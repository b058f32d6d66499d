use gridkit_core::PageSize;
use gridkit_settings::{EditorConfig, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = EditorConfig::new();
    config.grid.columns = 7;
    config.export.page_size = PageSize::Custom {
        width_mm: 300.0,
        height_mm: 400.0,
    };
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = EditorConfig::new();
    config.interaction.click_tolerance_px = 5.0;
    config.assets.allowed_types = vec!["image/png".to_string()];
    config.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"click_tolerance_px\": 5.0"));
    assert_eq!(EditorConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[grid]\ncolumns = 0\n").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { .. }));
}

#[test]
fn test_load_reports_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[grid\ncolumns = ").unwrap();

    assert!(matches!(
        EditorConfig::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().unwrap();
    let config = EditorConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, EditorConfig::default());
}
