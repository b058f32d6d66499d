use gridkit_core::AssetError;
use gridkit_designer::{AssetPolicy, EditorState, ImageFormat};
use std::io::Write;

#[tokio::test]
async fn test_load_image_file_sniffs_format() {
    let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
    file.write_all(b"RIFF\x10\x00\x00\x00WEBPVP8 ").unwrap();
    let asset = AssetPolicy::default()
        .load_image_file(file.path())
        .await
        .unwrap();
    assert_eq!(asset.format(), ImageFormat::Webp);
}

#[tokio::test]
async fn test_load_image_file_rejects_large_file_from_metadata() {
    let file = tempfile::NamedTempFile::new().unwrap();
    file.as_file().set_len(3 * 1024 * 1024).unwrap();
    let err = AssetPolicy::default()
        .load_image_file(file.path())
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::TooLarge { size, .. } if size == 3 * 1024 * 1024));
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AssetPolicy::default()
        .load_image_file(dir.path().join("nope.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }));
}

#[tokio::test]
async fn test_load_completes_after_element_deleted() {
    let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
    file.write_all(b"GIF89a\x01\x00\x01\x00").unwrap();

    let mut state = EditorState::new();
    let id = state.model.add_element_at(1, 1).unwrap().id();
    let policy = state.asset_policy.clone();
    let pending = tokio::spawn({
        let path = file.path().to_path_buf();
        async move { policy.load_image_file(path).await }
    });
    state.delete_element(id).unwrap();

    let loaded = pending.await.unwrap();
    assert!(!state.apply_loaded_image(id, loaded).unwrap());
    assert!(state.model.is_empty());
}
