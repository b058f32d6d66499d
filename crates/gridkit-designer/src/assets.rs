//! Image upload validation and loading.

use crate::model::{ImageAsset, ImageFormat};
use gridkit_core::AssetError;
use gridkit_settings::AssetSettings;
use std::path::Path;

/// Size and type limits for uploaded images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPolicy {
    pub max_bytes: u64,
    pub allowed: Vec<ImageFormat>,
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self {
            max_bytes: gridkit_core::constants::MAX_IMAGE_BYTES,
            allowed: ImageFormat::ALL.to_vec(),
        }
    }
}

impl AssetPolicy {
    /// Builds a policy from configuration. Unknown MIME types are skipped.
    pub fn from_settings(settings: &AssetSettings) -> Self {
        let allowed = settings
            .allowed_types
            .iter()
            .filter_map(|mime| {
                let format = ImageFormat::from_mime(mime);
                if format.is_none() {
                    tracing::warn!("Ignoring unsupported image type in config: {}", mime);
                }
                format
            })
            .collect();
        Self {
            max_bytes: settings.max_image_bytes,
            allowed,
        }
    }

    pub fn allows(&self, format: ImageFormat) -> bool {
        self.allowed.contains(&format)
    }

    /// Validates raw image bytes.
    ///
    /// The format is sniffed from the file signature; `hint` (a file
    /// extension or MIME type) is only consulted when the signature is not
    /// recognised, and then the image is still refused if it is not allowed.
    pub fn validate_bytes(&self, bytes: Vec<u8>, hint: Option<&str>) -> Result<ImageAsset, AssetError> {
        let size = bytes.len() as u64;
        if size > self.max_bytes {
            return Err(AssetError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }
        if bytes.is_empty() {
            return Err(AssetError::Decode {
                reason: "file is empty".to_string(),
            });
        }
        let format = ImageFormat::sniff(&bytes)
            .or_else(|| {
                hint.and_then(|h| ImageFormat::from_mime(h).or_else(|| ImageFormat::from_extension(h)))
            })
            .ok_or_else(|| AssetError::UnsupportedType {
                mime: hint.unwrap_or("unknown").to_string(),
            })?;
        if !self.allows(format) {
            return Err(AssetError::UnsupportedType {
                mime: format.mime().to_string(),
            });
        }
        Ok(ImageAsset::new(format, bytes))
    }

    /// Reads and validates an image file.
    ///
    /// The size is checked from metadata before the file is read.
    pub async fn load_image_file(&self, path: impl AsRef<Path>) -> Result<ImageAsset, AssetError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await.map_err(|e| AssetError::Io {
            reason: format!("{}: {}", path.display(), e),
        })?;
        if metadata.len() > self.max_bytes {
            tracing::warn!(
                "Rejected image {}: {} bytes exceeds {}",
                path.display(),
                metadata.len(),
                self.max_bytes
            );
            return Err(AssetError::TooLarge {
                size: metadata.len(),
                max: self.max_bytes,
            });
        }
        let bytes = tokio::fs::read(path).await.map_err(|e| AssetError::Io {
            reason: format!("{}: {}", path.display(), e),
        })?;
        let hint = path.extension().and_then(|ext| ext.to_str());
        let result = self.validate_bytes(bytes, hint);
        match &result {
            Ok(asset) => tracing::info!(
                "Loaded image {} ({}, {} bytes)",
                path.display(),
                asset.format(),
                asset.len()
            ),
            Err(err) => tracing::warn!("Rejected image {}: {}", path.display(), err),
        }
        result
    }
}
