//! Core types for image editing.

use crate::error::{GenEditError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Attempts to detect format from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Edit provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditProviderKind {
    /// Google Gemini image models.
    Gemini,
    /// A provider supplied by the caller (tests, custom backends).
    Custom,
}

impl std::fmt::Display for EditProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Everything the remote service receives for one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Base64-encoded source image.
    pub image_base64: String,
    /// MIME type of the source image (e.g. `image/png`).
    pub mime_type: String,
    /// Text describing the desired edit.
    pub prompt: String,
}

impl EditRequest {
    /// Creates a new edit request.
    pub fn new(
        image_base64: impl Into<String>,
        mime_type: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image_base64: image_base64.into(),
            mime_type: mime_type.into(),
            prompt: prompt.into(),
        }
    }
}

/// An edited image as returned by the remote service, still base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "edited image should be saved or displayed"]
pub struct EditedImage {
    base64: String,
}

impl EditedImage {
    /// Wraps a base64 payload.
    pub fn new(base64: impl Into<String>) -> Self {
        Self {
            base64: base64.into(),
        }
    }

    /// Returns the base64 payload exactly as received.
    pub fn as_base64(&self) -> &str {
        &self.base64
    }

    /// Decodes the payload into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.base64.trim())
            .map_err(|e| GenEditError::Decode(e.to_string()))
    }

    /// Returns the format detected from the decoded bytes, if recognizable.
    pub fn detected_format(&self) -> Option<ImageFormat> {
        self.decode()
            .ok()
            .and_then(|data| ImageFormat::from_magic_bytes(&data))
    }

    /// Decodes and writes the image to the specified path. Returns bytes written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let data = self.decode()?;
        std::fs::write(path, &data)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a"), None);
    }

    #[test]
    fn test_format_from_extension_and_path() {
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_path("a/b/cat.webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_path("notes.txt"), None);
        assert_eq!(ImageFormat::from_path("no_extension"), None);
    }

    #[test]
    fn test_edited_image_decode() {
        let b64 = base64::engine::general_purpose::STANDARD.encode(PNG_MAGIC);
        let image = EditedImage::new(b64);

        assert_eq!(image.decode().unwrap(), PNG_MAGIC.to_vec());
        assert_eq!(image.detected_format(), Some(ImageFormat::Png));
    }

    #[test]
    fn test_edited_image_bad_base64() {
        let image = EditedImage::new("not base64!!");
        assert!(matches!(image.decode(), Err(GenEditError::Decode(_))));
        assert_eq!(image.detected_format(), None);
    }

    #[test]
    fn test_edited_image_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let image = EditedImage::new(base64::engine::general_purpose::STANDARD.encode(JPEG_MAGIC));

        let written = image.save(&path).unwrap();
        assert_eq!(written, JPEG_MAGIC.len());
        assert_eq!(std::fs::read(&path).unwrap(), JPEG_MAGIC.to_vec());
    }

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(EditProviderKind::Gemini.to_string(), "gemini");
        assert_eq!(EditProviderKind::Custom.to_string(), "custom");
    }
}
