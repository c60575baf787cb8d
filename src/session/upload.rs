//! Input acquisition: reading a selected file into an uploadable image.

use crate::error::{GenEditError, Result};
use crate::image::ImageFormat;
use base64::Engine;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A displayable copy of the original image.
///
/// Backed by a temporary file that is deleted when this value is dropped, so a
/// replaced upload or a torn-down session never leaves previews behind.
#[derive(Debug)]
pub struct PreviewRef {
    file: tempfile::NamedTempFile,
}

impl PreviewRef {
    fn create(data: &[u8], format: ImageFormat) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("genedit-preview-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Location of the preview on disk.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// An image selected by the user, ready to be sent for editing.
#[derive(Debug)]
pub struct UploadedImage {
    source: PathBuf,
    format: ImageFormat,
    base64: String,
    preview: PreviewRef,
}

impl UploadedImage {
    /// Reads `path`, detects its format and prepares the base64 payload and preview.
    ///
    /// Encoding and the preview write run on the blocking pool.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = tokio::fs::read(&path).await?;
        tokio::task::spawn_blocking(move || Self::from_bytes(path, &data))
            .await
            .map_err(|e| GenEditError::Io(std::io::Error::other(e)))?
    }

    /// Builds an upload from bytes already in memory. `source` only names the origin.
    pub fn from_bytes(source: impl Into<PathBuf>, data: &[u8]) -> Result<Self> {
        let source = source.into();
        if data.is_empty() {
            return Err(GenEditError::InvalidRequest(format!(
                "{} is empty",
                source.display()
            )));
        }

        let format = ImageFormat::from_magic_bytes(data)
            .or_else(|| ImageFormat::from_path(&source))
            .ok_or_else(|| {
                GenEditError::InvalidRequest(format!(
                    "{} is not a PNG, JPEG or WebP image",
                    source.display()
                ))
            })?;

        let base64 = base64::engine::general_purpose::STANDARD.encode(data);
        let preview = PreviewRef::create(data, format)?;

        tracing::debug!(
            source = %source.display(),
            format = %format,
            bytes = data.len(),
            "image loaded"
        );

        Ok(Self {
            source,
            format,
            base64,
            preview,
        })
    }

    /// Path the image was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Detected image format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// MIME type sent along with the payload.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Base64-encoded file contents.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Displayable preview of the original.
    pub fn preview(&self) -> &PreviewRef {
        &self.preview
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Smallest byte string the format sniffer recognizes as PNG.
    pub const PNG_BYTES: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R',
    ];

    /// Same for JPEG.
    pub const JPEG_BYTES: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0, 1];

    /// Writes `data` to `name` inside `dir` and returns the path.
    pub fn write_file(dir: &tempfile::TempDir, name: &str, data: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cat.png", &PNG_BYTES);

        let image = UploadedImage::load(&path).await.unwrap();
        assert_eq!(image.source(), path.as_path());
        assert_eq!(image.format(), ImageFormat::Png);
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(
            image.base64(),
            base64::engine::general_purpose::STANDARD.encode(PNG_BYTES)
        );

        let preview = image.preview().path();
        assert!(preview.exists());
        assert_eq!(preview.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(std::fs::read(preview).unwrap(), PNG_BYTES.to_vec());
    }

    #[tokio::test]
    async fn test_magic_bytes_win_over_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "mislabelled.png", &JPEG_BYTES);

        let image = UploadedImage::load(&path).await.unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_load_concurrently_on_blocking_pool() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_file(&dir, "a.png", &PNG_BYTES);
        let jpeg = write_file(&dir, "b.jpg", &JPEG_BYTES);

        let (a, b) = tokio::join!(UploadedImage::load(&png), UploadedImage::load(&jpeg));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.preview().path(), b.preview().path());
        assert_eq!(std::fs::read(a.preview().path()).unwrap(), PNG_BYTES.to_vec());
        assert_eq!(std::fs::read(b.preview().path()).unwrap(), JPEG_BYTES.to_vec());
    }

    #[test]
    fn test_extension_fallback() {
        let image = UploadedImage::from_bytes("photo.webp", b"short").unwrap();
        assert_eq!(image.format(), ImageFormat::WebP);
    }

    #[test]
    fn test_rejects_unknown_and_empty() {
        assert!(matches!(
            UploadedImage::from_bytes("notes.txt", b"just some text here"),
            Err(GenEditError::InvalidRequest(_))
        ));
        assert!(matches!(
            UploadedImage::from_bytes("empty.png", b""),
            Err(GenEditError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = UploadedImage::load(dir.path().join("nope.png")).await;
        assert!(matches!(result, Err(GenEditError::Io(_))));
    }

    #[test]
    fn test_preview_released_on_drop() {
        let image = UploadedImage::from_bytes("a.png", &PNG_BYTES).unwrap();
        let preview = image.preview().path().to_path_buf();
        assert!(preview.exists());

        drop(image);
        assert!(!preview.exists());
    }
}
