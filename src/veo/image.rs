//! Reference image input for image-to-video generation.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::client::GenerationError;

/// Media types declared for known image file extensions.
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

/// A base64-encoded image plus its media type.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageReference {
    data: String,
    mime_type: String,
}

impl ImageReference {
    /// Encode raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidImage` if `mime_type` is not an
    /// `image/*` type.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, GenerationError> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(GenerationError::InvalidImage(format!(
                "'{}' is not an image type. Please upload a valid image file.",
                mime_type
            )));
        }
        Ok(Self {
            data: BASE64.encode(bytes),
            mime_type,
        })
    }

    /// Read an image file, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, GenerationError> {
        let mime_type = media_type_for_path(path).ok_or_else(|| {
            GenerationError::InvalidImage(format!(
                "'{}' is not a supported image file. Please upload a valid image file.",
                path.display()
            ))
        })?;
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, mime_type)
    }

    /// Base64 payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl fmt::Debug for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageReference")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Media type for an image file path, based on its extension.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}
