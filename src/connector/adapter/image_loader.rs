use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::debug;

use crate::domain::{DomainError, DEFAULT_IMAGE_MIME_TYPE};

/// Reads an image from disk and encodes it as a `data:` URI, the
/// self-describing form the chat use case accepts.
///
/// The media type is guessed from the file extension. Size and content are not
/// checked.
pub struct ImageLoader;

impl ImageLoader {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, path: impl AsRef<Path>) -> Result<String, DomainError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let mime_type = Self::mime_type_for(path);
        debug!(
            "Loaded image {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );

        Ok(Self::to_data_uri(&mime_type, &bytes))
    }

    pub fn to_data_uri(mime_type: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
    }

    fn mime_type_for(path: &Path) -> String {
        mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string())
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}
