use serde::{Deserialize, Serialize};

/// Mime type assumed for payloads that carry no data-URI header.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// An image ready to be attached to a generation request: a declared media
/// type plus the opaque encoded payload with any transport header removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    mime_type: String,
    data: String,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Split a self-describing encoded image into media type and payload.
    ///
    /// `data:image/png;base64,AAAA` yields (`image/png`, `AAAA`). A string
    /// without a `data:` header is taken as a bare payload of
    /// [`DEFAULT_IMAGE_MIME_TYPE`]. The payload itself is not decoded or
    /// validated.
    pub fn from_encoded(encoded: &str) -> Self {
        let encoded = encoded.trim();

        let Some(rest) = encoded.strip_prefix("data:") else {
            return Self::new(DEFAULT_IMAGE_MIME_TYPE, encoded);
        };

        let Some((header, payload)) = rest.split_once(',') else {
            return Self::new(DEFAULT_IMAGE_MIME_TYPE, rest);
        };

        let mime_type = header
            .split(';')
            .next()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE);

        Self::new(mime_type, payload)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }
}
