use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A web source the model cited while answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    title: String,
    /// Passed through as received; may be absent or not a well-formed URL.
    uri: Option<String>,
}

impl GroundingLink {
    pub fn new(title: impl Into<String>, uri: Option<String>) -> Self {
        Self {
            title: title.into(),
            uri,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

/// One turn of the conversation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    text: String,
    timestamp: DateTime<Utc>,
    /// Encoded bitmap exactly as it was supplied (e.g. a data URI).
    image: Option<String>,
    grounding_links: Vec<GroundingLink>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, image: Option<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            image,
            grounding_links: Vec::new(),
        }
    }

    pub fn model(text: impl Into<String>, grounding_links: Vec<GroundingLink>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            timestamp: Utc::now(),
            image: None,
            grounding_links,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn grounding_links(&self) -> &[GroundingLink] {
        &self.grounding_links
    }

    pub fn is_from_model(&self) -> bool {
        self.role == Role::Model
    }
}
