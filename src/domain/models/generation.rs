use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::InlineImage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentPart {
    Text(String),
    InlineImage(InlineImage),
}

/// A single-turn request to a generative model, independent of any vendor
/// wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    system_instruction: Option<String>,
    web_search: bool,
    parts: Vec<ContentPart>,
    /// When set, the model is asked for raw JSON matching this schema.
    response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            web_search: false,
            parts: vec![ContentPart::Text(text.into())],
            response_schema: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.parts.push(ContentPart::InlineImage(image));
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    pub fn web_search(&self) -> bool {
        self.web_search
    }

    pub fn parts(&self) -> &[ContentPart] {
        &self.parts
    }

    pub fn response_schema(&self) -> Option<&Value> {
        self.response_schema.as_ref()
    }

    pub fn is_schema_constrained(&self) -> bool {
        self.response_schema.is_some()
    }

    /// Concatenated text parts, mostly for logging.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text(t) => Some(t.as_str()),
                ContentPart::InlineImage(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn images(&self) -> impl Iterator<Item = &InlineImage> {
        self.parts.iter().filter_map(|p| match p {
            ContentPart::InlineImage(image) => Some(image),
            ContentPart::Text(_) => None,
        })
    }
}

/// A source the model reports having consulted. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

impl Citation {
    pub fn new(title: Option<String>, uri: Option<String>) -> Self {
        Self { title, uri }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    text: String,
    citations: Vec<Citation>,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }

    pub fn with_citations(mut self, citations: Vec<Citation>) -> Self {
        self.citations = citations;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    pub fn into_parts(self) -> (String, Vec<Citation>) {
        (self.text, self.citations)
    }
}
