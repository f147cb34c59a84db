use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::GenerativeModel;
use crate::domain::{
    Citation, ContentPart, DomainError, GenerationRequest, GenerationResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const API_VERSION_PATH: &str = "/v1beta/models";
const JSON_MIME_TYPE: &str = "application/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// `generateContent` request payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiContent<'a>>,
    contents: Vec<ApiContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ApiTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<ApiGenerationConfig<'a>>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ApiPart<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: ApiBlob<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiBlob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiTool {
    google_search: ApiGoogleSearch,
}

#[derive(Serialize)]
struct ApiGoogleSearch {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiGenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

/// Subset of the `generateContent` response we care about.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    prompt_feedback: Option<ApiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCandidate {
    content: Option<ApiCandidateContent>,
    grounding_metadata: Option<ApiGroundingMetadata>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiCandidateContent {
    #[serde(default)]
    parts: Vec<ApiResponsePart>,
}

#[derive(Deserialize)]
struct ApiResponsePart {
    text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer.
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<ApiGroundingChunk>,
}

#[derive(Deserialize)]
struct ApiGroundingChunk {
    web: Option<ApiWebSource>,
}

#[derive(Deserialize)]
struct ApiWebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
    status: Option<String>,
}

/// HTTP client for the Gemini `generateContent` API.
///
/// Implements [`GenerativeModel`] so the use cases stay decoupled from
/// transport and serialization details.
///
/// The API key is not checked when the client is built. With no key every
/// call fails with [`DomainError::Transport`] before anything is sent.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Base URL without trailing slash (e.g. `https://generativelanguage.googleapis.com`).
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable          | Default                                     | Purpose              |
    /// |-------------------|---------------------------------------------|----------------------|
    /// | `GEMINI_API_KEY`  | `API_KEY`, then `""`                        | Access token         |
    /// | `GEMINI_MODEL`    | `gemini-3-flash-preview`                    | Model name           |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` | Endpoint / test stub |
    pub fn from_env() -> Self {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .unwrap_or_default();
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, model, base)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}/{}:generateContent",
            self.base_url, API_VERSION_PATH, self.model
        )
    }

    fn build_request(request: &GenerationRequest) -> ApiRequest<'_> {
        let parts = request
            .parts()
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => ApiPart::Text {
                    text: text.as_str(),
                },
                ContentPart::InlineImage(image) => ApiPart::InlineData {
                    inline_data: ApiBlob {
                        mime_type: image.mime_type(),
                        data: image.data(),
                    },
                },
            })
            .collect();

        ApiRequest {
            system_instruction: request.system_instruction().map(|text| ApiContent {
                role: None,
                parts: vec![ApiPart::Text { text }],
            }),
            contents: vec![ApiContent {
                role: Some("user"),
                parts,
            }],
            tools: if request.web_search() {
                vec![ApiTool {
                    google_search: ApiGoogleSearch {},
                }]
            } else {
                Vec::new()
            },
            generation_config: request.response_schema().map(|schema| ApiGenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: schema,
            }),
        }
    }

    /// Flatten the first candidate into text plus citations. A response with
    /// no usable candidate yields empty text; callers decide what that means.
    fn into_generation_response(api: ApiResponse) -> GenerationResponse {
        let Some(candidate) = api.candidates.into_iter().next() else {
            if let Some(reason) = api.prompt_feedback.and_then(|f| f.block_reason) {
                warn!("GeminiClient: prompt blocked ({reason})");
            } else {
                warn!("GeminiClient: response contained no candidates");
            }
            return GenerationResponse::default();
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != "STOP" {
                debug!("GeminiClient: candidate finished with {reason}");
            }
        }

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();

        let citations = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| match chunk.web {
                Some(web) => Citation::new(web.title, web.uri),
                None => Citation::default(),
            })
            .collect();

        GenerationResponse::new(text).with_citations(citations)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn complete_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, DomainError> {
        if !self.has_api_key() {
            return Err(DomainError::transport(
                "GeminiClient: no API key configured (set GEMINI_API_KEY)",
            ));
        }

        let body = Self::build_request(request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| {
                    format!(
                        "{} ({})",
                        b.error.message,
                        b.error.status.unwrap_or_default()
                    )
                })
                .unwrap_or(body);
            warn!("GeminiClient: API returned {status}: {detail}");
            return Err(DomainError::transport(format!(
                "GeminiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::transport(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        Ok(Self::into_generation_response(api_response))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::InlineImage;

    #[test]
    fn test_chat_request_wire_format() {
        let request = GenerationRequest::new("What is this car?")
            .with_system_instruction("You are a car expert.")
            .with_web_search(true)
            .with_image(InlineImage::new("image/png", "AAAA"));

        let wire = serde_json::to_value(GeminiClient::build_request(&request)).unwrap();

        assert_eq!(
            wire,
            json!({
                "systemInstruction": { "parts": [{ "text": "You are a car expert." }] },
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "What is this car?" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ]
                }],
                "tools": [{ "googleSearch": {} }]
            })
        );
    }

    #[test]
    fn test_schema_request_wire_format() {
        let schema = json!({ "type": "OBJECT" });
        let request = GenerationRequest::new("Compare A and B").with_response_schema(schema.clone());

        let wire = serde_json::to_value(GeminiClient::build_request(&request)).unwrap();

        assert!(wire.get("systemInstruction").is_none());
        assert!(wire.get("tools").is_none());
        assert_eq!(
            wire["generationConfig"],
            json!({ "responseMimeType": "application/json", "responseSchema": schema })
        );
    }

    #[test]
    fn test_response_text_and_citations() {
        let api: ApiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "The Camry " },
                    { "text": "costs about $28k." }
                ]},
                "finishReason": "STOP",
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://toyota.com", "title": "toyota.com" } },
                    { "web": { "uri": "https://example.com" } },
                    {}
                ]}
            }]
        }))
        .unwrap();

        let response = GeminiClient::into_generation_response(api);

        assert_eq!(response.text(), "The Camry costs about $28k.");
        assert_eq!(response.citations().len(), 3);
        assert_eq!(response.citations()[0].title.as_deref(), Some("toyota.com"));
        assert_eq!(response.citations()[1].title, None);
        assert_eq!(response.citations()[2], Citation::default());
    }

    #[test]
    fn test_blocked_prompt_yields_empty_text() {
        let api: ApiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        let response = GeminiClient::into_generation_response(api);
        assert!(response.text().is_empty());
        assert!(response.citations().is_empty());
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new("key", "gemini-2.5-flash", "http://localhost:8080/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            client.with_model("other").endpoint(),
            "http://localhost:8080/v1beta/models/other:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_transport() {
        let client = GeminiClient::new("", DEFAULT_MODEL, "http://127.0.0.1:9");
        let err = client
            .complete_text(&GenerationRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
