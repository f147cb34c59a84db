use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::GenerativeModel;
use crate::domain::{
    ChatMessage, DomainError, GenerationRequest, GenerationResponse, GroundingLink, InlineImage,
    Locale,
};

/// Sends one conversational turn (text, a car photo, or both) to the model and
/// turns its reply into a model-role [`ChatMessage`].
///
/// Stateless: the caller owns the history and appends both turns itself.
pub struct SendChatMessageUseCase {
    model: Arc<dyn GenerativeModel>,
    locale: Locale,
}

impl SendChatMessageUseCase {
    pub fn new(model: Arc<dyn GenerativeModel>, locale: Locale) -> Self {
        Self { model, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Send a turn, recovering from remote failures locally.
    ///
    /// Only [`DomainError::EmptyInput`] is returned as an error. A transport
    /// failure or an unusable reply yields a model message carrying the
    /// locale's apology so the conversation can continue.
    pub async fn send(&self, prompt: &str, image: Option<&str>) -> Result<ChatMessage, DomainError> {
        match self.try_send(prompt, image).await {
            Ok(message) => Ok(message),
            Err(e) if e.is_empty_input() => Err(e),
            Err(e) => {
                warn!("Chat request failed, replying with apology: {}", e);
                Ok(ChatMessage::model(self.locale.apology(), Vec::new()))
            }
        }
    }

    /// Ask the model to identify and assess the car in `image`.
    pub async fn analyze(&self, image: &str) -> Result<ChatMessage, DomainError> {
        if InlineImage::from_encoded(image).is_empty() {
            return Err(DomainError::empty_input("no image supplied for analysis"));
        }
        self.send(self.locale.analyze_prompt(), Some(image)).await
    }

    /// Like [`Self::send`] but propagates every failure to the caller.
    pub async fn try_send(
        &self,
        prompt: &str,
        image: Option<&str>,
    ) -> Result<ChatMessage, DomainError> {
        let request = self.build_request(prompt, image)?;

        info!(
            "Sending chat turn to {} (image={})",
            self.model.model_name(),
            request.images().next().is_some()
        );
        let start_time = Instant::now();

        let response = self.model.complete_text(&request).await?;

        debug!(
            "Chat reply received in {:.2}s: {}",
            start_time.elapsed().as_secs_f64(),
            response.text()
        );

        self.to_message(response)
    }

    fn build_request(
        &self,
        prompt: &str,
        image: Option<&str>,
    ) -> Result<GenerationRequest, DomainError> {
        let prompt = prompt.trim();
        // A data URI with nothing after the comma carries no image.
        let image = image
            .map(InlineImage::from_encoded)
            .filter(|i| !i.is_empty());

        let text = match (prompt.is_empty(), &image) {
            (true, None) => {
                return Err(DomainError::empty_input(
                    "a chat turn needs text, an image, or both",
                ))
            }
            (true, Some(_)) => self.locale.identify_prompt(),
            (false, _) => prompt,
        };

        let mut request = GenerationRequest::new(text)
            .with_system_instruction(self.locale.system_instruction())
            .with_web_search(true);

        if let Some(image) = image {
            request = request.with_image(image);
        }

        Ok(request)
    }

    fn to_message(&self, response: GenerationResponse) -> Result<ChatMessage, DomainError> {
        let (text, citations) = response.into_parts();

        if text.trim().is_empty() {
            return Err(DomainError::schema_validation("model returned no text"));
        }

        let links = citations
            .into_iter()
            .map(|c| {
                let title = c
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| self.locale.link_placeholder().to_string());
                GroundingLink::new(title, c.uri)
            })
            .collect();

        Ok(ChatMessage::model(text, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockGenerativeModel;
    use crate::domain::{Citation, ContentPart, Role};

    fn use_case(model: &Arc<MockGenerativeModel>) -> SendChatMessageUseCase {
        SendChatMessageUseCase::new(model.clone(), Locale::English)
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected_without_a_call() {
        let model = Arc::new(MockGenerativeModel::new());
        let chat = use_case(&model);

        assert!(chat.send("", None).await.unwrap_err().is_empty_input());
        assert!(chat.send("   ", Some("")).await.unwrap_err().is_empty_input());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_image_without_text_uses_identify_prompt() {
        let model = Arc::new(MockGenerativeModel::new());
        model.push_response(GenerationResponse::new("That is a 2019 Mazda MX-5."));
        let chat = use_case(&model);

        let reply = chat
            .send("", Some("data:image/png;base64,iVBORw0KGgo="))
            .await
            .unwrap();

        assert_eq!(reply.text(), "That is a 2019 Mazda MX-5.");
        assert_eq!(model.call_count(), 1);

        let request = model.last_request().unwrap();
        assert_eq!(request.text(), Locale::English.identify_prompt());
        let image = request.images().next().unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), "iVBORw0KGgo=");
    }

    #[tokio::test]
    async fn test_image_with_empty_payload_is_rejected() {
        let model = Arc::new(MockGenerativeModel::new());
        let chat = use_case(&model);

        let err = chat
            .send("", Some("data:image/png;base64,"))
            .await
            .unwrap_err();
        assert!(err.is_empty_input());
        assert!(chat
            .analyze("data:image/jpeg;base64,  ")
            .await
            .unwrap_err()
            .is_empty_input());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_text_with_empty_image_payload_sends_text_only() {
        let model = Arc::new(MockGenerativeModel::new());
        let chat = use_case(&model);

        chat.send("Is this a Supra?", Some("data:image/png;base64,"))
            .await
            .unwrap();

        let request = model.last_request().unwrap();
        assert_eq!(request.text(), "Is this a Supra?");
        assert!(request.images().next().is_none());
    }

    #[tokio::test]
    async fn test_request_carries_persona_and_web_search() {
        let model = Arc::new(MockGenerativeModel::new());
        let chat = use_case(&model);

        chat.send("How much is a new Civic?", None).await.unwrap();

        let request = model.last_request().unwrap();
        assert_eq!(
            request.system_instruction(),
            Some(Locale::English.system_instruction())
        );
        assert!(request.web_search());
        assert!(!request.is_schema_constrained());
        assert_eq!(
            request.parts(),
            &[ContentPart::Text("How much is a new Civic?".to_string())]
        );
    }

    #[tokio::test]
    async fn test_citations_become_grounding_links() {
        let model = Arc::new(MockGenerativeModel::new());
        model.push_response(GenerationResponse::new("Around $25,000.").with_citations(vec![
            Citation::new(Some("Honda".to_string()), Some("https://honda.com".to_string())),
            Citation::new(None, Some("not a url".to_string())),
            Citation::new(Some(" ".to_string()), None),
        ]));
        let chat = use_case(&model);

        let reply = chat.send("Civic price?", None).await.unwrap();
        let links = reply.grounding_links();

        assert_eq!(reply.role(), Role::Model);
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].title(), "Honda");
        assert_eq!(links[1].title(), "reference link");
        assert_eq!(links[1].uri(), Some("not a url"));
        assert_eq!(links[2].title(), "reference link");
        assert_eq!(links[2].uri(), None);
    }

    #[tokio::test]
    async fn test_reply_without_citations_has_empty_links() {
        let model = Arc::new(MockGenerativeModel::new());
        model.push_response(GenerationResponse::new("Hello!"));
        let chat = use_case(&model);

        let reply = chat.send("Hi", None).await.unwrap();
        assert!(reply.grounding_links().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_apology() {
        let model = Arc::new(MockGenerativeModel::new());
        model.push_error(DomainError::transport("quota exceeded"));
        let chat = use_case(&model);

        let reply = chat.send("Hi", None).await.unwrap();

        assert!(reply.is_from_model());
        assert_eq!(reply.text(), Locale::English.apology());
        assert!(reply.grounding_links().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply_becomes_apology() {
        let model = Arc::new(MockGenerativeModel::new());
        model.push_response(GenerationResponse::new(""));
        let chat = use_case(&model);

        let reply = chat.send("Hi", None).await.unwrap();
        assert_eq!(reply.text(), Locale::English.apology());
    }

    #[tokio::test]
    async fn test_try_send_propagates_failure() {
        let model = Arc::new(MockGenerativeModel::new());
        model.push_error(DomainError::transport("connection refused"));
        let chat = use_case(&model);

        let err = chat.try_send("Hi", None).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_analyze_uses_analysis_prompt() {
        let model = Arc::new(MockGenerativeModel::new());
        let chat = use_case(&model);

        chat.analyze("/9j/4AAQ").await.unwrap();

        let request = model.last_request().unwrap();
        assert_eq!(request.text(), Locale::English.analyze_prompt());
        assert_eq!(request.images().next().unwrap().mime_type(), "image/jpeg");

        assert!(chat.analyze("  ").await.unwrap_err().is_empty_input());
        assert_eq!(model.call_count(), 1);
    }
}
