use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::GenerativeModel;
use crate::domain::{Citation, DomainError, GenerationRequest, GenerationResponse};

const MOCK_COMPARISON: &str = r#"{"features":["Engine","Horsepower","Transmission","Fuel economy","Base price"],"car1":{"name":"Mock Sedan","specs":{"Engine":"2.5L I4","Horsepower":"203 hp","Transmission":"8-speed automatic","Fuel economy":"32 mpg combined","Base price":"$28,000"}},"car2":{"name":"Mock Coupe","specs":{"Engine":"2.0L I4 Turbo","Horsepower":"252 hp","Transmission":"10-speed automatic","Base price":"$34,500"}}}"#;

/// Deterministic in-process stand-in for a generative model.
///
/// Scripted replies (or errors) are served first-in first-out. Once the script
/// is exhausted it falls back to a canned reply: an echo for free-form
/// requests and a fixed comparison document for schema-constrained ones.
/// Every request is recorded so tests can inspect what was sent.
pub struct MockGenerativeModel {
    script: Mutex<VecDeque<Result<GenerationResponse, DomainError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerativeModel {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_response(&self, response: GenerationResponse) {
        self.lock_script().push_back(Ok(response));
    }

    pub fn push_error(&self, error: DomainError) {
        self.lock_script().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.lock_requests().clone()
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.lock_requests().last().cloned()
    }

    fn canned_reply(request: &GenerationRequest) -> GenerationResponse {
        if request.is_schema_constrained() {
            return GenerationResponse::new(MOCK_COMPARISON);
        }

        let images = request.images().count();
        let mut text = format!("[mock] {}", request.text());
        if images > 0 {
            text.push_str(&format!(" ({images} image attached)"));
        }

        let citations = if request.web_search() {
            vec![Citation::new(
                Some("Mock source".to_string()),
                Some("https://example.com/cars".to_string()),
            )]
        } else {
            Vec::new()
        };

        GenerationResponse::new(text).with_citations(citations)
    }

    // A poisoned lock only means another test thread panicked mid-push; the
    // queue itself is still consistent.
    fn lock_script(
        &self,
    ) -> std::sync::MutexGuard<'_, VecDeque<Result<GenerationResponse, DomainError>>> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<GenerationRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockGenerativeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeModel for MockGenerativeModel {
    async fn complete_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, DomainError> {
        self.lock_requests().push(request.clone());

        let scripted = self.lock_script().pop_front();
        debug!(
            "MockGenerativeModel: serving {} reply",
            if scripted.is_some() { "scripted" } else { "canned" }
        );

        scripted.unwrap_or_else(|| Ok(Self::canned_reply(request)))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
