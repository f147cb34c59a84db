use async_trait::async_trait;

use crate::domain::{DomainError, GenerationRequest, GenerationResponse};

/// An interface for submitting a single-turn request to a generative language
/// model and receiving its text (or schema-constrained JSON) reply.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. The use cases stay decoupled from any particular provider and can
/// be exercised against deterministic stubs.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one request to completion. Any failure to obtain a reply is a
    /// [`DomainError::Transport`].
    async fn complete_text(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, DomainError>;

    /// Get the model name used for generation
    fn model_name(&self) -> &str;
}
