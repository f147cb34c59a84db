use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{CompareCarsUseCase, GenerativeModel, SendChatMessageUseCase};
use crate::connector::{GeminiClient, ImageLoader, MockGenerativeModel};
use crate::domain::Locale;

#[derive(Default)]
pub struct ContainerConfig {
    /// Serve every request from the in-process mock instead of Gemini.
    pub mock_model: bool,
    pub locale: Locale,
    /// Overrides `GEMINI_MODEL` when set.
    pub model: Option<String>,
}

pub struct Container {
    model: Arc<dyn GenerativeModel>,
    image_loader: ImageLoader,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let model: Arc<dyn GenerativeModel> = if config.mock_model {
            debug!("Using mock generative model");
            Arc::new(MockGenerativeModel::new())
        } else {
            let mut client = GeminiClient::from_env();
            if let Some(name) = config.model.as_deref() {
                client = client.with_model(name);
            }
            if !client.has_api_key() {
                warn!("GEMINI_API_KEY is not set; requests to the model will fail");
            }
            debug!("Using Gemini model {}", client.model_name());
            Arc::new(client)
        };

        Self::with_model(config, model)
    }

    /// Build around an already constructed model (e.g. a scripted mock).
    pub fn with_model(config: ContainerConfig, model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            image_loader: ImageLoader::new(),
            config,
        }
    }

    pub fn chat_use_case(&self) -> SendChatMessageUseCase {
        SendChatMessageUseCase::new(self.model.clone(), self.config.locale)
    }

    pub fn compare_use_case(&self) -> CompareCarsUseCase {
        CompareCarsUseCase::new(self.model.clone(), self.config.locale)
    }

    pub fn image_loader(&self) -> &ImageLoader {
        &self.image_loader
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }
}
