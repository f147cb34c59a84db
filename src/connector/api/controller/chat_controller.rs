use std::path::PathBuf;

use anyhow::Result;

use super::super::render::{format_message, waiting_spinner};
use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, prompt: Option<String>, image: Option<PathBuf>) -> Result<String> {
        let image = match image {
            Some(path) => Some(self.container.image_loader().load(path).await?),
            None => None,
        };

        let use_case = self.container.chat_use_case();
        let spinner = waiting_spinner("Thinking...");
        let reply = use_case
            .send(prompt.as_deref().unwrap_or_default(), image.as_deref())
            .await;
        spinner.finish_and_clear();

        Ok(format_message(&reply?))
    }

    pub async fn analyze(&self, image: PathBuf, prompt: Option<String>) -> Result<String> {
        let encoded = self.container.image_loader().load(image).await?;

        let use_case = self.container.chat_use_case();
        let spinner = waiting_spinner("Analyzing photo...");
        let reply = match prompt {
            Some(prompt) => use_case.send(&prompt, Some(&encoded)).await,
            None => use_case.analyze(&encoded).await,
        };
        spinner.finish_and_clear();

        Ok(format_message(&reply?))
    }
}
