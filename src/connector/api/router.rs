use anyhow::{bail, Result};

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, CompareController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    compare_controller: CompareController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            compare_controller: CompareController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { prompt, image } => self.chat_controller.ask(prompt, image).await,
            Commands::Compare { car1, car2, format } => {
                self.compare_controller.compare(car1, car2, format).await
            }
            Commands::Analyze { image, prompt } => {
                self.chat_controller.analyze(image, prompt).await
            }
            Commands::Chat => bail!("interactive chat is driven by SessionController"),
        }
    }
}
