use anyhow::Result;
use tracing::warn;

use crate::domain::{ChatMessage, DomainError};

use super::super::render::{format_comparison, format_message, waiting_spinner};
use super::super::{ChatSession, Container};

const HELP: &str = "\
Commands:
  <text>                      ask the car expert
  /image <path> [text]        ask about a photo
  /analyze <path>             identify and assess the car in a photo
  /compare <car 1> | <car 2>  compare two models feature by feature
  /table                      show the last comparison again
  /history                    show the conversation so far
  /help                       show this help
  /quit                       leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    Output(String),
    Quit,
}

/// Drives one interactive session, one input line at a time.
///
/// Chat failures surface as an apology turn in the history; a failed
/// comparison is reported and leaves the previous table in place.
pub struct SessionController<'a> {
    container: &'a Container,
    session: ChatSession,
}

impl<'a> SessionController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            container,
            session: ChatSession::new(container.locale()),
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn greeting(&self) -> String {
        self.session
            .history()
            .first()
            .map(format_message)
            .unwrap_or_default()
    }

    pub async fn handle(&mut self, line: &str) -> Result<SessionReply> {
        let line = line.trim();

        let (command, rest) = match line.strip_prefix('/') {
            Some(cmd) => cmd
                .split_once(char::is_whitespace)
                .map(|(c, r)| (c, r.trim()))
                .unwrap_or((cmd, "")),
            None => return self.chat(line, None).await.map(SessionReply::Output),
        };

        let output = match command {
            "quit" | "exit" => return Ok(SessionReply::Quit),
            "help" => HELP.to_string(),
            "history" => self
                .session
                .history()
                .iter()
                .map(format_message)
                .collect::<Vec<_>>()
                .join("\n\n"),
            "table" => match self.session.comparison() {
                Some(data) => format_comparison(data),
                None => "No comparison yet. Try /compare <car 1> | <car 2>".to_string(),
            },
            "compare" => self.compare(rest).await,
            "image" => {
                let (path, text) = rest
                    .split_once(char::is_whitespace)
                    .map(|(p, t)| (p, t.trim()))
                    .unwrap_or((rest, ""));
                self.chat_with_image(path, text).await?
            }
            "analyze" if rest.is_empty() => "Usage: /analyze <path>".to_string(),
            "analyze" => {
                let prompt = self.container.locale().analyze_prompt();
                self.chat_with_image(rest, prompt).await?
            }
            other => format!("Unknown command /{other}. Type /help for the list."),
        };

        Ok(SessionReply::Output(output))
    }

    async fn chat(&mut self, text: &str, image: Option<String>) -> Result<String> {
        if text.is_empty() && image.is_none() {
            return Ok(String::new());
        }

        let turn = ChatMessage::user(text, image);

        let use_case = self.container.chat_use_case();
        let spinner = waiting_spinner("Thinking...");
        let reply = use_case.send(text, turn.image()).await;
        spinner.finish_and_clear();

        let reply = match reply {
            Ok(reply) => reply,
            Err(e) if e.is_empty_input() => return Ok(format!("Nothing to send: {e}")),
            Err(e) => return Err(e.into()),
        };
        self.session.push(turn);
        let output = format_message(&reply);
        self.session.push(reply);

        Ok(output)
    }

    async fn chat_with_image(&mut self, path: &str, text: &str) -> Result<String> {
        if path.is_empty() {
            return Ok("Usage: /image <path> [text]".to_string());
        }

        match self.container.image_loader().load(path).await {
            Ok(encoded) => self.chat(text, Some(encoded)).await,
            Err(e) => {
                warn!("Could not read image {}: {}", path, e);
                Ok(format!("Could not read image {path}: {e}"))
            }
        }
    }

    async fn compare(&mut self, args: &str) -> String {
        let Some((car1, car2)) = args.split_once('|') else {
            return "Usage: /compare <car 1> | <car 2>".to_string();
        };

        let use_case = self.container.compare_use_case();
        let spinner = waiting_spinner("Comparing...");
        let result = use_case.compare(car1, car2).await;
        spinner.finish_and_clear();

        match result {
            Ok(data) => {
                let output = format_comparison(&data);
                self.session.replace_comparison(data);
                output
            }
            Err(DomainError::EmptyInput(_)) => "Usage: /compare <car 1> | <car 2>".to_string(),
            Err(e) => {
                warn!("Comparison failed: {}", e);
                format!("Comparison failed: {e}")
            }
        }
    }
}
