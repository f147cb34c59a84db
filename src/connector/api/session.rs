use crate::domain::{ChatMessage, ComparisonData, Locale};

/// Presentation-side state of one interactive session: the running
/// conversation and the comparison currently on display.
///
/// Lives only as long as the process; nothing is persisted.
pub struct ChatSession {
    history: Vec<ChatMessage>,
    comparison: Option<ComparisonData>,
}

impl ChatSession {
    /// Start a session that opens with the locale's greeting.
    pub fn new(locale: Locale) -> Self {
        Self {
            history: vec![ChatMessage::model(locale.greeting(), Vec::new())],
            comparison: None,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.history.last()
    }

    pub fn comparison(&self) -> Option<&ComparisonData> {
        self.comparison.as_ref()
    }

    /// Swap in a freshly obtained comparison. Previous results are discarded
    /// wholesale, never merged.
    pub fn replace_comparison(&mut self, data: ComparisonData) {
        self.comparison = Some(data);
    }
}
