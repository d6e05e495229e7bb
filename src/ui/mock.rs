use std::collections::VecDeque;

use crate::error::Result;
use crate::ui::{Prompt, PromptResponse, Tone, Ui};

/// Recording [Ui] for tests.
///
/// Every written line and every prompt message is appended to `messages`
/// in order. Prompts are answered from a queue of scripted answers, falling
/// back to "yes" once the queue is empty.
#[derive(Debug, Default)]
pub struct MockUi {
    pub messages: Vec<String>,
    pub prompts: Vec<String>,
    answers: VecDeque<bool>,
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next prompts with `answers`, in order
    pub fn answering<I: IntoIterator<Item = bool>>(mut self, answers: I) -> Self {
        self.answers.extend(answers);
        self
    }

    /// Decline the first prompt
    pub fn declining() -> Self {
        Self::new().answering([false])
    }
}

impl Ui for MockUi {
    fn write_line(&mut self, _tone: Tone, text: &str) {
        self.messages.push(text.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResponse> {
        self.messages.push(prompt.message.clone());
        self.prompts.push(prompt.message.clone());
        Ok(PromptResponse {
            proceed: self.answers.pop_front().unwrap_or(true),
        })
    }
}
