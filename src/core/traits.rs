use crate::provider::{Provider, RequestPayload};

use super::types::Message;

/// Conversation state that renders into a provider request body.
///
/// `render` reflects the state at the time of the call, so call it right
/// before each request.
pub trait ChatInput {
    fn append_user(&mut self, text: &str);

    fn append_assistant(&mut self, text: &str);

    /// Discard the conversation history, keeping the system instruction.
    fn reset(&mut self);

    fn render(&self) -> RequestPayload;

    fn provider(&self) -> Provider;
}

/// Builders that keep an ordered list of messages.
pub trait MessageHistory: ChatInput {
    fn append_message(&mut self, message: Message);

    fn append_system(&mut self, text: &str) {
        self.append_message(Message::system(text));
    }

    /// Remove the most recent message with the same role and content.
    /// Returns `false` when nothing matched.
    fn remove_last(&mut self, message: &Message) -> bool;

    fn messages(&self) -> &[Message];
}
