use super::error::ChatInputError;
use super::types::{Message, SystemMessage};

/// Ordered message history that always starts with the system message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system: impl Into<SystemMessage>) -> Result<Self, ChatInputError> {
        let system = system.into().into_message()?;
        Ok(Self {
            messages: vec![system],
        })
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drop everything after the first message.
    pub fn reset(&mut self) {
        self.messages.truncate(1);
    }

    /// Remove the match closest to the end, comparing role and content only.
    ///
    /// The founding system message at index 0 is never a candidate, even when
    /// it matches, so the history always keeps its instruction. Clear it with
    /// a new `Conversation` instead.
    pub fn remove_last(&mut self, message: &Message) -> bool {
        match self
            .messages
            .iter()
            .skip(1)
            .rposition(|current| current.same_utterance(message))
        {
            Some(index) => {
                self.messages.remove(index + 1);
                true
            }
            None => false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_message(&self) -> &Message {
        &self.messages[0]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`; present only for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
