use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::{
    ChatInput, ChatInputError, ChatRole, Conversation, Message, MessageHistory, SystemMessage,
};

use super::{Provider, RequestPayload};

/// Llama chat behind a SageMaker endpoint. `parameters` is forwarded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct SageMakerInput {
    conversation: Conversation,
    pub parameters: Value,
}

impl SageMakerInput {
    pub fn new(
        system: impl Into<SystemMessage>,
        parameters: Value,
    ) -> Result<Self, ChatInputError> {
        Ok(Self {
            conversation: Conversation::new(system)?,
            parameters,
        })
    }

    /// Build with an empty parameters object.
    pub fn without_parameters(system: impl Into<SystemMessage>) -> Result<Self, ChatInputError> {
        Self::new(system, Value::Object(Map::new()))
    }

    pub fn to_request(&self) -> SageMakerRequest {
        let dialog = self
            .conversation
            .messages()
            .iter()
            .map(|message| SageMakerMessage {
                role: message.role(),
                content: message.content().to_string(),
            })
            .collect();

        SageMakerRequest {
            parameters: self.parameters.clone(),
            inputs: vec![dialog],
        }
    }
}

impl ChatInput for SageMakerInput {
    fn append_user(&mut self, text: &str) {
        self.conversation.push(Message::user(text));
    }

    fn append_assistant(&mut self, text: &str) {
        self.conversation.push(Message::assistant(text));
    }

    fn reset(&mut self) {
        self.conversation.reset();
    }

    fn render(&self) -> RequestPayload {
        RequestPayload::SageMaker(self.to_request())
    }

    fn provider(&self) -> Provider {
        Provider::SageMaker
    }
}

impl MessageHistory for SageMakerInput {
    fn append_message(&mut self, message: Message) {
        self.conversation.push(message);
    }

    fn remove_last(&mut self, message: &Message) -> bool {
        self.conversation.remove_last(message)
    }

    fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SageMakerRequest {
    pub parameters: Value,
    /// A single dialog wrapped in a batch of one.
    pub inputs: Vec<Vec<SageMakerMessage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SageMakerMessage {
    pub role: ChatRole,
    pub content: String,
}
